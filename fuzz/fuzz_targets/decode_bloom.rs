#![no_main]

use libfuzzer_sys::fuzz_target;

use parquet_columnar::bloom::BloomFilter;

fuzz_target!(|data: &[u8]| {
    let Ok(filter) = BloomFilter::from_bytes(data.to_vec()) else {
        return;
    };
    let _ = filter.check(data);
    let _ = filter.as_bytes();
});
