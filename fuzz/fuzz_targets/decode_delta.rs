#![no_main]

use libfuzzer_sys::fuzz_target;

use parquet_columnar::encoding::delta_bitpacked;

fuzz_target!(|data: &[u8]| {
    let _ = delta_bitpacked::decode(data);
    let _ = delta_bitpacked::decode_with_len(data);
});
