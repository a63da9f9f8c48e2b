#![no_main]

use libfuzzer_sys::fuzz_target;

use parquet_columnar::config::DecodeLimits;
use parquet_columnar::encoding::delta_byte_array;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let count = (data[0] % 64) as usize;
    let rest = &data[1..];

    let _ = delta_byte_array::decode_delta_length_byte_array(rest, count);

    let mut scratch = Vec::new();
    let limits = DecodeLimits { max_dictionary_entries: usize::MAX, max_scratch_bytes: 1 << 20 };
    let _ = delta_byte_array::decode_delta_byte_array(rest, count, &mut scratch, &limits);
});
