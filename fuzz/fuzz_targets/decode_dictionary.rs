#![no_main]

use libfuzzer_sys::fuzz_target;

use parquet_columnar::encoding::dictionary;
use parquet_columnar::encoding::plain;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let count = (data[0] % 64) as usize;
    let rest = &data[1..];

    let Ok(indices) = dictionary::decode_indices(rest, count) else {
        return;
    };

    // A dictionary page decoded against whatever values happen to parse as PLAIN byte arrays;
    // gather must reject any index beyond that dictionary's size without panicking.
    if let Ok(dict) = plain::decode_byte_array(rest, count.min(8)) {
        let _ = dictionary::gather(&dict, &indices);
    }
});
