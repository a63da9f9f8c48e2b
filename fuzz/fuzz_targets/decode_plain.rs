#![no_main]

use libfuzzer_sys::fuzz_target;

use parquet_columnar::encoding::plain;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let count = data[0] as usize;
    let rest = &data[1..];

    let _ = plain::decode_bool(rest, count);
    let _ = plain::decode_i32(rest, count);
    let _ = plain::decode_i64(rest, count);
    let _ = plain::decode_f32(rest, count);
    let _ = plain::decode_f64(rest, count);
    let _ = plain::decode_int96(rest, count);
    let _ = plain::decode_byte_array(rest, count);
    let _ = plain::decode_fixed_len_byte_array(rest, count, 5);
});
