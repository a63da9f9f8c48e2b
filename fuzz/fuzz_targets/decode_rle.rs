#![no_main]

use libfuzzer_sys::fuzz_target;

use parquet_columnar::encoding::rle::RleDecoder;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let bit_width = (data[0] % 33) as u32;
    let rest = &data[1..];

    let Ok(mut decoder) = RleDecoder::new(rest, bit_width) else {
        return;
    };
    let mut out = [0u32; 64];
    // Keep pulling until end-of-data or a malformed-input error; either is an acceptable
    // terminator, a panic is not. A run's declared count is caller-trusted and can be huge, so
    // bound the number of batches this harness will pull regardless of what the stream claims.
    for _ in 0..4096 {
        if decoder.decode_batch(&mut out).is_err() {
            break;
        }
    }
});
