// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The literal end-to-end seed scenarios named by the testable-properties table.

use parquet_columnar::bloom::{BloomFilter, BloomFilterOptions};
use parquet_columnar::encoding::{byte_stream_split, delta_bitpacked, plain, rle};
use parquet_columnar::hash::xxhash64;

#[test]
fn scenario_a_plain_int32() {
    let values = [1i32, -1, 2147483647, -2147483648];
    let mut out = Vec::new();
    plain::encode_i32(&values, &mut out);
    assert_eq!(
        out,
        vec![
            0x01, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f, 0x00, 0x00,
            0x00, 0x80,
        ]
    );
    assert_eq!(plain::decode_i32(&out, 4).unwrap(), values);
}

#[test]
fn scenario_b_hybrid_rle_width_1_hundred_zeros() {
    let mut encoder = rle::RleEncoder::new(1).unwrap();
    for _ in 0..100 {
        encoder.put(0).unwrap();
    }
    let bytes = encoder.finish().unwrap();
    assert!(bytes.len() <= 10);

    let mut decoder = rle::RleDecoder::new(&bytes, 1).unwrap();
    let mut out = [0u32; 100];
    decoder.decode_batch(&mut out).unwrap();
    assert_eq!(out, [0u32; 100]);
}

#[test]
fn scenario_c_hybrid_rle_width_4_skip_then_read() {
    let mut encoder = rle::RleEncoder::new(4).unwrap();
    for v in 0..10u32 {
        for _ in 0..10 {
            encoder.put(v).unwrap();
        }
    }
    let bytes = encoder.finish().unwrap();

    let mut decoder = rle::RleDecoder::new(&bytes, 4).unwrap();
    decoder.skip(25).unwrap();
    let mut out = [0u32; 10];
    decoder.decode_batch(&mut out).unwrap();
    assert_eq!(out, [2, 2, 2, 2, 2, 3, 3, 3, 3, 3]);
}

#[test]
fn scenario_d_delta_int32_round_trip() {
    let values = [100i64, 105, 110, 115, 120];
    let mut encoder = delta_bitpacked::DeltaBitPackEncoder::new();
    encoder.put(&values).unwrap();
    let bytes = encoder.finish().unwrap();
    assert_eq!(delta_bitpacked::decode(&bytes).unwrap(), values);
}

#[test]
fn scenario_e_byte_stream_split_float() {
    let values = [1.0f32, 2.0f32];
    let encoded = byte_stream_split::encode_f32(&values);
    assert_eq!(encoded, vec![0x00, 0x00, 0x00, 0x00, 0x80, 0x00, 0x3f, 0x40]);
    assert_eq!(byte_stream_split::decode_f32(&encoded, values.len()).unwrap(), values);
}

#[test]
fn scenario_f_xxhash64_is_deterministic() {
    let a = xxhash64(b"Hello, World!", 0);
    let b = xxhash64(b"Hello, World!", 0);
    assert_eq!(a, b);
    assert_eq!(xxhash64(b"", 0), 0xEF46DB3751D8E999);
}

#[test]
fn scenario_g_bloom_filter_membership_and_fpr() {
    let n = 10_000usize;
    let mut filter = BloomFilter::with_target_fpp(n, 0.01, &BloomFilterOptions::default()).unwrap();

    for i in 0..n as u64 {
        filter.insert(&i.to_le_bytes());
    }
    for i in 0..n as u64 {
        assert!(filter.check(&i.to_le_bytes()));
    }

    let trials = 100_000u64;
    let false_positives =
        (n as u64..n as u64 + trials).filter(|i| filter.check(&i.to_le_bytes())).count();
    let fpr = false_positives as f64 / trials as f64;
    assert!(fpr <= 0.02, "measured false positive rate {fpr} exceeded the accepted 2x bound");
}
