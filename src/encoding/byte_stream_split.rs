// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! BYTE_STREAM_SPLIT: a byte-matrix transpose that groups every value's Nth byte together,
//! improving downstream compressibility for floating-point and fixed-length data.
//!
//! For `count` values of `width` bytes each, the encoded stream is `width` lanes of `count`
//! bytes: lane `b` holds byte `b` of every value, in value order.

use crate::error::{invalid_argument, malformed, Result};

/// Transposes `count` values of `width` bytes each (read from `input` in natural row-major
/// order) into `width` lanes of `count` bytes.
pub fn encode(input: &[u8], count: usize, width: usize) -> Result<Vec<u8>> {
    if width == 0 {
        return invalid_argument("BYTE_STREAM_SPLIT width must be positive");
    }
    if input.len() < count * width {
        return invalid_argument("BYTE_STREAM_SPLIT input is shorter than count * width");
    }

    let mut out = vec![0u8; count * width];
    for i in 0..count {
        let value = &input[i * width..i * width + width];
        for (b, &byte) in value.iter().enumerate() {
            out[b * count + i] = byte;
        }
    }
    Ok(out)
}

/// Reverses [`encode`]: reassembles `count` row-major values of `width` bytes each from
/// `width` lanes of `count` bytes.
pub fn decode(input: &[u8], count: usize, width: usize) -> Result<Vec<u8>> {
    if width == 0 {
        return invalid_argument("BYTE_STREAM_SPLIT width must be positive");
    }
    if input.len() < count * width {
        return malformed("truncated BYTE_STREAM_SPLIT stream");
    }

    let mut out = vec![0u8; count * width];
    for b in 0..width {
        let lane = &input[b * count..b * count + count];
        for (i, &byte) in lane.iter().enumerate() {
            out[i * width + b] = byte;
        }
    }
    Ok(out)
}

/// Encodes a slice of `f32` values via BYTE_STREAM_SPLIT (width 4).
pub fn encode_f32(values: &[f32]) -> Vec<u8> {
    let mut rows = Vec::with_capacity(values.len() * 4);
    for v in values {
        rows.extend_from_slice(&v.to_le_bytes());
    }
    encode(&rows, values.len(), 4).expect("row buffer is exactly count * width")
}

/// Decodes `count` `f32` values via BYTE_STREAM_SPLIT (width 4).
pub fn decode_f32(input: &[u8], count: usize) -> Result<Vec<f32>> {
    let rows = decode(input, count, 4)?;
    Ok(rows.chunks_exact(4).map(|c| f32::from_le_bytes(c.try_into().unwrap())).collect())
}

/// Encodes a slice of `f64` values via BYTE_STREAM_SPLIT (width 8).
pub fn encode_f64(values: &[f64]) -> Vec<u8> {
    let mut rows = Vec::with_capacity(values.len() * 8);
    for v in values {
        rows.extend_from_slice(&v.to_le_bytes());
    }
    encode(&rows, values.len(), 8).expect("row buffer is exactly count * width")
}

/// Decodes `count` `f64` values via BYTE_STREAM_SPLIT (width 8).
pub fn decode_f64(input: &[u8], count: usize) -> Result<Vec<f64>> {
    let rows = decode(input, count, 8)?;
    Ok(rows.chunks_exact(8).map(|c| f64::from_le_bytes(c.try_into().unwrap())).collect())
}
