// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DELTA_BINARY_PACKED: blockwise pairwise differences, bit-packed minus a per-block minimum.
//!
//! A stream is a header (`block_size`, `miniblocks_per_block`, `total_value_count`,
//! `first_value`, all ULEB128 and the value zigzag-signed) followed by blocks. Each block
//! holds a zigzag `min_delta`, one width byte per miniblock, then each miniblock's
//! `value - min_delta` bit-packed at its own width, padded with zero to the miniblock's full
//! value count. Deltas are computed in 64-bit arithmetic so INT32 extremes never overflow.

use crate::bits::{minimum_bits_for, BitReader, BitWriter};
use crate::error::{malformed, Result};
use crate::varint::{read_uleb128_u64, write_uleb128_u64, zigzag_decode_64, zigzag_encode_64};

const BLOCK_SIZE: usize = 128;
const MINIBLOCKS_PER_BLOCK: usize = 4;
const MINI_BLOCK_SIZE: usize = BLOCK_SIZE / MINIBLOCKS_PER_BLOCK;

/// Encodes a stream of signed 64-bit values as DELTA_BINARY_PACKED.
pub struct DeltaBitPackEncoder {
    total_values: usize,
    first_value: i64,
    current_value: i64,
    values_in_block: usize,
    deltas: [i64; BLOCK_SIZE],
    body: Vec<u8>,
}

impl DeltaBitPackEncoder {
    pub fn new() -> Self {
        DeltaBitPackEncoder {
            total_values: 0,
            first_value: 0,
            current_value: 0,
            values_in_block: 0,
            deltas: [0; BLOCK_SIZE],
            body: Vec::new(),
        }
    }

    /// Appends a batch of values, buffering them into 128-value blocks.
    pub fn put(&mut self, values: &[i64]) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }

        let mut idx = 0;
        if self.total_values == 0 {
            self.first_value = values[0];
            self.current_value = values[0];
            idx = 1;
        }
        self.total_values += values.len();

        while idx < values.len() {
            let v = values[idx];
            self.deltas[self.values_in_block] = v.wrapping_sub(self.current_value);
            self.current_value = v;
            idx += 1;
            self.values_in_block += 1;
            if self.values_in_block == BLOCK_SIZE {
                self.flush_block()?;
            }
        }
        Ok(())
    }

    fn flush_block(&mut self) -> Result<()> {
        if self.values_in_block == 0 {
            return Ok(());
        }

        let min_delta = self.deltas[..self.values_in_block].iter().copied().min().unwrap();
        write_uleb128_u64(zigzag_encode_64(min_delta), &mut self.body);

        let widths_pos = self.body.len();
        self.body.resize(widths_pos + MINIBLOCKS_PER_BLOCK, 0);

        for mb in 0..MINIBLOCKS_PER_BLOCK {
            let start = mb * MINI_BLOCK_SIZE;
            let n = self.values_in_block.saturating_sub(start).min(MINI_BLOCK_SIZE);

            let mut adjusted = [0u64; MINI_BLOCK_SIZE];
            let mut max_adjusted = 0u64;
            for (j, slot) in adjusted.iter_mut().enumerate().take(n) {
                let adj = (self.deltas[start + j] as i128 - min_delta as i128) as u64;
                *slot = adj;
                max_adjusted = max_adjusted.max(adj);
            }

            let width = minimum_bits_for(max_adjusted);
            self.body[widths_pos + mb] = width as u8;

            if width > 0 {
                let packed_bytes = (MINI_BLOCK_SIZE * width as usize + 7) / 8;
                let mut buf = vec![0u8; packed_bytes];
                let mut w = BitWriter::init(&mut buf);
                for &a in &adjusted {
                    w.write_bits64(a, width)?;
                }
                w.flush()?;
                self.body.extend_from_slice(&buf);
            }
        }

        self.values_in_block = 0;
        Ok(())
    }

    /// Flushes the final partial block and returns the full encoded stream (header included).
    pub fn finish(mut self) -> Result<Vec<u8>> {
        self.flush_block()?;

        let mut header = Vec::new();
        write_uleb128_u64(BLOCK_SIZE as u64, &mut header);
        write_uleb128_u64(MINIBLOCKS_PER_BLOCK as u64, &mut header);
        write_uleb128_u64(self.total_values as u64, &mut header);
        write_uleb128_u64(zigzag_encode_64(self.first_value), &mut header);
        header.extend_from_slice(&self.body);
        Ok(header)
    }
}

impl Default for DeltaBitPackEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes a DELTA_BINARY_PACKED stream, honoring whatever `block_size` /
/// `miniblocks_per_block` its header declares (not necessarily this module's own encoder
/// constants).
pub fn decode(input: &[u8]) -> Result<Vec<i64>> {
    let (values, _) = decode_with_len(input)?;
    Ok(values)
}

/// Like [`decode`], but also returns the number of bytes consumed from the front of `input` —
/// the length of the encoded stream itself, for callers that concatenate more data after it
/// (DELTA_LENGTH_BYTE_ARRAY, DELTA_BYTE_ARRAY).
pub fn decode_with_len(input: &[u8]) -> Result<(Vec<i64>, usize)> {
    let mut pos = 0;

    let (block_size, n) = read_uleb128_u64(&input[pos..])?;
    pos += n;
    let (miniblocks_per_block, n) = read_uleb128_u64(&input[pos..])?;
    pos += n;
    let (total_value_count, n) = read_uleb128_u64(&input[pos..])?;
    pos += n;
    let (first_value_zz, n) = read_uleb128_u64(&input[pos..])?;
    pos += n;

    if block_size == 0 || miniblocks_per_block == 0 {
        return malformed("DELTA header declares a zero block size or miniblock count");
    }
    let block_size = block_size as usize;
    let miniblocks_per_block = miniblocks_per_block as usize;
    if block_size % miniblocks_per_block != 0 {
        return malformed("DELTA block size is not a multiple of the miniblock count");
    }
    let mini_block_size = block_size / miniblocks_per_block;
    let total_value_count = total_value_count as usize;

    // `total_value_count` is an attacker-controlled header field; do not let it drive an
    // upfront allocation before any of the input bytes it claims to need have been checked.
    // A value per byte is an upper bound on what the remaining input could actually supply.
    let reserve_hint = total_value_count.min(input.len().saturating_add(1));
    let mut values = Vec::with_capacity(reserve_hint);
    if total_value_count == 0 {
        return Ok((values, pos));
    }

    let first_value = zigzag_decode_64(first_value_zz);
    values.push(first_value);
    let mut current = first_value;

    while values.len() < total_value_count {
        let (min_delta_zz, n) = read_uleb128_u64(&input[pos..])?;
        pos += n;
        let min_delta = zigzag_decode_64(min_delta_zz);

        if input.len() < pos + miniblocks_per_block {
            return malformed("truncated DELTA miniblock width table");
        }
        let widths = &input[pos..pos + miniblocks_per_block];
        pos += miniblocks_per_block;

        let values_in_this_block = (total_value_count - values.len()).min(block_size);

        for (mb, &width) in widths.iter().enumerate() {
            let width = width as u32;
            if width > 64 {
                return malformed("DELTA miniblock width exceeds 64 bits");
            }
            let start = mb * mini_block_size;
            let n_here = values_in_this_block.saturating_sub(start).min(mini_block_size);

            if width == 0 {
                for _ in 0..n_here {
                    current = current.wrapping_add(min_delta);
                    values.push(current);
                }
                continue;
            }

            let packed_bytes = (mini_block_size * width as usize + 7) / 8;
            if input.len() < pos + packed_bytes {
                return malformed("DELTA miniblock extends past input end");
            }
            let mut r = BitReader::init(&input[pos..pos + packed_bytes]);
            pos += packed_bytes;

            for j in 0..mini_block_size {
                let adjusted = r.read_bits64(width)?;
                if j < n_here {
                    let delta = (adjusted as i128 + min_delta as i128) as i64;
                    current = current.wrapping_add(delta);
                    values.push(current);
                }
            }
        }
    }

    Ok((values, pos))
}
