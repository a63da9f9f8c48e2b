// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hybrid RLE / bit-packed encoding, used for definition/repetition levels and dictionary
//! indices.
//!
//! A stream is a sequence of runs, each prefixed by a ULEB128 header `h`. `h & 1 == 0` is an
//! RLE run of `h >> 1` repeats of a value stored in `ceil(bit_width / 8)` little-endian bytes.
//! `h & 1 == 1` is a bit-packed run of `(h >> 1) * 8` values, stored as that many groups of 8
//! values bit-packed at `bit_width`. Bit width 0 is legal: every value is zero and no value
//! bytes follow an RLE header.

use crate::bits::{bitpack8, bitunpack8};
use crate::error::{invalid_argument, malformed, Result};
use crate::varint::{read_uleb128_u64, write_uleb128_u64};

fn byte_width(bit_width: u32) -> usize {
    ((bit_width + 7) / 8) as usize
}

/// Decodes a hybrid RLE / bit-packed stream of values at a fixed bit width.
pub struct RleDecoder<'a> {
    input: &'a [u8],
    pos: usize,
    bit_width: u32,
    is_rle: bool,
    remaining: usize,
    rle_value: u32,
    packed_buf: [u32; 8],
    packed_pos: usize,
}

impl<'a> RleDecoder<'a> {
    /// Creates a decoder over `input` at the given `bit_width` (`0..=32`).
    pub fn new(input: &'a [u8], bit_width: u32) -> Result<Self> {
        if bit_width > 32 {
            return invalid_argument("hybrid-RLE bit width exceeds 32");
        }
        Ok(RleDecoder {
            input,
            pos: 0,
            bit_width,
            is_rle: false,
            remaining: 0,
            rle_value: 0,
            packed_buf: [0; 8],
            packed_pos: 8,
        })
    }

    // Reads the next non-empty run header, leaving `self.remaining` set to the number of
    // values in the run. Empty runs (a header whose count is zero) are skipped.
    fn read_header(&mut self) -> Result<()> {
        loop {
            if self.pos >= self.input.len() {
                return crate::error::end_of_data();
            }
            let (header, n) = read_uleb128_u64(&self.input[self.pos..])?;
            self.pos += n;

            if header & 1 == 0 {
                let count = (header >> 1) as usize;
                if count == 0 {
                    continue;
                }
                let width = byte_width(self.bit_width);
                if self.input.len() < self.pos + width {
                    return malformed("truncated hybrid-RLE run value");
                }
                let mut bytes = [0u8; 4];
                bytes[..width].copy_from_slice(&self.input[self.pos..self.pos + width]);
                self.rle_value = u32::from_le_bytes(bytes);
                self.pos += width;
                self.is_rle = true;
                self.remaining = count;
            } else {
                let groups = (header >> 1) as usize;
                if groups == 0 {
                    continue;
                }
                let bytes_needed = groups * self.bit_width as usize;
                if self.input.len() < self.pos + bytes_needed {
                    return malformed("hybrid-RLE bit-packed run extends past input end");
                }
                self.is_rle = false;
                self.remaining = groups * 8;
                self.packed_pos = 8;
            }
            return Ok(());
        }
    }

    fn fetch_packed_group(&mut self) -> Result<()> {
        let width = self.bit_width as usize;
        bitunpack8(&self.input[self.pos..self.pos + width], self.bit_width, &mut self.packed_buf)?;
        self.pos += width;
        self.packed_pos = 0;
        Ok(())
    }

    /// Decodes the next value, or [`crate::error::Error::EndOfData`] at the end of the stream.
    pub fn next_value(&mut self) -> Result<u32> {
        let mut out = [0u32; 1];
        self.decode_batch(&mut out)?;
        Ok(out[0])
    }

    /// Fills `out` with `out.len()` decoded values.
    pub fn decode_batch(&mut self, out: &mut [u32]) -> Result<()> {
        let mut filled = 0;
        while filled < out.len() {
            if self.remaining == 0 {
                self.read_header()?;
            }

            let take = (out.len() - filled).min(self.remaining);
            if self.is_rle {
                out[filled..filled + take].fill(self.rle_value);
                self.remaining -= take;
                filled += take;
            } else {
                let mut left = take;
                while left > 0 {
                    if self.packed_pos == 8 {
                        self.fetch_packed_group()?;
                    }
                    let avail = 8 - self.packed_pos;
                    let n = left.min(avail);
                    out[filled..filled + n]
                        .copy_from_slice(&self.packed_buf[self.packed_pos..self.packed_pos + n]);
                    self.packed_pos += n;
                    filled += n;
                    left -= n;
                    self.remaining -= n;
                }
            }
        }
        Ok(())
    }

    /// Skips `n` values without materializing them.
    pub fn skip(&mut self, mut n: usize) -> Result<()> {
        let mut scratch = [0u32; 64];
        while n > 0 {
            let take = n.min(scratch.len());
            self.decode_batch(&mut scratch[..take])?;
            n -= take;
        }
        Ok(())
    }
}

/// Encodes values into a hybrid RLE / bit-packed stream at a fixed bit width.
///
/// Canonical heuristic: a run of 8 or more equal values is emitted as RLE; shorter runs are
/// bit-packed. This is one legal choice among many (see module docs); decoders must not depend
/// on any particular encoder's run boundaries.
pub struct RleEncoder {
    bit_width: u32,
    prev_value: Option<u32>,
    run_length: usize,
    stager: Vec<u32>,
    packed_bytes: Vec<u8>,
    packed_group_count: usize,
    out: Vec<u8>,
}

impl RleEncoder {
    /// Creates an encoder at the given `bit_width` (`0..=32`).
    pub fn new(bit_width: u32) -> Result<Self> {
        if bit_width > 32 {
            return invalid_argument("hybrid-RLE bit width exceeds 32");
        }
        Ok(RleEncoder {
            bit_width,
            prev_value: None,
            run_length: 0,
            stager: Vec::with_capacity(8),
            packed_bytes: Vec::new(),
            packed_group_count: 0,
            out: Vec::new(),
        })
    }

    /// Appends one value to the stream.
    pub fn put(&mut self, value: u32) -> Result<()> {
        if self.bit_width < 32 && value >= (1u32 << self.bit_width) {
            return invalid_argument("value does not fit in the encoder's bit width");
        }

        match self.prev_value {
            Some(prev) if prev == value => self.run_length += 1,
            Some(prev) => {
                self.flush_run(prev)?;
                self.run_length = 1;
            }
            None => self.run_length = 1,
        }
        self.prev_value = Some(value);
        Ok(())
    }

    fn flush_run(&mut self, value: u32) -> Result<()> {
        if self.run_length >= 8 {
            self.flush_bitpacked_run()?;
            self.emit_rle_run(value, self.run_length);
        } else {
            for _ in 0..self.run_length {
                self.push_bitpacked(value)?;
            }
        }
        Ok(())
    }

    fn push_bitpacked(&mut self, value: u32) -> Result<()> {
        self.stager.push(value);
        if self.stager.len() == 8 {
            let group: [u32; 8] = self.stager[..].try_into().unwrap();
            let mut buf = vec![0u8; self.bit_width as usize];
            bitpack8(&group, self.bit_width, &mut buf)?;
            self.packed_bytes.extend_from_slice(&buf);
            self.packed_group_count += 1;
            self.stager.clear();
        }
        Ok(())
    }

    fn flush_bitpacked_run(&mut self) -> Result<()> {
        if !self.stager.is_empty() {
            let mut group = [0u32; 8];
            group[..self.stager.len()].copy_from_slice(&self.stager);
            let mut buf = vec![0u8; self.bit_width as usize];
            bitpack8(&group, self.bit_width, &mut buf)?;
            self.packed_bytes.extend_from_slice(&buf);
            self.packed_group_count += 1;
            self.stager.clear();
        }

        if self.packed_group_count > 0 {
            let header = (self.packed_group_count as u64) << 1 | 1;
            write_uleb128_u64(header, &mut self.out);
            self.out.extend_from_slice(&self.packed_bytes);
            self.packed_group_count = 0;
            self.packed_bytes.clear();
        }
        Ok(())
    }

    fn emit_rle_run(&mut self, value: u32, length: usize) {
        let header = (length as u64) << 1;
        write_uleb128_u64(header, &mut self.out);
        let width = byte_width(self.bit_width);
        self.out.extend_from_slice(&value.to_le_bytes()[..width]);
    }

    /// Flushes any pending run and returns the encoded bytes.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        if let Some(value) = self.prev_value.take() {
            self.flush_run(value)?;
        }
        self.flush_bitpacked_run()?;
        Ok(self.out)
    }
}

/// Writes `bytes` prefixed by a 4-byte little-endian length, the framing used for definition
/// and repetition level streams inside a data page.
pub fn encode_length_prefixed(bytes: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(bytes);
}

/// Reads a 4-byte little-endian length prefix followed by that many bytes, returning the inner
/// slice and the total number of bytes consumed from `input`.
pub fn read_length_prefixed(input: &[u8]) -> Result<(&[u8], usize)> {
    if input.len() < 4 {
        return malformed("truncated length-prefixed hybrid-RLE stream");
    }
    let len = u32::from_le_bytes(input[..4].try_into().unwrap()) as usize;
    if input.len() < 4 + len {
        return malformed("length-prefixed hybrid-RLE stream shorter than its declared length");
    }
    Ok((&input[4..4 + len], 4 + len))
}
