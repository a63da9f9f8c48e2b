// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A bit-granular stream writer over a mutable byte slice.
//!
//! Bits are written least-significant-bit first within each byte, mirroring
//! [`crate::bits::reader::BitReader`]. There is no equivalent writer in the teacher
//! (Symphonia only ever decodes audio), so this is authored from scratch, but keeps the same
//! 64-bit staging-buffer discipline as the reader and the reference `BitWriter` used by
//! `parquet-rs`-style encoders (`put_value`/`flush_buffer`).

use crate::error::{insufficient_output_space, Error, Result};

/// Writes individual bits, and groups of up to 64 bits, into a caller-supplied byte slice.
pub struct BitWriter<'a> {
    buf: &'a mut [u8],
    byte_pos: usize,
    staged: u64,
    n_staged: u32,
}

impl<'a> BitWriter<'a> {
    /// Creates a new `BitWriter` over `buffer`, treating its full length as capacity.
    pub fn init(buffer: &'a mut [u8]) -> Self {
        BitWriter { buf: buffer, byte_pos: 0, staged: 0, n_staged: 0 }
    }

    /// Writes a single bit, or returns [`Error::InsufficientOutputSpace`] if the buffer is full.
    #[inline(always)]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits64(bit as u64, 1)
    }

    /// Writes the low `n` bits (`0 <= n <= 32`) of `value`.
    #[inline(always)]
    pub fn write_bits(&mut self, value: u32, n: u32) -> Result<()> {
        if n > 32 {
            return Err(Error::InvalidArgument("bit width exceeds 32 for write_bits"));
        }
        self.write_bits64(u64::from(value), n)
    }

    /// Writes the low `n` bits (`0 <= n <= 64`) of `value`.
    ///
    /// The staging register only ever holds up to 7 leftover bits between calls (everything
    /// byte-aligned is drained immediately), so a single write is split into chunks that each
    /// fit within the register's remaining room.
    #[inline(always)]
    pub fn write_bits64(&mut self, value: u64, n: u32) -> Result<()> {
        if n > 64 {
            return Err(Error::InvalidArgument("bit width exceeds 64 for write_bits64"));
        }

        let mut value = if n == 64 { value } else { value & ((1u64 << n) - 1) };
        let mut remaining = n;

        while remaining > 0 {
            let room = 64 - self.n_staged;
            let take = remaining.min(room);
            let chunk = if take == 64 { value } else { value & ((1u64 << take) - 1) };

            self.staged |= chunk << self.n_staged;
            self.n_staged += take;

            value = if take == 64 { 0 } else { value >> take };
            remaining -= take;

            self.drain_whole_bytes()?;
        }

        Ok(())
    }

    #[inline(always)]
    fn drain_whole_bytes(&mut self) -> Result<()> {
        while self.n_staged >= 8 {
            if self.byte_pos >= self.buf.len() {
                return insufficient_output_space();
            }
            self.buf[self.byte_pos] = (self.staged & 0xff) as u8;
            self.byte_pos += 1;
            self.staged >>= 8;
            self.n_staged -= 8;
        }
        Ok(())
    }

    /// Flushes any partially staged byte, zero-padding its unused high bits, and returns the
    /// total number of bytes written so far.
    pub fn flush(&mut self) -> Result<usize> {
        if self.n_staged > 0 {
            if self.byte_pos >= self.buf.len() {
                return insufficient_output_space();
            }
            self.buf[self.byte_pos] = (self.staged & 0xff) as u8;
            self.byte_pos += 1;
            self.staged = 0;
            self.n_staged = 0;
        }
        Ok(self.byte_pos)
    }

    /// Returns the number of whole bytes committed to the output buffer so far (not including
    /// a not-yet-flushed partial byte).
    pub fn bytes_written(&self) -> usize {
        self.byte_pos
    }
}
