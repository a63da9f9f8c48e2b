// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bit-pack kernels: pack/unpack groups of 8 unsigned values at a fixed bit width.
//!
//! For 8 values the output is always exactly `width` bytes (`8 * width` bits). Widths
//! `1..=8` fit entirely inside one 64-bit accumulator (`8 values * 8 bits = 64 bits`), so
//! they share one fast, branch-free routine instead of the generic bit-at-a-time path.
//! Width 16 is a plain little-endian `u16` transposition via `bytemuck` — no bit packing is
//! needed at all.
//! Widths outside those fast paths fall back to [`BitWriter`]/[`BitReader`], which remain
//! bit-exact with the fast paths by construction (same LSB-first discipline).

use crate::bits::reader::BitReader;
use crate::bits::writer::BitWriter;
use crate::error::{Error, Result};

/// Packs eight unsigned values, each required to fit in `width` bits, into `width` bytes.
pub fn bitpack8(values: &[u32; 8], width: u32, out: &mut [u8]) -> Result<()> {
    if width > 32 {
        return Err(Error::InvalidArgument("bit-pack width exceeds 32"));
    }
    if out.len() != width as usize {
        return Err(Error::InvalidArgument("bit-pack output length must equal the bit width"));
    }
    for &v in values {
        if width < 32 && v >= (1u32 << width) {
            return Err(Error::InvalidArgument("value does not fit in the requested bit width"));
        }
    }

    match width {
        0 => Ok(()),
        1..=8 => {
            bitpack8_narrow(values, width, out);
            Ok(())
        }
        16 => {
            bitpack8_u16(values, out);
            Ok(())
        }
        _ => bitpack8_generic(values, width, out),
    }
}

/// Unpacks eight unsigned values from `width` bytes produced by [`bitpack8`].
pub fn bitunpack8(input: &[u8], width: u32, values: &mut [u32; 8]) -> Result<()> {
    if width > 32 {
        return Err(Error::InvalidArgument("bit-pack width exceeds 32"));
    }
    if input.len() != width as usize {
        return Err(Error::InvalidArgument("bit-unpack input length must equal the bit width"));
    }

    match width {
        0 => {
            *values = [0; 8];
            Ok(())
        }
        1..=8 => {
            bitunpack8_narrow(input, width, values);
            Ok(())
        }
        16 => {
            bitunpack8_u16(input, values);
            Ok(())
        }
        _ => bitunpack8_generic(input, width, values),
    }
}

#[inline]
fn bitpack8_narrow(values: &[u32; 8], width: u32, out: &mut [u8]) {
    let mut acc = 0u64;
    for (i, &v) in values.iter().enumerate() {
        acc |= u64::from(v) << (i as u32 * width);
    }
    out.copy_from_slice(&acc.to_le_bytes()[..width as usize]);
}

#[inline]
fn bitunpack8_narrow(input: &[u8], width: u32, values: &mut [u32; 8]) {
    let mut buf = [0u8; 8];
    buf[..input.len()].copy_from_slice(input);
    let acc = u64::from_le_bytes(buf);
    let mask = (1u64 << width) - 1;
    for (i, v) in values.iter_mut().enumerate() {
        *v = ((acc >> (i as u32 * width)) & mask) as u32;
    }
}

#[inline]
fn bitpack8_u16(values: &[u32; 8], out: &mut [u8]) {
    for (i, &v) in values.iter().enumerate() {
        let word = (v as u16).to_le();
        out[i * 2..i * 2 + 2].copy_from_slice(bytemuck::bytes_of(&word));
    }
}

#[inline]
fn bitunpack8_u16(input: &[u8], values: &mut [u32; 8]) {
    for (i, v) in values.iter_mut().enumerate() {
        let word: u16 = bytemuck::pod_read_unaligned(&input[i * 2..i * 2 + 2]);
        *v = u32::from(u16::from_le(word));
    }
}

fn bitpack8_generic(values: &[u32; 8], width: u32, out: &mut [u8]) -> Result<()> {
    let mut w = BitWriter::init(out);
    for &v in values {
        w.write_bits(v, width)?;
    }
    w.flush()?;
    Ok(())
}

fn bitunpack8_generic(input: &[u8], width: u32, values: &mut [u32; 8]) -> Result<()> {
    let mut r = BitReader::init(input);
    for v in values.iter_mut() {
        *v = r.read_bits(width)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_width_zero_is_all_zero() {
        let values = [5u32; 8];
        let mut out = [0u8; 0];
        assert!(bitpack8(&values, 0, &mut out).is_err());
        // width 0 with correctly-sized (empty) buffer and all-zero values is legal.
        let zeros = [0u32; 8];
        let mut out: [u8; 0] = [];
        bitpack8(&zeros, 0, &mut out).unwrap();
        let mut values = [7u32; 8];
        bitunpack8(&out, 0, &mut values).unwrap();
        assert_eq!(values, [0u32; 8]);
    }

    #[test]
    fn verify_narrow_widths_round_trip_and_match_generic() {
        for width in 1..=8u32 {
            let max = if width == 32 { u32::MAX } else { (1u32 << width) - 1 };
            let values: [u32; 8] =
                std::array::from_fn(|i| (i as u32 * 7 + 3).min(max));

            let mut fast = vec![0u8; width as usize];
            bitpack8(&values, width, &mut fast).unwrap();

            let mut generic = vec![0u8; width as usize];
            bitpack8_generic(&values, width, &mut generic).unwrap();

            assert_eq!(fast, generic, "width {width} mismatch between fast and generic packers");

            let mut unpacked = [0u32; 8];
            bitunpack8(&fast, width, &mut unpacked).unwrap();
            assert_eq!(unpacked, values);
        }
    }

    #[test]
    fn verify_width_16_round_trip() {
        let values: [u32; 8] = [0, 1, 256, 65535, 1000, 2000, 3000, 4000];
        let mut out = [0u8; 16];
        bitpack8(&values, 16, &mut out).unwrap();
        let mut back = [0u32; 8];
        bitunpack8(&out, 16, &mut back).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn verify_generic_fallback_wide_width() {
        let values: [u32; 8] = [0, 1, 2, 3, 4, 5, 6, 0x1fff_ffff];
        let width = 29;
        let mut out = vec![0u8; width as usize];
        bitpack8(&values, width, &mut out).unwrap();
        let mut back = [0u32; 8];
        bitunpack8(&out, width, &mut back).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn verify_value_out_of_range_rejected() {
        let values: [u32; 8] = [0, 0, 0, 0, 0, 0, 0, 4];
        let mut out = [0u8; 2];
        assert!(bitpack8(&values, 2, &mut out).is_err());
    }
}
