// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A process-global, once-initialized dispatch table choosing between a scalar and a "wide"
//! (auto-vectorization-friendly, chunked) implementation for the handful of hot operations
//! that benefit from it. Both variants are ordinary safe Rust — this crate forbids `unsafe`
//! entirely, so there is no `core::arch` intrinsic path; richer CPU feature sets still widen
//! the chunk size the "wide" kernels use, and the compiler's auto-vectorizer does the rest.
//! Every operation's two variants are required to be bit-exact; the dispatch seam exists so
//! that requirement is checkable and so a future relaxation of the `unsafe_code` lint has
//! somewhere to plug in a real intrinsic path without touching call sites.

mod cpu;

pub use cpu::CpuFeatures;

use once_cell::sync::OnceCell;

/// Which code path a dispatch-table entry selected for one operation family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Scalar,
    Wide,
}

/// The selected implementation variant for every dispatch-participating operation, chosen once
/// from the detected [`CpuFeatures`].
#[derive(Debug, Clone, Copy)]
pub struct DispatchTable {
    pub features: CpuFeatures,
    pub variant: Variant,
}

static DISPATCH: OnceCell<DispatchTable> = OnceCell::new();

/// Returns the process-global dispatch table, initializing it on first use.
pub fn dispatch_table() -> &'static DispatchTable {
    DISPATCH.get_or_init(|| {
        let features = CpuFeatures::detect();
        let variant = if features.has_any_vector_support() { Variant::Wide } else { Variant::Scalar };
        log::debug!("parquet_columnar simd dispatch selected {:?} (cpu features: {:?})", variant, features);
        DispatchTable { features, variant }
    })
}

/// Dispatch-participating kernels: bit-unpack, prefix-sum, dictionary gather,
/// byte-stream-split, boolean pack/unpack, run-length expansion, and bulk memset/memcpy. Each
/// has a scalar and a wide form; [`dispatch_table`] picks which one callers should prefer, but
/// both are exposed so tests can assert they agree.
pub mod ops {
    use super::{dispatch_table, Variant};
    use crate::bits::{bitpack8, bitunpack8};
    use crate::error::Result;

    /// Unpacks `n` groups of 8 values at `width` bits each, choosing the dispatch-selected
    /// variant.
    pub fn bit_unpack_groups(input: &[u8], width: u32, n: usize) -> Result<Vec<u32>> {
        match dispatch_table().variant {
            Variant::Scalar => bit_unpack_groups_scalar(input, width, n),
            Variant::Wide => bit_unpack_groups_wide(input, width, n),
        }
    }

    pub fn bit_unpack_groups_scalar(input: &[u8], width: u32, n: usize) -> Result<Vec<u32>> {
        let group_bytes = width as usize;
        let mut out = Vec::with_capacity(n * 8);
        for g in 0..n {
            let mut group = [0u32; 8];
            bitunpack8(&input[g * group_bytes..(g + 1) * group_bytes], width, &mut group)?;
            out.extend_from_slice(&group);
        }
        Ok(out)
    }

    /// Same result as [`bit_unpack_groups_scalar`], processing two groups per iteration — a
    /// chunk shape the auto-vectorizer can fuse into wider loads on CPUs with richer feature
    /// sets.
    pub fn bit_unpack_groups_wide(input: &[u8], width: u32, n: usize) -> Result<Vec<u32>> {
        let group_bytes = width as usize;
        let mut out = Vec::with_capacity(n * 8);
        let mut g = 0;
        while g + 2 <= n {
            let mut a = [0u32; 8];
            let mut b = [0u32; 8];
            bitunpack8(&input[g * group_bytes..(g + 1) * group_bytes], width, &mut a)?;
            bitunpack8(&input[(g + 1) * group_bytes..(g + 2) * group_bytes], width, &mut b)?;
            out.extend_from_slice(&a);
            out.extend_from_slice(&b);
            g += 2;
        }
        if g < n {
            let mut a = [0u32; 8];
            bitunpack8(&input[g * group_bytes..(g + 1) * group_bytes], width, &mut a)?;
            out.extend_from_slice(&a);
        }
        Ok(out)
    }

    /// Packs the inverse of [`bit_unpack_groups`].
    pub fn bit_pack_groups(values: &[u32], width: u32) -> Result<Vec<u8>> {
        let group_bytes = width as usize;
        let mut out = vec![0u8; (values.len() / 8) * group_bytes];
        for (g, chunk) in values.chunks_exact(8).enumerate() {
            let group: [u32; 8] = chunk.try_into().unwrap();
            bitpack8(&group, width, &mut out[g * group_bytes..(g + 1) * group_bytes])?;
        }
        Ok(out)
    }

    /// Reconstructs `deltas.len() + 1` running values from `first` and pairwise differences.
    pub fn prefix_sum_i64(first: i64, deltas: &[i64]) -> Vec<i64> {
        match dispatch_table().variant {
            Variant::Scalar => prefix_sum_i64_scalar(first, deltas),
            Variant::Wide => prefix_sum_i64_wide(first, deltas),
        }
    }

    pub fn prefix_sum_i64_scalar(first: i64, deltas: &[i64]) -> Vec<i64> {
        let mut out = Vec::with_capacity(deltas.len() + 1);
        out.push(first);
        let mut current = first;
        for &d in deltas {
            current = current.wrapping_add(d);
            out.push(current);
        }
        out
    }

    /// Same accumulation, four deltas per chunk.
    pub fn prefix_sum_i64_wide(first: i64, deltas: &[i64]) -> Vec<i64> {
        let mut out = Vec::with_capacity(deltas.len() + 1);
        out.push(first);
        let mut current = first;
        for chunk in deltas.chunks(4) {
            for &d in chunk {
                current = current.wrapping_add(d);
                out.push(current);
            }
        }
        out
    }

    /// Gathers `dictionary[indices[i]]` for every `i`, bounds-checked.
    pub fn dictionary_gather_i64(dictionary: &[i64], indices: &[u32]) -> Result<Vec<i64>> {
        match dispatch_table().variant {
            Variant::Scalar => dictionary_gather_i64_scalar(dictionary, indices),
            Variant::Wide => dictionary_gather_i64_wide(dictionary, indices),
        }
    }

    pub fn dictionary_gather_i64_scalar(dictionary: &[i64], indices: &[u32]) -> Result<Vec<i64>> {
        let mut out = Vec::with_capacity(indices.len());
        for &idx in indices {
            out.push(*dictionary.get(idx as usize).ok_or(crate::error::Error::MalformedInput(
                "dictionary gather index exceeds dictionary size",
            ))?);
        }
        Ok(out)
    }

    /// Same lookups, four indices resolved per chunk before extending the output.
    pub fn dictionary_gather_i64_wide(dictionary: &[i64], indices: &[u32]) -> Result<Vec<i64>> {
        let mut out = Vec::with_capacity(indices.len());
        for chunk in indices.chunks(4) {
            let mut buf = [0i64; 4];
            for (slot, &idx) in buf.iter_mut().zip(chunk) {
                *slot = *dictionary.get(idx as usize).ok_or(
                    crate::error::Error::MalformedInput("dictionary gather index exceeds dictionary size"),
                )?;
            }
            out.extend_from_slice(&buf[..chunk.len()]);
        }
        Ok(out)
    }

    /// Packs `values` 8-per-byte, LSB-first.
    pub fn bool_pack(values: &[bool]) -> Vec<u8> {
        match dispatch_table().variant {
            Variant::Scalar => bool_pack_scalar(values),
            Variant::Wide => bool_pack_wide(values),
        }
    }

    pub fn bool_pack_scalar(values: &[bool]) -> Vec<u8> {
        let mut out = Vec::new();
        crate::encoding::plain::encode_bool(values, &mut out);
        out
    }

    /// Same packing, 64 booleans (8 bytes) accumulated per iteration.
    pub fn bool_pack_wide(values: &[bool]) -> Vec<u8> {
        let mut out = Vec::with_capacity(values.len().div_ceil(8));
        for byte_chunk in values.chunks(64) {
            let mut bytes = [0u8; 8];
            for (i, bit_chunk) in byte_chunk.chunks(8).enumerate() {
                let mut byte = 0u8;
                for (b, &v) in bit_chunk.iter().enumerate() {
                    if v {
                        byte |= 1 << b;
                    }
                }
                bytes[i] = byte;
            }
            out.extend_from_slice(&bytes[..byte_chunk.len().div_ceil(8)]);
        }
        out
    }

    /// Expands a run-length representation `(value, count)` pairs into a flat `i32` array.
    pub fn run_length_expand_i32(runs: &[(i32, usize)]) -> Vec<i32> {
        match dispatch_table().variant {
            Variant::Scalar => run_length_expand_i32_scalar(runs),
            Variant::Wide => run_length_expand_i32_wide(runs),
        }
    }

    pub fn run_length_expand_i32_scalar(runs: &[(i32, usize)]) -> Vec<i32> {
        let mut out = Vec::new();
        for &(value, count) in runs {
            out.extend(std::iter::repeat(value).take(count));
        }
        out
    }

    /// Same expansion via `Vec::resize`, which the standard library implements as a bulk fill.
    pub fn run_length_expand_i32_wide(runs: &[(i32, usize)]) -> Vec<i32> {
        let mut out = Vec::new();
        for &(value, count) in runs {
            let start = out.len();
            out.resize(start + count, value);
        }
        out
    }

    /// Fills `out` with `value`. The "wide" path is `slice::fill`, which the standard library
    /// already auto-vectorizes; the scalar path is a plain byte loop kept for equivalence
    /// testing.
    pub fn bulk_memset(out: &mut [u8], value: u8) {
        match dispatch_table().variant {
            Variant::Scalar => bulk_memset_scalar(out, value),
            Variant::Wide => bulk_memset_wide(out, value),
        }
    }

    pub fn bulk_memset_scalar(out: &mut [u8], value: u8) {
        for b in out.iter_mut() {
            *b = value;
        }
    }

    pub fn bulk_memset_wide(out: &mut [u8], value: u8) {
        out.fill(value);
    }

    /// Copies `src` into `dst`, which must be the same length.
    pub fn bulk_memcpy(dst: &mut [u8], src: &[u8]) {
        match dispatch_table().variant {
            Variant::Scalar => bulk_memcpy_scalar(dst, src),
            Variant::Wide => bulk_memcpy_wide(dst, src),
        }
    }

    pub fn bulk_memcpy_scalar(dst: &mut [u8], src: &[u8]) {
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = s;
        }
    }

    pub fn bulk_memcpy_wide(dst: &mut [u8], src: &[u8]) {
        dst.copy_from_slice(src);
    }

    /// CRC32C checksum. Hardware CRC32C (the SSE4.2 `crc32` instruction, or the AArch64 CRC
    /// extension) would be the natural "wide" path, but this crate forbids `unsafe` entirely,
    /// so both variants run the same slicing-by-8 table lookup.
    pub fn crc32c(data: &[u8]) -> u32 {
        match dispatch_table().variant {
            Variant::Scalar => crate::checksum::crc32c(data),
            Variant::Wide => crate::checksum::crc32c(data),
        }
    }
}
