// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RLE_DICTIONARY encoding: a dense value dictionary plus a hybrid-RLE stream of indices.
//!
//! The dictionary maps value bytes to a dense insertion-order index via a hash table; wire
//! output never depends on the table's internal hash or collision strategy, only on insertion
//! order, so [`hashbrown::HashMap`] (this crate's existing hash-table dependency) stands in for
//! the hand-rolled chained table a C++ implementation would use. The bucket hash itself is
//! FNV-1a over the value's raw bytes, matching the Parquet reference implementation's choice
//! of hash function.

use std::hash::{BuildHasherDefault, Hasher};

use hashbrown::HashMap;

use crate::bits::minimum_bits_for;
use crate::config::DecodeLimits;
use crate::encoding::rle::{RleDecoder, RleEncoder};
use crate::error::{malformed, Result};
use crate::types::Value;

#[derive(Default)]
struct Fnv1a(u64);

impl Hasher for Fnv1a {
    fn write(&mut self, bytes: &[u8]) {
        let mut hash = if self.0 == 0 { 0xcbf2_9ce4_8422_2325 } else { self.0 };
        for &b in bytes {
            hash ^= u64::from(b);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        self.0 = hash;
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

type Fnv1aMap = HashMap<Vec<u8>, u32, BuildHasherDefault<Fnv1a>>;

/// Whether dictionary values carry a PLAIN length prefix (BYTE_ARRAY) or not (every other
/// physical type, where each entry is already a fixed number of bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Fixed,
    Variable,
}

/// Builds a dictionary from a stream of raw value bytes, assigning each unique value a dense
/// insertion-order index.
pub struct DictionaryBuilder {
    kind: ValueKind,
    index_of: Fnv1aMap,
    unique_values: Vec<Vec<u8>>,
    indices: Vec<u32>,
}

impl DictionaryBuilder {
    pub fn new(kind: ValueKind) -> Self {
        DictionaryBuilder {
            kind,
            index_of: Fnv1aMap::default(),
            unique_values: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Inserts one value, returning its dictionary index (existing or newly assigned).
    pub fn insert(&mut self, value: &[u8], limits: &DecodeLimits) -> Result<u32> {
        if let Some(&idx) = self.index_of.get(value) {
            self.indices.push(idx);
            return Ok(idx);
        }

        limits.check_dictionary_entries(self.unique_values.len() + 1)?;
        let idx = self.unique_values.len() as u32;
        self.unique_values.push(value.to_vec());
        self.index_of.insert(value.to_vec(), idx);
        self.indices.push(idx);
        Ok(idx)
    }

    /// The number of unique values observed so far.
    pub fn num_entries(&self) -> usize {
        self.unique_values.len()
    }

    /// The buffered index for every value passed to [`Self::insert`] so far, in input order.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Renders the dictionary page: unique values, PLAIN-encoded, in insertion order.
    pub fn write_dictionary_page(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for v in &self.unique_values {
            if self.kind == ValueKind::Variable {
                out.extend_from_slice(&(v.len() as u32).to_le_bytes());
            }
            out.extend_from_slice(v);
        }
        out
    }

    /// Renders the indices page: a leading bit-width byte followed by a hybrid-RLE stream of
    /// `self.indices()` at that width.
    pub fn write_indices_page(&self) -> Result<Vec<u8>> {
        let width = index_bit_width(self.unique_values.len());

        let mut encoder = RleEncoder::new(width)?;
        for &idx in &self.indices {
            encoder.put(idx)?;
        }

        let mut out = vec![width as u8];
        out.extend_from_slice(&encoder.finish()?);
        Ok(out)
    }
}

fn index_bit_width(num_entries: usize) -> u32 {
    if num_entries == 0 {
        return 1;
    }
    minimum_bits_for((num_entries - 1) as u64).max(1)
}

/// Decodes an indices page (leading bit-width byte, then hybrid-RLE) into `count` indices.
pub fn decode_indices(input: &[u8], count: usize) -> Result<Vec<u32>> {
    if input.is_empty() {
        return malformed("empty RLE_DICTIONARY indices page");
    }
    let bit_width = u32::from(input[0]);
    if bit_width > 32 {
        return malformed("RLE_DICTIONARY bit width exceeds 32");
    }

    let mut decoder = RleDecoder::new(&input[1..], bit_width)?;
    let mut indices = vec![0u32; count];
    decoder.decode_batch(&mut indices)?;
    Ok(indices)
}

/// Looks up each index in `dictionary`, borrowing the matching value.
pub fn gather<'a>(dictionary: &[Value<'a>], indices: &[u32]) -> Result<Vec<Value<'a>>> {
    indices
        .iter()
        .map(|&idx| {
            dictionary
                .get(idx as usize)
                .copied()
                .ok_or(())
                .or_else(|_| malformed("RLE_DICTIONARY index exceeds the dictionary size"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_dictionary_uniqueness_and_index_mapping() {
        let xs: Vec<&[u8]> = vec![b"cat", b"dog", b"cat", b"bird", b"dog", b"cat"];
        let limits = DecodeLimits::unbounded();

        let mut builder = DictionaryBuilder::new(ValueKind::Variable);
        for &v in &xs {
            builder.insert(v, &limits).unwrap();
        }

        assert_eq!(builder.num_entries(), 3);

        let dict_page = builder.write_dictionary_page();
        let dict_values = crate::encoding::plain::decode_byte_array(&dict_page, 3).unwrap();

        for (i, &v) in xs.iter().enumerate() {
            let idx = builder.indices()[i];
            assert_eq!(dict_values[idx as usize], v);
        }
    }

    #[test]
    fn verify_indices_round_trip_through_hybrid_rle() {
        let xs: Vec<&[u8]> = (0..50).map(|i| if i % 3 == 0 { &b"a"[..] } else { &b"b"[..] }).collect();
        let limits = DecodeLimits::unbounded();

        let mut builder = DictionaryBuilder::new(ValueKind::Variable);
        for &v in &xs {
            builder.insert(v, &limits).unwrap();
        }

        let indices_page = builder.write_indices_page().unwrap();
        let decoded_indices = decode_indices(&indices_page, xs.len()).unwrap();
        assert_eq!(decoded_indices, builder.indices());

        let dict_page = builder.write_dictionary_page();
        let dict_values = crate::encoding::plain::decode_byte_array(&dict_page, builder.num_entries()).unwrap();
        let gathered = gather(&dict_values, &decoded_indices).unwrap();
        assert_eq!(gathered, xs);
    }

    #[test]
    fn verify_fixed_width_dictionary_uses_no_length_prefix() {
        let limits = DecodeLimits::unbounded();
        let mut builder = DictionaryBuilder::new(ValueKind::Fixed);
        builder.insert(&1i32.to_le_bytes(), &limits).unwrap();
        builder.insert(&2i32.to_le_bytes(), &limits).unwrap();
        builder.insert(&1i32.to_le_bytes(), &limits).unwrap();

        let page = builder.write_dictionary_page();
        assert_eq!(page.len(), 8);
        assert_eq!(&page[0..4], &1i32.to_le_bytes());
        assert_eq!(&page[4..8], &2i32.to_le_bytes());
    }

    #[test]
    fn verify_out_of_range_index_is_malformed() {
        let dict: Vec<Value<'_>> = vec![b"only"];
        assert!(gather(&dict, &[0, 1]).is_err());
    }

    #[test]
    fn verify_dictionary_entry_limit_is_enforced() {
        let limits = DecodeLimits { max_dictionary_entries: 1, max_scratch_bytes: usize::MAX };
        let mut builder = DictionaryBuilder::new(ValueKind::Variable);
        builder.insert(b"a", &limits).unwrap();
        assert!(builder.insert(b"b", &limits).is_err());
    }
}
