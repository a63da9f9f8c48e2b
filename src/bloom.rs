// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Split-block Bloom filter: 32-byte blocks of 8 four-byte lanes, selected and probed with
//! xxHash64 and eight fixed salts. Matches the on-disk format real Parquet readers expect, so
//! the filter's byte array is its own wire form.

use crate::error::{invalid_argument, malformed, Result};
use crate::hash::xxhash64;

const BLOCK_BYTES: usize = 32;
const LANES_PER_BLOCK: usize = 8;

const SALT: [u32; LANES_PER_BLOCK] = [
    0x47B6_137B,
    0x4497_4D91,
    0x8824_AD5B,
    0xA2B7_289D,
    0x7054_95C7,
    0x2DF1_424B,
    0x9EFC_4947,
    0x5C6B_FB31,
];

/// Bounds applied while sizing a Bloom filter from a target false-positive probability.
#[derive(Debug, Clone, Copy, Default)]
pub struct BloomFilterOptions {
    /// Caps the filter's byte size regardless of what `(n, p)` would otherwise compute to.
    pub max_bytes: Option<usize>,
}

/// A split-block Bloom filter over arbitrary byte-string keys.
#[derive(Debug, Clone)]
pub struct BloomFilter {
    bytes: Vec<u8>,
}

impl BloomFilter {
    /// Allocates a zeroed filter of exactly `byte_len` bytes, rounded up to the nearest block
    /// and never smaller than one block.
    pub fn with_size_bytes(byte_len: usize) -> Self {
        let num_blocks = byte_len.div_ceil(BLOCK_BYTES).max(1);
        BloomFilter { bytes: vec![0u8; num_blocks * BLOCK_BYTES] }
    }

    /// Sizes a filter from a target false-positive probability `p` and expected distinct-value
    /// count `n`, honoring `options.max_bytes` if set.
    pub fn with_target_fpp(n: usize, p: f64, options: &BloomFilterOptions) -> Result<Self> {
        if n == 0 {
            return invalid_argument("Bloom filter expected distinct-value count must be positive");
        }
        if !(p > 0.0 && p < 1.0) {
            return invalid_argument("Bloom filter false-positive probability must be in (0, 1)");
        }

        let ln2 = std::f64::consts::LN_2;
        let m_bits = (-(n as f64) * p.ln() / (ln2 * ln2)).ceil();
        let mut num_blocks = ((m_bits as u64).div_ceil(256)).max(1) as usize;

        if let Some(max_bytes) = options.max_bytes {
            let max_blocks = (max_bytes / BLOCK_BYTES).max(1);
            num_blocks = num_blocks.min(max_blocks);
        }

        Ok(BloomFilter { bytes: vec![0u8; num_blocks * BLOCK_BYTES] })
    }

    /// Wraps an existing byte array as a filter, validating its length is a positive multiple
    /// of the block size.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() || bytes.len() % BLOCK_BYTES != 0 {
            return malformed("Bloom filter byte length must be a positive multiple of 32");
        }
        Ok(BloomFilter { bytes })
    }

    /// The filter's wire form.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn num_blocks(&self) -> usize {
        self.bytes.len() / BLOCK_BYTES
    }

    fn block_and_masks(&self, hash: u64) -> (usize, [u32; LANES_PER_BLOCK]) {
        let block_idx = ((hash >> 32) % self.num_blocks() as u64) as usize;
        let low = (hash & 0xFFFF_FFFF) as u32;

        let mut masks = [0u32; LANES_PER_BLOCK];
        for (i, mask) in masks.iter_mut().enumerate() {
            let product = SALT[i].wrapping_mul(low);
            *mask = 1u32 << (product >> 27);
        }
        (block_idx, masks)
    }

    /// Inserts a key's pre-computed 64-bit hash.
    pub fn insert_hash(&mut self, hash: u64) {
        let (block_idx, masks) = self.block_and_masks(hash);
        let base = block_idx * BLOCK_BYTES;
        for (lane, &mask) in masks.iter().enumerate() {
            let slot = &mut self.bytes[base + lane * 4..base + lane * 4 + 4];
            let mut word = u32::from_le_bytes(slot.try_into().unwrap());
            word |= mask;
            slot.copy_from_slice(&word.to_le_bytes());
        }
    }

    /// Checks whether a key's pre-computed 64-bit hash may be present.
    pub fn check_hash(&self, hash: u64) -> bool {
        let (block_idx, masks) = self.block_and_masks(hash);
        let base = block_idx * BLOCK_BYTES;
        masks.iter().enumerate().all(|(lane, &mask)| {
            let slot = &self.bytes[base + lane * 4..base + lane * 4 + 4];
            let word = u32::from_le_bytes(slot.try_into().unwrap());
            word & mask == mask
        })
    }

    /// Inserts a raw key, hashing it with xxHash64 seed 0.
    pub fn insert(&mut self, key: &[u8]) {
        self.insert_hash(xxhash64(key, 0));
    }

    /// Checks a raw key, hashing it with xxHash64 seed 0.
    pub fn check(&self, key: &[u8]) -> bool {
        self.check_hash(xxhash64(key, 0))
    }

    /// Bitwise-ORs `other` into `self`. Both filters must be exactly the same size.
    pub fn merge(&mut self, other: &BloomFilter) -> Result<()> {
        if self.bytes.len() != other.bytes.len() {
            return invalid_argument("Bloom filter merge requires identical filter sizes");
        }
        for (a, b) in self.bytes.iter_mut().zip(other.bytes.iter()) {
            *a |= b;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_seed_scenario_g_membership_and_false_positive_rate() {
        let n = 10_000;
        let mut filter =
            BloomFilter::with_target_fpp(n, 0.01, &BloomFilterOptions::default()).unwrap();

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
        assert!(fpr <= 0.02, "false positive rate {fpr} exceeded twice the configured 0.01");
    }

    #[test]
    fn verify_merge_rejects_mismatched_sizes() {
        let mut a = BloomFilter::with_size_bytes(32);
        let b = BloomFilter::with_size_bytes(64);
        assert!(a.merge(&b).is_err());
    }

    #[test]
    fn verify_merge_is_union_of_memberships() {
        let mut a = BloomFilter::with_size_bytes(1024);
        let mut b = BloomFilter::with_size_bytes(1024);
        a.insert(b"alpha");
        b.insert(b"beta");
        a.merge(&b).unwrap();
        assert!(a.check(b"alpha"));
        assert!(a.check(b"beta"));
    }

    #[test]
    fn verify_from_bytes_rejects_non_block_multiple() {
        assert!(BloomFilter::from_bytes(vec![0u8; 31]).is_err());
        assert!(BloomFilter::from_bytes(vec![]).is_err());
        assert!(BloomFilter::from_bytes(vec![0u8; 32]).is_ok());
    }

    #[test]
    fn verify_with_size_bytes_rounds_up_to_a_block() {
        assert_eq!(BloomFilter::with_size_bytes(1).as_bytes().len(), 32);
        assert_eq!(BloomFilter::with_size_bytes(33).as_bytes().len(), 64);
        assert_eq!(BloomFilter::with_size_bytes(0).as_bytes().len(), 32);
    }

    #[test]
    fn verify_target_fpp_rejects_invalid_parameters() {
        assert!(BloomFilter::with_target_fpp(0, 0.01, &BloomFilterOptions::default()).is_err());
        assert!(BloomFilter::with_target_fpp(10, 0.0, &BloomFilterOptions::default()).is_err());
        assert!(BloomFilter::with_target_fpp(10, 1.0, &BloomFilterOptions::default()).is_err());
    }

    #[test]
    fn verify_max_bytes_cap_is_honored() {
        let options = BloomFilterOptions { max_bytes: Some(64) };
        let filter = BloomFilter::with_target_fpp(10_000, 0.01, &options).unwrap();
        assert_eq!(filter.as_bytes().len(), 64);
    }
}
