// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! xxHash64: the published 64-bit variant, used with seed 0 for every Bloom filter insertion.

const PRIME_1: u64 = 0x9E3779B185EBCA87;
const PRIME_2: u64 = 0xC2B2AE3D27D4EB4F;
const PRIME_3: u64 = 0x165667B19E3779F9;
const PRIME_4: u64 = 0x85EBCA77C2B2AE63;
const PRIME_5: u64 = 0x27D4EB2F165667C5;

#[inline(always)]
fn round(acc: u64, input: u64) -> u64 {
    let acc = acc.wrapping_add(input.wrapping_mul(PRIME_2));
    let acc = acc.rotate_left(31);
    acc.wrapping_mul(PRIME_1)
}

#[inline(always)]
fn merge_round(acc: u64, val: u64) -> u64 {
    let val = round(0, val);
    let acc = acc ^ val;
    acc.wrapping_mul(PRIME_1).wrapping_add(PRIME_4)
}

#[inline(always)]
fn avalanche(mut h: u64) -> u64 {
    h ^= h >> 33;
    h = h.wrapping_mul(PRIME_2);
    h ^= h >> 29;
    h = h.wrapping_mul(PRIME_3);
    h ^= h >> 32;
    h
}

/// Computes the xxHash64 digest of `input` with the given `seed`.
pub fn hash(input: &[u8], seed: u64) -> u64 {
    let len = input.len();
    let mut pos = 0usize;
    let mut h64;

    if len >= 32 {
        let mut v1 = seed.wrapping_add(PRIME_1).wrapping_add(PRIME_2);
        let mut v2 = seed.wrapping_add(PRIME_2);
        let mut v3 = seed;
        let mut v4 = seed.wrapping_sub(PRIME_1);

        while pos + 32 <= len {
            v1 = round(v1, read_u64_le(&input[pos..pos + 8]));
            v2 = round(v2, read_u64_le(&input[pos + 8..pos + 16]));
            v3 = round(v3, read_u64_le(&input[pos + 16..pos + 24]));
            v4 = round(v4, read_u64_le(&input[pos + 24..pos + 32]));
            pos += 32;
        }

        h64 = v1.rotate_left(1)
            .wrapping_add(v2.rotate_left(7))
            .wrapping_add(v3.rotate_left(12))
            .wrapping_add(v4.rotate_left(18));
        h64 = merge_round(h64, v1);
        h64 = merge_round(h64, v2);
        h64 = merge_round(h64, v3);
        h64 = merge_round(h64, v4);
    } else {
        h64 = seed.wrapping_add(PRIME_5);
    }

    h64 = h64.wrapping_add(len as u64);

    while pos + 8 <= len {
        let k1 = round(0, read_u64_le(&input[pos..pos + 8]));
        h64 ^= k1;
        h64 = h64.rotate_left(27).wrapping_mul(PRIME_1).wrapping_add(PRIME_4);
        pos += 8;
    }

    if pos + 4 <= len {
        h64 ^= u64::from(read_u32_le(&input[pos..pos + 4])).wrapping_mul(PRIME_1);
        h64 = h64.rotate_left(23).wrapping_mul(PRIME_2).wrapping_add(PRIME_3);
        pos += 4;
    }

    while pos < len {
        h64 ^= u64::from(input[pos]).wrapping_mul(PRIME_5);
        h64 = h64.rotate_left(11).wrapping_mul(PRIME_1);
        pos += 1;
    }

    avalanche(h64)
}

#[inline(always)]
fn read_u64_le(bytes: &[u8]) -> u64 {
    u64::from_le_bytes(bytes.try_into().unwrap())
}

#[inline(always)]
fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes(bytes.try_into().unwrap())
}
