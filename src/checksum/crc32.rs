// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CRC32 (reflected IEEE polynomial) and CRC32C (Castagnoli), both via a slicing-by-8 table
//! built once and published through a process-lifetime lazy static.
//!
//! The incremental `update` form follows the familiar zlib convention: the digest passed in
//! and returned is the *finalized* value (0 for "nothing processed yet"), internally
//! complemented before and after each call, so `update(update(0, a), b) == crc(a ++ b)`.

use once_cell::sync::Lazy;

const IEEE_POLY: u32 = 0xEDB8_8320;
const CASTAGNOLI_POLY: u32 = 0x82F6_3B78;

type SlicingTable = [[u32; 256]; 8];

fn build_tables(poly: u32) -> SlicingTable {
    let mut table = [[0u32; 256]; 8];
    for i in 0..256u32 {
        let mut crc = i;
        for _ in 0..8 {
            crc = if crc & 1 != 0 { (crc >> 1) ^ poly } else { crc >> 1 };
        }
        table[0][i as usize] = crc;
    }
    for i in 0..256usize {
        let mut crc = table[0][i];
        for slice in 1..8 {
            crc = table[0][(crc & 0xFF) as usize] ^ (crc >> 8);
            table[slice][i] = crc;
        }
    }
    table
}

static IEEE_TABLE: Lazy<SlicingTable> = Lazy::new(|| build_tables(IEEE_POLY));
static CASTAGNOLI_TABLE: Lazy<SlicingTable> = Lazy::new(|| build_tables(CASTAGNOLI_POLY));

fn update_raw(table: &SlicingTable, mut crc: u32, data: &[u8]) -> u32 {
    let mut chunks = data.chunks_exact(8);
    for chunk in &mut chunks {
        let low = u32::from_le_bytes(chunk[0..4].try_into().unwrap());
        let high = u32::from_le_bytes(chunk[4..8].try_into().unwrap());
        crc ^= low;
        crc = table[7][(crc & 0xFF) as usize]
            ^ table[6][((crc >> 8) & 0xFF) as usize]
            ^ table[5][((crc >> 16) & 0xFF) as usize]
            ^ table[4][((crc >> 24) & 0xFF) as usize]
            ^ table[3][(high & 0xFF) as usize]
            ^ table[2][((high >> 8) & 0xFF) as usize]
            ^ table[1][((high >> 16) & 0xFF) as usize]
            ^ table[0][((high >> 24) & 0xFF) as usize];
    }
    for &byte in chunks.remainder() {
        crc = table[0][((crc ^ u32::from(byte)) & 0xFF) as usize] ^ (crc >> 8);
    }
    crc
}

/// Computes the CRC32 (IEEE) digest of `data` in a single call.
pub fn crc32(data: &[u8]) -> u32 {
    update_raw(&IEEE_TABLE, !0, data) ^ !0
}

/// Continues a CRC32 (IEEE) digest: `prior` is a previously returned digest (or 0 to start).
pub fn crc32_update(prior: u32, data: &[u8]) -> u32 {
    update_raw(&IEEE_TABLE, prior ^ !0, data) ^ !0
}

/// Computes the CRC32C (Castagnoli) digest of `data` in a single call.
pub fn crc32c(data: &[u8]) -> u32 {
    update_raw(&CASTAGNOLI_TABLE, !0, data) ^ !0
}

/// Continues a CRC32C (Castagnoli) digest: `prior` is a previously returned digest (or 0 to
/// start).
pub fn crc32c_update(prior: u32, data: &[u8]) -> u32 {
    update_raw(&CASTAGNOLI_TABLE, prior ^ !0, data) ^ !0
}
