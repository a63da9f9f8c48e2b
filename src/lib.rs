// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A columnar encoding and decoding core for a Parquet-compatible storage library.
//!
//! This crate owns the byte-level codecs that sit directly on top of a Parquet page's raw
//! bytes: PLAIN, hybrid RLE/bit-packed, the three DELTA encodings, RLE_DICTIONARY,
//! BYTE_STREAM_SPLIT, the split-block Bloom filter, and the checksums used to validate a page
//! against its header. It does not know about row groups, column chunks, schemas, or
//! compression codecs; callers hand it pre-decompressed page bytes and a physical type.

pub mod bits;
pub mod bloom;
pub mod checksum;
pub mod config;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod simd;
pub mod types;
pub mod varint;

pub use config::DecodeLimits;
pub use error::{Error, Result};
pub use types::{PhysicalType, Value};
