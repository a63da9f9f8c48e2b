// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The fixed set of Parquet physical types every codec in this crate is polymorphic over.

/// A Parquet physical type. `FixedLenByteArray` carries its configured byte length, since the
/// core never reads it from a side channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalType {
    Boolean,
    Int32,
    Int64,
    Int96,
    Float,
    Double,
    ByteArray,
    FixedLenByteArray(u32),
}

impl PhysicalType {
    /// The fixed on-disk width in bytes for types whose width does not depend on the value
    /// (everything but `ByteArray`).
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            PhysicalType::Boolean => None,
            PhysicalType::Int32 | PhysicalType::Float => Some(4),
            PhysicalType::Int64 | PhysicalType::Double => Some(8),
            PhysicalType::Int96 => Some(12),
            PhysicalType::ByteArray => None,
            PhysicalType::FixedLenByteArray(len) => Some(len as usize),
        }
    }
}

/// A decoded byte-array value that borrows its bytes from the page buffer (PLAIN,
/// DELTA_LENGTH_BYTE_ARRAY) or from a scratch reconstruction buffer owned by the caller
/// (DELTA_BYTE_ARRAY). It never copies.
pub type Value<'a> = &'a [u8];
