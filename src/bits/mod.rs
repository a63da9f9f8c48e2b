// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bit-granular I/O primitives shared by every codec in this crate: bit counting, a
//! bit-stream reader and writer, and 8-value bit-pack/unpack kernels.

mod pack;
mod primitives;
mod reader;
mod writer;

pub use pack::{bitpack8, bitunpack8};
pub use primitives::{clz32, clz64, ctz32, minimum_bits_for, popcount32, popcount64};
pub use reader::BitReader;
pub use writer::BitWriter;
