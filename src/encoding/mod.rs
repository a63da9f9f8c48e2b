// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The column encodings themselves, one module per Parquet encoding family.

pub mod byte_stream_split;
pub mod delta_bitpacked;
pub mod delta_byte_array;
pub mod dictionary;
pub mod plain;
pub mod rle;
