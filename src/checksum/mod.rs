// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Checksum algorithms used to validate a page against its header.

mod crc32;

pub use crc32::{crc32, crc32_update, crc32c, crc32c_update};
