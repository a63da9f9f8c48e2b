// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounds on the two growable allocations the core itself owns: the dictionary builder and
//! the DELTA_BYTE_ARRAY scratch reconstruction buffer. Everything else operates on
//! caller-provided buffers and has no notion of a "limit" to configure.

use crate::error::{resource_exhausted, Result};

/// Limits applied while decoding or building a dictionary-backed page.
///
/// The defaults place no bound on either buffer; a caller embedding this core behind a
/// network-facing reader should set both to defend against a malicious page inflating memory
/// use well past the compressed page size.
#[derive(Debug, Clone, Copy)]
pub struct DecodeLimits {
    /// Maximum number of entries a dictionary may hold.
    pub max_dictionary_entries: usize,
    /// Maximum total byte size of the DELTA_BYTE_ARRAY scratch reconstruction buffer.
    pub max_scratch_bytes: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        DecodeLimits { max_dictionary_entries: usize::MAX, max_scratch_bytes: usize::MAX }
    }
}

impl DecodeLimits {
    /// No limits at all: every growable buffer is allowed to grow until the process runs out
    /// of memory.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub(crate) fn check_dictionary_entries(&self, count: usize) -> Result<()> {
        if count > self.max_dictionary_entries {
            return resource_exhausted("dictionary entry limit exceeded");
        }
        Ok(())
    }

    pub(crate) fn check_scratch_bytes(&self, count: usize) -> Result<()> {
        if count > self.max_scratch_bytes {
            return resource_exhausted("scratch reconstruction buffer limit exceeded");
        }
        Ok(())
    }
}
