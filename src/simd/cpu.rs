// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CPU feature detection, queried once at dispatch-table initialization.

use bitflags::bitflags;

bitflags! {
    /// The subset of CPU features the dispatch table cares about. Detection is entirely
    /// safe: the standard library's `is_x86_feature_detected!`/`is_aarch64_feature_detected!`
    /// macros perform the runtime check without requiring `unsafe` at the call site.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CpuFeatures: u32 {
        const SSE42   = 1 << 0;
        const AVX2    = 1 << 1;
        const AVX512  = 1 << 2;
        const NEON    = 1 << 3;
        const SVE     = 1 << 4;
    }
}

impl CpuFeatures {
    /// Queries the running CPU's feature set. Unrecognized architectures report no features,
    /// which selects the scalar kernel path everywhere.
    pub fn detect() -> Self {
        let mut features = CpuFeatures::empty();

        #[cfg(target_arch = "x86_64")]
        {
            if std::is_x86_feature_detected!("sse4.2") {
                features |= CpuFeatures::SSE42;
            }
            if std::is_x86_feature_detected!("avx2") {
                features |= CpuFeatures::AVX2;
            }
            if std::is_x86_feature_detected!("avx512f") {
                features |= CpuFeatures::AVX512;
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            // NEON is mandatory on every AArch64 implementation.
            features |= CpuFeatures::NEON;
            if std::is_aarch64_feature_detected!("sve") {
                features |= CpuFeatures::SVE;
            }
        }

        features
    }

    /// Whether any feature richer than the scalar baseline was detected.
    pub fn has_any_vector_support(self) -> bool {
        !self.is_empty()
    }
}
