// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `error` module defines the common error type for all codecs in this crate.

use std::fmt;
use std::result;

/// `Error` enumerates every way a codec in this crate can fail.
///
/// The variant names mirror the abstract error kinds from the format's invariant
/// documentation rather than any particular underlying cause, so that callers can match on
/// them without needing to know which codec raised them.
#[derive(Debug)]
pub enum Error {
    /// A null or zero-sized required buffer, an out-of-range bit width, or a type mismatch
    /// between the requested physical type and the codec's capability.
    InvalidArgument(&'static str),
    /// An encode requires more bytes than the caller-supplied output capacity.
    InsufficientOutputSpace,
    /// The decoder reached the documented value count cleanly. Not a bug.
    EndOfData,
    /// The input stream is internally inconsistent: a truncated varint, a bit-packed run
    /// whose bytes run past the input end, a prefix length exceeding the previous value, a
    /// dictionary index beyond the dictionary size, a Bloom filter size that is not a block
    /// multiple, a delta header with a zero block size, or an RLE run claiming a length that
    /// would exceed the remaining bytes.
    MalformedInput(&'static str),
    /// A dictionary or reconstruction buffer could not grow to hold the requested value.
    ResourceExhausted(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            Error::InsufficientOutputSpace => write!(f, "insufficient output space"),
            Error::EndOfData => write!(f, "end of data"),
            Error::MalformedInput(msg) => write!(f, "malformed input: {}", msg),
            Error::ResourceExhausted(msg) => write!(f, "resource exhausted: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

/// Convenience function to create an invalid-argument error.
pub fn invalid_argument<T>(msg: &'static str) -> Result<T> {
    Err(Error::InvalidArgument(msg))
}

/// Convenience function to create an insufficient-output-space error.
pub fn insufficient_output_space<T>() -> Result<T> {
    Err(Error::InsufficientOutputSpace)
}

/// Convenience function to create an end-of-data error.
pub fn end_of_data<T>() -> Result<T> {
    Err(Error::EndOfData)
}

/// Convenience function to create a malformed-input error.
pub fn malformed<T>(msg: &'static str) -> Result<T> {
    Err(Error::MalformedInput(msg))
}

/// Convenience function to create a resource-exhausted error.
pub fn resource_exhausted<T>(msg: &'static str) -> Result<T> {
    Err(Error::ResourceExhausted(msg))
}
