// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DELTA_LENGTH_BYTE_ARRAY and DELTA_BYTE_ARRAY: incremental and prefix-shared string
//! encodings, both layered over [`crate::encoding::delta_bitpacked`].
//!
//! DELTA_LENGTH_BYTE_ARRAY stores a delta-integer stream of lengths followed by the
//! concatenated raw bytes. DELTA_BYTE_ARRAY additionally exploits sortedness: each value is
//! split into a prefix shared with its predecessor and a suffix, with the prefix lengths and
//! suffix lengths each delta-encoded and the suffix bytes concatenated.

use crate::config::DecodeLimits;
use crate::encoding::delta_bitpacked::{self, DeltaBitPackEncoder};
use crate::error::{malformed, Result};
use crate::types::Value;

/// Encodes `values` as a delta-integer length stream followed by the concatenated bytes.
pub fn encode_delta_length_byte_array(values: &[&[u8]]) -> Result<Vec<u8>> {
    let lengths: Vec<i64> = values.iter().map(|v| v.len() as i64).collect();
    let mut length_encoder = DeltaBitPackEncoder::new();
    length_encoder.put(&lengths)?;

    let mut out = length_encoder.finish()?;
    for &v in values {
        out.extend_from_slice(v);
    }
    Ok(out)
}

/// Decodes `count` values, borrowing each payload from `input`.
pub fn decode_delta_length_byte_array(input: &[u8], count: usize) -> Result<Vec<Value<'_>>> {
    let (lengths, consumed) = delta_bitpacked::decode_with_len(input)?;
    if lengths.len() != count {
        return malformed("DELTA_LENGTH_BYTE_ARRAY length count does not match the expected count");
    }

    let mut values = Vec::with_capacity(count);
    let mut pos = consumed;
    for len in lengths {
        if len < 0 {
            return malformed("DELTA_LENGTH_BYTE_ARRAY length is negative");
        }
        let len = len as usize;
        if input.len() < pos + len {
            return malformed("DELTA_LENGTH_BYTE_ARRAY payload is truncated");
        }
        values.push(&input[pos..pos + len]);
        pos += len;
    }
    Ok(values)
}

/// Encodes `values` as prefix-shared DELTA_BYTE_ARRAY: delta-encoded prefix lengths, then
/// delta-length-encoded suffixes.
pub fn encode_delta_byte_array(values: &[&[u8]]) -> Result<Vec<u8>> {
    let mut prefix_lengths = Vec::with_capacity(values.len());
    let mut suffixes: Vec<&[u8]> = Vec::with_capacity(values.len());
    let mut previous: &[u8] = &[];

    for &v in values {
        let max_common = previous.len().min(v.len());
        let mut match_len = 0;
        while match_len < max_common && previous[match_len] == v[match_len] {
            match_len += 1;
        }
        prefix_lengths.push(match_len as i64);
        suffixes.push(&v[match_len..]);
        previous = v;
    }

    let mut prefix_encoder = DeltaBitPackEncoder::new();
    prefix_encoder.put(&prefix_lengths)?;
    let mut out = prefix_encoder.finish()?;
    out.extend_from_slice(&encode_delta_length_byte_array(&suffixes)?);
    Ok(out)
}

/// Decodes `count` DELTA_BYTE_ARRAY values, reconstructing each into `scratch` and returning
/// borrows into it. `scratch` is cleared first; the caller keeps it alive at least as long as
/// the returned values.
pub fn decode_delta_byte_array<'s>(
    input: &[u8],
    count: usize,
    scratch: &'s mut Vec<u8>,
    limits: &DecodeLimits,
) -> Result<Vec<Value<'s>>> {
    let (prefix_lengths, prefix_consumed) = delta_bitpacked::decode_with_len(input)?;
    if prefix_lengths.len() != count {
        return malformed("DELTA_BYTE_ARRAY prefix length count does not match the expected count");
    }

    let rest = &input[prefix_consumed..];
    let (suffix_lengths, suffix_consumed) = delta_bitpacked::decode_with_len(rest)?;
    if suffix_lengths.len() != count {
        return malformed("DELTA_BYTE_ARRAY suffix length count does not match the expected count");
    }

    let total_bytes: i64 =
        prefix_lengths.iter().zip(&suffix_lengths).map(|(p, s)| p + s).sum();
    if total_bytes < 0 {
        return malformed("DELTA_BYTE_ARRAY declares a negative reconstructed length");
    }
    limits.check_scratch_bytes(total_bytes as usize)?;

    scratch.clear();
    scratch.reserve(total_bytes as usize);

    let mut pos = suffix_consumed;
    let mut ranges: Vec<(usize, usize)> = Vec::with_capacity(count);

    for i in 0..count {
        let prefix_len = prefix_lengths[i];
        let suffix_len = suffix_lengths[i];
        if prefix_len < 0 || suffix_len < 0 {
            return malformed("DELTA_BYTE_ARRAY declares a negative prefix or suffix length");
        }
        let prefix_len = prefix_len as usize;
        let suffix_len = suffix_len as usize;

        if rest.len() < pos + suffix_len {
            return malformed("DELTA_BYTE_ARRAY suffix payload is truncated");
        }
        let suffix = rest[pos..pos + suffix_len].to_vec();
        pos += suffix_len;

        let start = scratch.len();
        if i == 0 {
            if prefix_len != 0 {
                return malformed("DELTA_BYTE_ARRAY first value has a nonzero prefix length");
            }
        } else {
            let (prev_start, prev_len) = ranges[i - 1];
            if prefix_len > prev_len {
                return malformed("DELTA_BYTE_ARRAY prefix length exceeds the previous value's length");
            }
            let prefix = scratch[prev_start..prev_start + prefix_len].to_vec();
            scratch.extend_from_slice(&prefix);
        }
        scratch.extend_from_slice(&suffix);
        ranges.push((start, scratch.len() - start));
    }

    Ok(ranges.iter().map(|&(start, len)| &scratch[start..start + len]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_delta_length_byte_array_round_trip() {
        let values: Vec<&[u8]> = vec![b"alpha", b"", b"gamma", b"a"];
        let bytes = encode_delta_length_byte_array(&values).unwrap();
        let decoded = decode_delta_length_byte_array(&bytes, values.len()).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn verify_delta_byte_array_round_trip_on_sorted_strings() {
        let values: Vec<&[u8]> =
            vec![b"apple", b"application", b"apply", b"banana", b"band", b"bandana"];
        let bytes = encode_delta_byte_array(&values).unwrap();

        let mut scratch = Vec::new();
        let limits = DecodeLimits::unbounded();
        let decoded = decode_delta_byte_array(&bytes, values.len(), &mut scratch, &limits).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn verify_delta_byte_array_handles_empty_and_unsorted_input() {
        let values: Vec<&[u8]> = vec![b"zzz", b"a", b"", b"aardvark"];
        let bytes = encode_delta_byte_array(&values).unwrap();

        let mut scratch = Vec::new();
        let limits = DecodeLimits::unbounded();
        let decoded = decode_delta_byte_array(&bytes, values.len(), &mut scratch, &limits).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn verify_prefix_length_exceeding_previous_is_malformed() {
        // Build a length-delta-valid prefix stream but with a prefix length that is too long
        // for the previous value: encode two values then tamper with their prefix length.
        let values: Vec<&[u8]> = vec![b"ab", b"abc"];
        let mut bytes = encode_delta_byte_array(&values).unwrap();
        // Corrupt the stream so the second prefix length claims more than fits; use a hostile
        // reconstruction instead by decoding a hand-built malformed stream.
        bytes.clear();
        let mut prefix_encoder = DeltaBitPackEncoder::new();
        prefix_encoder.put(&[0, 100]).unwrap();
        bytes.extend_from_slice(&prefix_encoder.finish().unwrap());
        bytes.extend_from_slice(&encode_delta_length_byte_array(&[b"ab", b"c"]).unwrap());

        let mut scratch = Vec::new();
        let limits = DecodeLimits::unbounded();
        assert!(decode_delta_byte_array(&bytes, 2, &mut scratch, &limits).is_err());
    }

    #[test]
    fn verify_scratch_limit_is_enforced() {
        let values: Vec<&[u8]> = vec![b"hello", b"helloworld"];
        let bytes = encode_delta_byte_array(&values).unwrap();

        let mut scratch = Vec::new();
        let limits = DecodeLimits { max_dictionary_entries: usize::MAX, max_scratch_bytes: 1 };
        assert!(decode_delta_byte_array(&bytes, values.len(), &mut scratch, &limits).is_err());
    }
}
