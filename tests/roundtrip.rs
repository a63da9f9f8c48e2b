// parquet-columnar
// Copyright (c) 2024 The parquet-columnar Contributors.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property-based tests for the universal properties named by the testable-properties table.

use proptest::prelude::*;

use parquet_columnar::bloom::BloomFilter;
use parquet_columnar::checksum;
use parquet_columnar::config::DecodeLimits;
use parquet_columnar::encoding::{byte_stream_split, delta_bitpacked, dictionary, plain, rle};

proptest! {
    // Property 1: round-trip, PLAIN INT32/DOUBLE.
    #[test]
    fn plain_i32_round_trips(values in prop::collection::vec(any::<i32>(), 0..256)) {
        let mut out = Vec::new();
        plain::encode_i32(&values, &mut out);
        prop_assert_eq!(plain::decode_i32(&out, values.len()).unwrap(), values);
    }

    #[test]
    fn plain_f64_round_trips_bit_exact(values in prop::collection::vec(any::<u64>(), 0..256)) {
        let values: Vec<f64> = values.into_iter().map(f64::from_bits).collect();
        let mut out = Vec::new();
        plain::encode_f64(&values, &mut out);
        let decoded = plain::decode_f64(&out, values.len()).unwrap();
        prop_assert_eq!(
            decoded.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
            values.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
        );
    }

    // Property 1 + 9: hybrid-RLE round trips and the delta codec's prefix-sum law holds.
    #[test]
    fn hybrid_rle_round_trips(
        values in prop::collection::vec(0u32..16, 0..512),
    ) {
        let mut encoder = rle::RleEncoder::new(4).unwrap();
        for &v in &values {
            encoder.put(v).unwrap();
        }
        let bytes = encoder.finish().unwrap();

        let mut decoder = rle::RleDecoder::new(&bytes, 4).unwrap();
        let mut out = vec![0u32; values.len()];
        decoder.decode_batch(&mut out).unwrap();
        prop_assert_eq!(out, values);
    }

    #[test]
    fn delta_prefix_sum_law(values in prop::collection::vec(any::<i32>(), 1..512)) {
        let values: Vec<i64> = values.into_iter().map(i64::from).collect();
        let mut encoder = delta_bitpacked::DeltaBitPackEncoder::new();
        encoder.put(&values).unwrap();
        let bytes = encoder.finish().unwrap();
        prop_assert_eq!(delta_bitpacked::decode(&bytes).unwrap(), values);
    }

    // Property 10: byte-stream-split is an involution for any positive width.
    #[test]
    fn byte_stream_split_is_involution(
        rows in prop::collection::vec(any::<u8>(), 0..512),
        width in 1usize..9,
    ) {
        let count = rows.len() / width;
        let trimmed = &rows[..count * width];
        let encoded = byte_stream_split::encode(trimmed, count, width).unwrap();
        let decoded = byte_stream_split::decode(&encoded, count, width).unwrap();
        prop_assert_eq!(decoded, trimmed);
    }

    // Property 4: dictionary uniqueness and index mapping.
    #[test]
    fn dictionary_is_unique_and_indices_map_back(
        values in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..6), 0..128),
    ) {
        let limits = DecodeLimits::unbounded();
        let mut builder = dictionary::DictionaryBuilder::new(dictionary::ValueKind::Variable);
        for v in &values {
            builder.insert(v, &limits).unwrap();
        }

        let unique_count = values.iter().collect::<std::collections::HashSet<_>>().len();
        prop_assert_eq!(builder.num_entries(), unique_count);

        let dict_page = builder.write_dictionary_page();
        let dict_values = plain::decode_byte_array(&dict_page, builder.num_entries()).unwrap();
        for (i, v) in values.iter().enumerate() {
            let idx = builder.indices()[i];
            prop_assert_eq!(dict_values[idx as usize], v.as_slice());
        }
    }

    // Property 6: CRC incremental law.
    #[test]
    fn crc32_incremental_law(a in prop::collection::vec(any::<u8>(), 0..256), b in prop::collection::vec(any::<u8>(), 0..256)) {
        let whole: Vec<u8> = a.iter().chain(b.iter()).copied().collect();
        let incremental = checksum::crc32_update(checksum::crc32_update(0, &a), &b);
        prop_assert_eq!(incremental, checksum::crc32(&whole));
    }

    // Property 3: no decoder panics or hangs on malformed/truncated input.
    #[test]
    fn rle_decoder_is_safe_on_arbitrary_bytes(data in prop::collection::vec(any::<u8>(), 0..4096), width in 0u32..33) {
        if let Ok(mut decoder) = rle::RleDecoder::new(&data, width) {
            let mut out = [0u32; 32];
            for _ in 0..256 {
                if decoder.decode_batch(&mut out).is_err() {
                    break;
                }
            }
        }
    }

    #[test]
    fn delta_decoder_is_safe_on_arbitrary_bytes(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        let _ = delta_bitpacked::decode(&data);
    }

    #[test]
    fn bloom_from_bytes_is_safe_on_arbitrary_bytes(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        if let Ok(filter) = BloomFilter::from_bytes(data.clone()) {
            let _ = filter.check(&data);
        }
    }
}
