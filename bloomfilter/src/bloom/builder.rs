// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::f64::consts::LN_2;

use tracing::debug;

use super::BloomFilter;
use crate::bitarray::BitArray;
use crate::bitarray::MAX_NUM_BITS;
use crate::error::Error;
use crate::hash::DEFAULT_SEED;

/// Builder for creating [`BloomFilter`] instances.
///
/// The builder only records the requested accuracy. All validation and sizing happens in
/// [`build()`](Self::build), before the bit array is allocated, so a filter is never
/// observable in a partially sized state.
#[derive(Debug, Clone)]
pub struct BloomFilterBuilder {
    capacity: u64,
    fpp: f64,
    seed: u64,
}

impl BloomFilterBuilder {
    /// Creates a builder sized for a target accuracy.
    ///
    /// # Arguments
    ///
    /// - `capacity`: Maximum expected number of distinct items. Inserting more is allowed but
    ///   pushes the false positive rate above `fpp`.
    /// - `fpp`: Target false positive probability at `capacity` items, in `(0.0, 1.0)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_accuracy(10_000, 0.01)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(filter.capacity(), 10_000);
    /// ```
    pub fn with_accuracy(capacity: u64, fpp: f64) -> Self {
        BloomFilterBuilder {
            capacity,
            fpp,
            seed: DEFAULT_SEED,
        }
    }

    /// Sets a custom hash seed (default: 0).
    ///
    /// **Important**: Filters built with different seeds set different bits for the same
    /// item.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_accuracy(100, 0.01)
    ///     .seed(12345)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(filter.seed(), 12345);
    /// ```
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the Bloom filter.
    ///
    /// The bit count from [`suggest_num_bits()`](Self::suggest_num_bits) is rounded up to a
    /// multiple of 64, and the hash count is derived from the rounded size.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if
    /// `capacity` is 0, `fpp` is not strictly between 0.0 and 1.0, or the filter would need
    /// more than [`MAX_NUM_BITS`] bits.
    pub fn build(self) -> Result<BloomFilter, Error> {
        let requested_bits = Self::suggest_num_bits(self.capacity, self.fpp)?;
        let bit_array = BitArray::new(requested_bits)?;
        let num_bits = bit_array.num_bits();
        let num_hashes = Self::suggest_num_hashes(self.capacity, num_bits);

        debug!(
            capacity = self.capacity,
            fpp = self.fpp,
            seed = self.seed,
            num_bits,
            num_hashes,
            "sized bloom filter"
        );

        Ok(BloomFilter {
            capacity: self.capacity,
            fpp: self.fpp,
            seed: self.seed,
            num_hashes,
            num_bits_set: 0,
            bit_array,
        })
    }

    /// Suggests the optimal number of bits for `capacity` items at false positive
    /// probability `fpp`.
    ///
    /// Formula: `m = ceil(-n * ln(p) / (ln(2)^2))`
    /// where n = capacity, p = fpp
    ///
    /// The result is not word aligned; [`build()`](Self::build) rounds it up.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if
    /// `capacity` is 0, `fpp` is not strictly between 0.0 and 1.0, or the resulting bit
    /// count exceeds [`MAX_NUM_BITS`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilterBuilder;
    /// let bits = BloomFilterBuilder::suggest_num_bits(1000, 0.01).unwrap();
    /// assert_eq!(bits, 9586);
    /// ```
    pub fn suggest_num_bits(capacity: u64, fpp: f64) -> Result<u64, Error> {
        check_accuracy(capacity, fpp)?;

        let n = capacity as f64;
        let ln2_squared = LN_2 * LN_2;
        let bits = (-(n * fpp.ln()) / ln2_squared).ceil();
        if bits > MAX_NUM_BITS as f64 {
            return Err(Error::invalid_argument(format!(
                "required num_bits exceeds the maximum of {MAX_NUM_BITS}"
            ))
            .with_context("capacity", capacity)
            .with_context("fpp", fpp)
            .with_context("num_bits", bits));
        }
        Ok(bits as u64)
    }

    /// Suggests the optimal number of hash functions for `capacity` items spread over
    /// `num_bits` bits.
    ///
    /// Formula: `k = ceil((m / n) * ln(2))`
    /// where m = num_bits, n = capacity
    ///
    /// Never returns less than 1. The inputs are assumed to be validated already; a
    /// `capacity` of 0 yields `u32::MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilterBuilder;
    /// let hashes = BloomFilterBuilder::suggest_num_hashes(1000, 9600);
    /// assert_eq!(hashes, 7); // 9.6 * ln(2) ≈ 6.65
    /// ```
    pub fn suggest_num_hashes(capacity: u64, num_bits: u64) -> u32 {
        let m = num_bits as f64;
        let n = capacity as f64;

        // Ceil to avoid selecting too few hashes.
        let k = (m / n * LN_2).ceil();
        k.max(1.0) as u32
    }
}

fn check_accuracy(capacity: u64, fpp: f64) -> Result<(), Error> {
    if capacity == 0 {
        return Err(Error::invalid_argument("capacity must be greater than 0")
            .with_context("capacity", capacity));
    }
    // written so that NaN is rejected too
    if !(fpp > 0.0 && fpp < 1.0) {
        return Err(
            Error::invalid_argument("fpp must be between 0.0 and 1.0 (exclusive)")
                .with_context("fpp", fpp),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_suggest_num_bits_matches_formula() {
        for (n, p) in [(1u64, 0.01), (100, 0.01), (1000, 0.01), (10_000, 0.05), (7, 0.5)] {
            let expected = (-(n as f64 * f64::ln(p)) / f64::ln(2.0).powi(2)).ceil() as u64;
            assert_eq!(BloomFilterBuilder::suggest_num_bits(n, p).unwrap(), expected);
        }
        assert_eq!(BloomFilterBuilder::suggest_num_bits(100, 0.01).unwrap(), 959);
    }

    #[test]
    fn test_suggest_num_bits_rejects_invalid_arguments() {
        for (n, p) in [
            (0u64, 0.01),
            (100, 0.0),
            (100, 1.0),
            (100, -0.5),
            (100, 1.5),
            (100, f64::NAN),
        ] {
            let err = BloomFilterBuilder::suggest_num_bits(n, p).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "n={n}, p={p}");
        }
    }

    #[test]
    fn test_suggest_num_bits_rejects_oversized_filters() {
        let err = BloomFilterBuilder::suggest_num_bits(u64::MAX, 1e-300).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let keys: Vec<&str> = err.context().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["capacity", "fpp", "num_bits"]);

        assert!(BloomFilterBuilder::with_accuracy(1 << 50, 0.01).build().is_err());
        // just under the limit is still sized normally
        let largest = (MAX_NUM_BITS as f64 * LN_2 * LN_2 / -f64::ln(0.5)).floor() as u64 - 1;
        let bits = BloomFilterBuilder::suggest_num_bits(largest, 0.5).unwrap();
        assert!(bits <= MAX_NUM_BITS);
    }

    #[test]
    fn test_rate_near_one_still_positive() {
        assert!(BloomFilterBuilder::suggest_num_bits(100, 0.99).unwrap() >= 1);
        assert!(BloomFilterBuilder::suggest_num_bits(1, 0.999_999).unwrap() >= 1);
    }

    #[test]
    fn test_suggest_num_hashes() {
        assert_eq!(BloomFilterBuilder::suggest_num_hashes(100, 960), 7);
        assert_eq!(BloomFilterBuilder::suggest_num_hashes(1, 64), 45);
        // sparse bits still probe at least once
        assert_eq!(BloomFilterBuilder::suggest_num_hashes(1000, 10), 1);
        assert_eq!(BloomFilterBuilder::suggest_num_hashes(1000, 0), 1);
    }

    #[test]
    fn test_build_rounds_to_words() {
        let filter = BloomFilterBuilder::with_accuracy(100, 0.01).build().unwrap();
        assert_eq!(filter.num_bits(), 960);
        assert_eq!(filter.num_hashes(), 7);
        assert_eq!(filter.seed(), DEFAULT_SEED);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_build_reports_context() {
        let err = BloomFilterBuilder::with_accuracy(100, 1.0).build().unwrap_err();
        assert_eq!(err.context(), &[("fpp", "1".to_string())]);

        let err = BloomFilterBuilder::with_accuracy(0, 0.01).build().unwrap_err();
        assert_eq!(err.message(), "capacity must be greater than 0");
    }
}
