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

use std::fmt;
use std::iter::FusedIterator;

use super::BloomFilterBuilder;
use crate::bitarray::BitArray;
use crate::error::Error;
use crate::hash::murmurhash3_x64_128;
use crate::hash::output_words;
use crate::hash::xxhash64;

/// A Bloom filter for probabilistic set membership testing over byte sequences.
///
/// Provides fast membership queries with:
/// - No false negatives (inserted items always return `true`)
/// - A false positive rate tuned at construction
/// - Constant space usage, fixed for the lifetime of the filter
///
/// Mutation takes `&mut self`, so the borrow checker rules out concurrent inserts; any
/// number of shared references may call [`contains()`](Self::contains) at once.
///
/// Use [`BloomFilter::new`] or [`BloomFilterBuilder`] to construct instances.
#[derive(Debug, Clone, PartialEq)]
pub struct BloomFilter {
    /// Number of items the filter was sized for (n)
    pub(super) capacity: u64,
    /// Target false positive probability at `capacity` items (p)
    pub(super) fpp: f64,
    /// Hash seed for both hash functions
    pub(super) seed: u64,
    /// Number of bit positions probed per item (k)
    pub(super) num_hashes: u32,
    /// Count of bits set to 1 (for statistics)
    pub(super) num_bits_set: u64,
    /// Bit array of m bits, m a multiple of 64
    pub(super) bit_array: BitArray,
}

impl BloomFilter {
    /// Creates a filter for `capacity` items at false positive probability `fpp`, using the
    /// default seed.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if
    /// `capacity` is 0 or `fpp` is not strictly between 0.0 and 1.0.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilter;
    /// let filter = BloomFilter::new(100, 0.01).unwrap();
    /// assert_eq!(filter.num_bits(), 960);
    /// assert_eq!(filter.num_hashes(), 7);
    ///
    /// assert!(BloomFilter::new(0, 0.01).is_err());
    /// assert!(BloomFilter::new(100, 1.0).is_err());
    /// ```
    pub fn new(capacity: u64, fpp: f64) -> Result<Self, Error> {
        BloomFilterBuilder::with_accuracy(capacity, fpp).build()
    }

    /// Tests whether an item is possibly in the set.
    ///
    /// Returns:
    /// - `true`: Item was **possibly** inserted (or false positive)
    /// - `false`: Item was **definitely not** inserted
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01).unwrap();
    /// filter.insert("apple");
    ///
    /// assert!(filter.contains("apple"));
    /// assert!(!filter.contains("grape"));
    /// ```
    pub fn contains<T: AsRef<[u8]>>(&self, item: T) -> bool {
        if self.is_empty() {
            return false;
        }

        let (h1, h2) = self.compute_hash(item.as_ref());
        self.check_bits(h1, h2)
    }

    /// Tests and inserts an item in a single operation.
    ///
    /// Returns whether the item was possibly already in the set before insertion. Both
    /// steps share one hash computation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01).unwrap();
    ///
    /// assert!(!filter.contains_and_insert("apple"));
    /// assert!(filter.contains_and_insert("apple"));
    /// ```
    pub fn contains_and_insert<T: AsRef<[u8]>>(&mut self, item: T) -> bool {
        let (h1, h2) = self.compute_hash(item.as_ref());
        let was_present = !self.is_empty() && self.check_bits(h1, h2);
        self.set_bits(h1, h2);
        was_present
    }

    /// Inserts an item into the filter.
    ///
    /// After insertion, `contains(item)` will always return `true`. Inserting the same item
    /// again leaves the bit array unchanged. Any byte sequence is accepted, including an
    /// empty one.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01).unwrap();
    ///
    /// filter.insert("apple");
    /// filter.insert(b"");
    /// filter.insert([1u8, 2, 3]);
    ///
    /// assert!(filter.contains("apple"));
    /// assert!(filter.contains(b""));
    /// ```
    #[doc(alias = "add")]
    pub fn insert<T: AsRef<[u8]>>(&mut self, item: T) {
        let (h1, h2) = self.compute_hash(item.as_ref());
        self.set_bits(h1, h2);
    }

    /// Returns the bit positions probed for `item`, in probe order.
    ///
    /// The sequence has exactly [`num_hashes()`](Self::num_hashes) entries, each below
    /// [`num_bits()`](Self::num_bits), and depends only on the item, the seed and the filter
    /// size.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bloom::BloomFilter;
    /// let filter = BloomFilter::new(100, 0.01).unwrap();
    /// let positions: Vec<u64> = filter.bit_positions("apple").collect();
    /// assert_eq!(positions.len(), 7);
    /// assert!(positions.iter().all(|&p| p < filter.num_bits()));
    /// ```
    pub fn bit_positions<T: AsRef<[u8]>>(&self, item: T) -> BitPositions {
        let (h1, h2) = self.compute_hash(item.as_ref());
        self.positions(h1, h2)
    }

    /// Returns whether the filter is empty (no items inserted).
    pub fn is_empty(&self) -> bool {
        self.num_bits_set == 0
    }

    /// Returns the number of items the filter was sized for.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Returns the false positive probability the filter was sized for.
    pub fn false_positive_rate(&self) -> f64 {
        self.fpp
    }

    /// Returns the total number of bits in the filter, always a multiple of 64.
    pub fn num_bits(&self) -> u64 {
        self.bit_array.num_bits()
    }

    /// Returns the number of bit positions probed per item.
    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }

    /// Returns the hash seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns a read-only view of the underlying bit array.
    pub fn bit_array(&self) -> &BitArray {
        &self.bit_array
    }

    /// Returns the number of bits set to 1.
    ///
    /// Useful for monitoring filter saturation.
    pub fn bits_used(&self) -> u64 {
        self.num_bits_set
    }

    /// Returns the current load factor (fraction of bits set).
    ///
    /// A filter filled to its capacity sits near 0.5; higher values mean the false positive
    /// rate has degraded past the target.
    pub fn load_factor(&self) -> f64 {
        self.num_bits_set as f64 / self.num_bits() as f64
    }

    /// Estimates the current false positive probability as `load_factor^k`.
    ///
    /// This assumes uniform bit distribution.
    pub fn estimated_fpp(&self) -> f64 {
        self.load_factor().powf(f64::from(self.num_hashes))
    }

    /// Computes the two base hash values.
    ///
    /// - h1 = XXHash64(item, seed)
    /// - h2 = the first two 32-bit words of MurmurHash3_x64_128(item, seed), the first word
    ///   in the upper half
    fn compute_hash(&self, item: &[u8]) -> (u64, u64) {
        let h1 = xxhash64(item, self.seed);

        let words = output_words(murmurhash3_x64_128(item, self.seed));
        let h2 = (u64::from(words[0]) << 32) | u64::from(words[1]);

        (h1, h2)
    }

    fn positions(&self, h1: u64, h2: u64) -> BitPositions {
        BitPositions {
            h1,
            h2,
            next: 1,
            num_hashes: u64::from(self.num_hashes),
            num_bits: self.num_bits(),
        }
    }

    /// Checks if all k bits are set for the given hash values.
    fn check_bits(&self, h1: u64, h2: u64) -> bool {
        self.positions(h1, h2)
            .all(|bit_index| self.bit_array.get(bit_index))
    }

    /// Sets all k bits for the given hash values.
    fn set_bits(&mut self, h1: u64, h2: u64) {
        for bit_index in self.positions(h1, h2) {
            if self.bit_array.set(bit_index) {
                self.num_bits_set += 1;
            }
        }
    }
}

impl fmt::Display for BloomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BloomFilter(capacity={}, false_positive_rate={:.6}, num_bits={}, num_hashes={}, bits_used={})",
            self.capacity,
            self.fpp,
            self.num_bits(),
            self.num_hashes,
            self.num_bits_set
        )
    }
}

/// Iterator over the bit positions probed for one item.
///
/// Created by [`BloomFilter::bit_positions`]. Uses double hashing (Kirsch-Mitzenmacher):
///
/// ```text
/// position_i = (h1 + i * h2) % num_bits,  i = 1..=num_hashes
/// ```
///
/// Arithmetic wraps at 64 bits and `i` is 1-based.
#[derive(Debug, Clone)]
pub struct BitPositions {
    h1: u64,
    h2: u64,
    next: u64,
    num_hashes: u64,
    num_bits: u64,
}

impl Iterator for BitPositions {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.next > self.num_hashes {
            return None;
        }
        let i = self.next;
        self.next += 1;
        let hash = self.h1.wrapping_add(i.wrapping_mul(self.h2));
        Some(hash % self.num_bits)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.num_hashes + 1 - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitPositions {}

impl FusedIterator for BitPositions {}
