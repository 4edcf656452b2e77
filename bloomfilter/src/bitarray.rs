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

//! Word-packed bit storage.
//!
//! Bits live in `u64` words: bit `i` is bit `i & 63` of word `i >> 6`. The array never
//! grows or shrinks once allocated.

use std::fmt;

use crate::error::Error;

/// Width of a storage word in bits.
pub const WORD_BITS: u64 = 64;

/// Largest bit array that can be allocated: `i32::MAX` words.
pub const MAX_NUM_BITS: u64 = i32::MAX as u64 * WORD_BITS;

const WORD_SHIFT: u64 = 6; // log2(WORD_BITS)
const WORD_MASK: u64 = WORD_BITS - 1;

/// A fixed-length bit vector packed into 64-bit words.
///
/// The addressable length is always a multiple of 64: requesting 100 bits allocates two
/// words and exposes 128 bits.
///
/// Indexing outside [`num_bits()`](Self::num_bits) is a contract violation and panics.
#[derive(Clone, PartialEq, Eq)]
pub struct BitArray {
    words: Box<[u64]>,
}

impl BitArray {
    /// Allocates a zeroed bit array holding at least `num_bits` bits.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if
    /// `num_bits` is 0, exceeds [`MAX_NUM_BITS`], or the words cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomfilter::bitarray::BitArray;
    /// let bits = BitArray::new(100).unwrap();
    /// assert_eq!(bits.num_bits(), 128);
    /// assert!(BitArray::new(0).is_err());
    /// assert!(BitArray::new(u64::MAX).is_err());
    /// ```
    pub fn new(num_bits: u64) -> Result<Self, Error> {
        if num_bits == 0 {
            return Err(Error::invalid_argument("num_bits must be greater than 0")
                .with_context("num_bits", num_bits));
        }

        if num_bits > MAX_NUM_BITS {
            return Err(
                Error::invalid_argument(format!("num_bits must not exceed {MAX_NUM_BITS}"))
                    .with_context("num_bits", num_bits),
            );
        }

        let num_words = num_bits.div_ceil(WORD_BITS) as usize;
        let mut words = Vec::new();
        words.try_reserve_exact(num_words).map_err(|err| {
            Error::invalid_argument(format!("cannot allocate bit array: {err}"))
                .with_context("num_bits", num_bits)
        })?;
        words.resize(num_words, 0u64);

        Ok(BitArray {
            words: words.into_boxed_slice(),
        })
    }

    /// Sets bit `index` to 1.
    ///
    /// Returns `true` if the bit was previously unset.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.num_bits()`.
    #[inline]
    pub fn set(&mut self, index: u64) -> bool {
        let (word_index, mask) = self.locate(index);
        let word = &mut self.words[word_index];
        let was_unset = *word & mask == 0;
        *word |= mask;
        was_unset
    }

    /// Sets bit `index` to 0.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.num_bits()`.
    #[inline]
    pub fn clear(&mut self, index: u64) {
        let (word_index, mask) = self.locate(index);
        self.words[word_index] &= !mask;
    }

    /// Returns whether bit `index` is 1.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.num_bits()`.
    #[inline]
    pub fn get(&self, index: u64) -> bool {
        let (word_index, mask) = self.locate(index);
        self.words[word_index] & mask != 0
    }

    /// Returns the number of addressable bits, i.e. `words * 64`.
    pub fn num_bits(&self) -> u64 {
        self.words.len() as u64 * WORD_BITS
    }

    /// Returns the number of bits currently set to 1.
    pub fn count_ones(&self) -> u64 {
        self.words.iter().map(|w| u64::from(w.count_ones())).sum()
    }

    /// Returns the raw storage words, lowest bit indexes first.
    pub fn as_words(&self) -> &[u64] {
        &self.words
    }

    #[inline]
    fn locate(&self, index: u64) -> (usize, u64) {
        assert!(
            index < self.num_bits(),
            "bit index {index} out of range for bit array of length {}",
            self.num_bits()
        );
        ((index >> WORD_SHIFT) as usize, 1u64 << (index & WORD_MASK))
    }
}

impl fmt::Debug for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitArray")
            .field("num_bits", &self.num_bits())
            .field("bits_set", &self.count_ones())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_rounds_up_to_whole_words() {
        assert_eq!(BitArray::new(1).unwrap().num_bits(), 64);
        assert_eq!(BitArray::new(64).unwrap().num_bits(), 64);
        assert_eq!(BitArray::new(65).unwrap().num_bits(), 128);
        assert_eq!(BitArray::new(959).unwrap().as_words().len(), 15);
    }

    #[test]
    fn test_zero_bits_rejected() {
        let err = BitArray::new(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_oversized_rejected() {
        for num_bits in [MAX_NUM_BITS + 1, 1 << 56, u64::MAX] {
            let err = BitArray::new(num_bits).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            assert_eq!(err.context(), &[("num_bits", num_bits.to_string())]);
        }
    }

    #[test]
    fn test_starts_zeroed() {
        let bits = BitArray::new(256).unwrap();
        assert_eq!(bits.count_ones(), 0);
        assert!((0..256).all(|i| !bits.get(i)));
    }

    #[test]
    fn test_set_get_clear() {
        let mut bits = BitArray::new(128).unwrap();
        assert!(bits.set(0));
        assert!(bits.set(63));
        assert!(bits.set(64));
        assert!(bits.set(127));
        assert!(!bits.set(64));

        assert!(bits.get(0) && bits.get(63) && bits.get(64) && bits.get(127));
        assert!(!bits.get(1) && !bits.get(65));
        assert_eq!(bits.count_ones(), 4);
        assert_eq!(bits.as_words(), &[1 | (1 << 63), 1 | (1 << 63)]);

        bits.clear(63);
        bits.clear(1);
        assert!(!bits.get(63));
        assert!(bits.get(0));
        assert_eq!(bits.count_ones(), 3);
    }

    #[test]
    #[should_panic(expected = "bit index 64 out of range for bit array of length 64")]
    fn test_set_out_of_range() {
        let mut bits = BitArray::new(10).unwrap();
        bits.set(64);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_get_out_of_range() {
        let bits = BitArray::new(64).unwrap();
        bits.get(u64::MAX);
    }

    #[test]
    fn test_debug_summary() {
        let mut bits = BitArray::new(64).unwrap();
        bits.set(3);
        assert_eq!(
            format!("{bits:?}"),
            "BitArray { num_bits: 64, bits_set: 1 }"
        );
    }
}
