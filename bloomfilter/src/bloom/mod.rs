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

//! Bloom filter implementation for probabilistic set membership testing.
//!
//! A Bloom filter is a space-efficient probabilistic data structure used to test whether
//! a byte sequence is a member of a set. False positive matches are possible, but false
//! negatives are not. In other words, a query returns either "possibly in set" or
//! "definitely not in set".
//!
//! # Properties
//!
//! - **No false negatives**: If an item was inserted, `contains()` will always return `true`
//! - **Possible false positives**: `contains()` may return `true` for items never inserted
//! - **Fixed size**: The filter never resizes, and items can never be removed
//! - **Linear space**: Size is proportional to the expected number of distinct items
//!
//! # Usage
//!
//! ```rust
//! use bloomfilter::bloom::BloomFilter;
//!
//! // Create a filter sized for 1000 items with 1% false positive rate
//! let mut filter = BloomFilter::new(1000, 0.01).unwrap();
//!
//! // Insert items
//! filter.insert("apple");
//! filter.insert(b"banana");
//! filter.insert(42_u64.to_le_bytes());
//!
//! // Check membership
//! assert!(filter.contains("apple")); // true - definitely inserted
//! assert!(!filter.contains("grape")); // false - never inserted (probably)
//!
//! // Get statistics
//! println!("Size: {} bits, {} hashes", filter.num_bits(), filter.num_hashes());
//! println!("Bits used: {}", filter.bits_used());
//! println!("Est. FPP: {:.4}%", filter.estimated_fpp() * 100.0);
//! ```
//!
//! # Sizing
//!
//! For `n` expected items and target false positive probability `p`, the filter allocates
//!
//! ```text
//! m = ceil(-n * ln(p) / ln(2)^2)
//! ```
//!
//! bits, rounded up to a multiple of 64, and probes
//!
//! ```text
//! k = ceil((m / n) * ln(2))
//! ```
//!
//! positions per item. Both formulas are exposed on [`BloomFilterBuilder`].
//!
//! ```rust
//! # use bloomfilter::bloom::BloomFilterBuilder;
//! let filter = BloomFilterBuilder::with_accuracy(
//!     10_000, // Expected max items
//!     0.01,   // Target false positive probability (1%)
//! )
//! .seed(9001) // Optional: custom seed
//! .build()
//! .unwrap();
//! assert_eq!(filter.num_bits() % 64, 0);
//! ```
//!
//! # Implementation Details
//!
//! - Hashes each item exactly twice: XXHash64 and MurmurHash3 x64/128, both seeded with 0
//!   by default
//! - Implements double hashing (Kirsch-Mitzenmacher method) for k probe positions
//! - Bits packed in `u64` words
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/time trade-offs in hash coding with allowable errors"
//! - Kirsch and Mitzenmacher (2008). "Less Hashing, Same Performance: Building a Better Bloom
//!   Filter"

mod builder;
mod sketch;

pub use self::builder::BloomFilterBuilder;
pub use self::sketch::BitPositions;
pub use self::sketch::BloomFilter;
