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

//! # bloomfilter
//!
//! A probabilistic set-membership structure over arbitrary byte sequences. Given an expected
//! item count and a target false positive rate, a [`bloom::BloomFilter`] answers "definitely
//! absent" or "possibly present" in constant time, using sublinear memory and never
//! reporting a false negative.
//!
//! The crate is divided into:
//!
//! - [`bloom`]: the filter, its sizing formulas and the double-hashing probe sequence
//! - [`bitarray`]: the word-packed bit storage the filter is built on
//! - [`error`]: the error returned when a filter cannot be sized

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod bitarray;
pub mod bloom;
pub mod error;

mod hash;

pub use self::hash::DEFAULT_SEED;
