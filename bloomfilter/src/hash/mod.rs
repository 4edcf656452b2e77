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

//! Non-cryptographic hash primitives backing the double-hashing scheme.
//!
//! The filter needs two algorithmically unrelated hash families: XXH64 supplies the base
//! position and MurmurHash3 x64/128 supplies the stride.

mod murmurhash;
mod xxhash;

pub(crate) use self::murmurhash::murmurhash3_x64_128;
pub(crate) use self::xxhash::xxhash64;

/// Seed applied to both hash primitives unless a filter is built with a custom one.
///
/// Filters only agree on bit positions when they share a seed, so changing it invalidates
/// every previously populated bit array.
pub const DEFAULT_SEED: u64 = 0;

/// Splits a 128-bit MurmurHash3 output into its four 32-bit words, in the order they are
/// laid out in memory on a little-endian machine.
pub(crate) fn output_words(hash: (u64, u64)) -> [u32; 4] {
    let (h1, h2) = hash;
    [h1 as u32, (h1 >> 32) as u32, h2 as u32, (h2 >> 32) as u32]
}
