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

use bloomfilter::bloom::BloomFilter;
use bloomfilter::error::Error;

fn main() -> Result<(), Error> {
    // 10,000 expected items, 1% false positive rate
    let mut filter = BloomFilter::new(10_000, 0.01)?;
    println!("Created {filter}");

    println!("\nInserting 10,000 keys...");
    for i in 0..10_000 {
        filter.insert(format!("user:{i}"));
    }

    println!("Bits used: {} / {}", filter.bits_used(), filter.num_bits());
    println!("Load factor: {:.3}", filter.load_factor());
    println!("Estimated FPP: {:.4}%", filter.estimated_fpp() * 100.0);

    let probes = 100_000;
    let false_positives = (10_000..10_000 + probes)
        .filter(|i| filter.contains(format!("user:{i}")))
        .count();
    println!(
        "Observed FPP over {probes} unseen keys: {:.4}%",
        false_positives as f64 / probes as f64 * 100.0
    );

    println!("\nInvalid arguments are rejected up front:");
    match BloomFilter::new(100, 1.5) {
        Ok(_) => unreachable!("1.5 is not a probability"),
        Err(err) => println!("  {err}"),
    }

    Ok(())
}
