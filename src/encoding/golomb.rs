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

//! Golomb–Rice parameter selection.
//!
//! A gap is coded as a unary quotient (`gap >> m` zero bits and a one bit)
//! followed by the `m` low bits verbatim. The sweet spot for `m` is near
//! the log2 of the average gap; picking it too low blows up the quotients,
//! too high wastes remainder bits.

use crate::error::{Result, SetTooDenseSnafu};
use snafu::ensure;

/// Smallest usable Rice parameter; also what the parameter character `A`
/// stands for.
pub const MIN_M: u32 = 5;

/// Largest usable Rice parameter, parameter character `Z`.
pub const MAX_M: u32 = 30;

/// Picks the Rice parameter for `n` values ending at `last` in a `bpp`-bit
/// range, and enforces the density invariant `n < 2^(bpp - m)` that decoders
/// rely on to bound the value count.
pub fn select_parameter(n: usize, last: u32, bpp: u32) -> Result<u32> {
    debug_assert!(n >= 1);
    debug_assert!(u64::from(last) + 1 >= n as u64);
    let dv_avg = (last - (n as u32 - 1)) / n as u32;
    let mut m = MIN_M;
    if dv_avg >= 32 {
        let mut range = 66u32;
        while dv_avg > range && m < MAX_M {
            m += 1;
            range = 2 * range + 1;
        }
    }
    ensure!(
        m < bpp && (n as u64) < 1 << (bpp - m),
        SetTooDenseSnafu { count: n, bpp, m }
    );
    Ok(m)
}

/// Upper bound on the encoded length in characters for `n` values ending at
/// `last`, coded with parameter `m`: `n` terminator-plus-remainder groups
/// plus room for the total quotient, five payload bits per character in the
/// worst case, two parameter characters and slack.
pub fn encoded_size_bound(n: usize, last: u32, m: u32) -> usize {
    let bits = n * (m as usize + 1) + ((last as usize - (n - 1)) >> m);
    bits / 5 + 4
}
