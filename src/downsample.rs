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

//! Reducing the bit width of a decoded set.
//!
//! Two sets with different `bpp` compare meaningfully because both keep the
//! low bits of the same full-width hash: the wider set is reduced to the
//! narrower width first. Stripping one bit splits the sorted input at the
//! top-bit boundary into two runs that are still sorted after masking, so
//! a single merge suffices; no re-sort is ever needed.

/// Reduces a strictly increasing set of `bpp + 1`-bit values to `bpp` bits,
/// appending the result to `w`. Values that collide after the top bit is
/// stripped collapse, so the output may be shorter than the input.
pub fn downsample1(v: &[u32], w: &mut Vec<u32>, bpp: u32) {
    let mask = (1u32 << bpp) - 1;
    let split = v.partition_point(|&x| x <= mask);
    let (mut lo, mut hi) = (v[..split].iter().peekable(), v[split..].iter());
    let mut hi_next = hi.next().map(|&x| x & mask);
    while let (Some(&&a), Some(b)) = (lo.peek(), hi_next) {
        if a < b {
            w.push(a);
            lo.next();
        } else if b < a {
            w.push(b);
            hi_next = hi.next().map(|&x| x & mask);
        } else {
            w.push(a);
            lo.next();
            hi_next = hi.next().map(|&x| x & mask);
        }
    }
    w.extend(lo);
    if let Some(b) = hi_next {
        w.push(b);
    }
    w.extend(hi.map(|&x| x & mask));
}

/// Repeatedly strips one bit until the set is `to_bpp` bits wide, swapping
/// between the input vector and a scratch buffer on each pass.
pub fn downsample(mut v: Vec<u32>, mut bpp: u32, to_bpp: u32) -> Vec<u32> {
    debug_assert!(bpp > to_bpp);
    let mut scratch = Vec::with_capacity(v.len());
    while bpp > to_bpp {
        bpp -= 1;
        scratch.clear();
        downsample1(&v, &mut scratch, bpp);
        std::mem::swap(&mut v, &mut scratch);
    }
    v
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn downsample1_vec(v: &[u32], bpp: u32) -> Vec<u32> {
        let mut w = Vec::new();
        downsample1(v, &mut w, bpp);
        w
    }

    #[test]
    fn strips_the_top_bit_and_merges() {
        // 9-bit values reduced to 8 bits: 0x1xx interleaves with 0x0xx.
        let v = [0x010, 0x020, 0x105, 0x130];
        assert_eq!(downsample1_vec(&v, 8), [0x05, 0x10, 0x20, 0x30]);
    }

    #[test]
    fn collapses_collisions() {
        let v = [0x010, 0x020, 0x110, 0x130];
        assert_eq!(downsample1_vec(&v, 8), [0x10, 0x20, 0x30]);
    }

    #[test]
    fn handles_one_sided_inputs() {
        assert_eq!(downsample1_vec(&[1, 2, 3], 8), [1, 2, 3]);
        assert_eq!(downsample1_vec(&[0x101, 0x102], 8), [1, 2]);
    }

    #[test]
    fn multi_bit_reduction() {
        let v = vec![0x001, 0x202, 0x404, 0x605];
        // 11 bits down to 9: strip two bits, one at a time.
        assert_eq!(downsample(v, 11, 9), [0x001, 0x002, 0x004, 0x005]);
    }

    proptest! {
        #[test]
        fn output_is_strictly_increasing_and_masked(
            values in prop::collection::vec(0u32..(1 << 12), 1..200),
            bpp in 4u32..12,
        ) {
            let mut v = values;
            v.sort_unstable();
            v.dedup();
            let w = downsample1_vec(&v, bpp);
            prop_assert!(!w.is_empty());
            prop_assert!(w.len() <= v.len());
            prop_assert!(w.windows(2).all(|p| p[0] < p[1]));
            prop_assert!(w.iter().all(|&x| x <= (1 << bpp) - 1));
        }

        #[test]
        fn matches_the_set_semantics(
            values in prop::collection::vec(0u32..(1 << 10), 1..200),
        ) {
            let mut v = values;
            v.sort_unstable();
            v.dedup();
            let expected: std::collections::BTreeSet<u32> =
                v.iter().map(|&x| x & 0x1ff).collect();
            let w = downsample1_vec(&v, 9);
            prop_assert_eq!(w, expected.into_iter().collect::<Vec<_>>());
        }
    }
}
