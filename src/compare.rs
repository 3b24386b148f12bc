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

//! The merge comparator over two decoded sets.
//!
//! Comparing Requires against Provides walks two sorted arrays. Requires is
//! usually sparse, so the loop skips Provides toward the next Requires
//! element several steps at a time and backtracks by halving (cf. quicker
//! sequential search and binary merging, Knuth Vol. 3). The boundary check
//! of the skip loop is eliminated by sentinels stored past the end of the
//! Provides values, which must be a real part of the slice handed in.

/// How two sets relate, as seen from the Provides side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetRelation {
    /// Both sets hold the same values.
    Equal,
    /// Provides is a proper superset: every Requires element is covered.
    Superset,
    /// Provides is a proper subset of Requires.
    Subset,
    /// Each side holds values the other lacks.
    Incomparable,
}

impl SetRelation {
    /// The wire-visible integer: 0, 1, -1 or -2.
    pub fn as_i32(self) -> i32 {
        match self {
            SetRelation::Equal => 0,
            SetRelation::Superset => 1,
            SetRelation::Subset => -1,
            SetRelation::Incomparable => -2,
        }
    }
}

/// Number of `u32::MAX` sentinels expected past the Provides values; at
/// least as large as the widest speculative step.
pub const SENTINELS: usize = 8;

/// Appends the sentinel run to a decoded Provides vector.
pub fn install_sentinels(v: &mut Vec<u32>) {
    v.extend(std::iter::repeat(u32::MAX).take(SENTINELS));
}

/// Compares the first `n1` values of `v1` (Provides) against `v2`
/// (Requires). Both sequences must be strictly increasing over the same
/// bit range, and `v1[n1..n1 + SENTINELS]` must hold `u32::MAX`.
pub fn set_cmp(v1: &[u32], n1: usize, v2: &[u32]) -> SetRelation {
    let n2 = v2.len();
    assert!(n1 + SENTINELS <= v1.len(), "missing sentinel region");
    assert!(n1 > 0 && n2 > 0, "empty sets cannot be compared");
    debug_assert!(v1[n1..n1 + SENTINELS].iter().all(|&x| x == u32::MAX));

    // Equality flags, cleared as the walk finds one-sided elements.
    let mut le = true;
    let mut ge = true;
    let mut i = 0;
    let mut j = 0;
    let mut v2val = v2[0];

    macro_rules! step_past {
        (8) => {
            if v1[i] < v2val {
                le = false;
                i += 8;
                while v1[i] < v2val {
                    i += 8;
                }
                // Bisect back over the overshoot.
                i -= 4;
                if v1[i] < v2val {
                    i += 2;
                } else {
                    i -= 2;
                }
                if v1[i] < v2val {
                    i += 1;
                } else {
                    i -= 1;
                }
                if v1[i] < v2val {
                    i += 1;
                }
                if i == n1 {
                    break;
                }
            }
        };
        (4) => {
            if v1[i] < v2val {
                le = false;
                i += 4;
                while v1[i] < v2val {
                    i += 4;
                }
                // Bisect back over the overshoot.
                i -= 2;
                if v1[i] < v2val {
                    i += 1;
                } else {
                    i -= 1;
                }
                if v1[i] < v2val {
                    i += 1;
                }
                if i == n1 {
                    break;
                }
            }
        };
    }

    macro_rules! match_one {
        () => {
            if v1[i] == v2val {
                i += 1;
                j += 1;
                if i == n1 {
                    break;
                }
                if j == n2 {
                    break;
                }
                v2val = v2[j];
            } else {
                // An unmet Requires element.
                ge = false;
                j += 1;
                if j == n2 {
                    break;
                }
                v2val = v2[j];
            }
        };
    }

    if n1 >= 16 * n2 {
        loop {
            step_past!(8);
            match_one!();
        }
    } else {
        loop {
            step_past!(4);
            match_one!();
        }
    }

    if i < n1 {
        le = false;
    }
    if j < n2 {
        ge = false;
    }
    match (le, ge) {
        (true, true) => SetRelation::Equal,
        (false, true) => SetRelation::Superset,
        (true, false) => SetRelation::Subset,
        (false, false) => SetRelation::Incomparable,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;

    fn with_sentinels(v: &[u32]) -> Vec<u32> {
        let mut out = v.to_vec();
        install_sentinels(&mut out);
        out
    }

    fn cmp(v1: &[u32], v2: &[u32]) -> SetRelation {
        set_cmp(&with_sentinels(v1), v1.len(), v2)
    }

    /// The definitional result, for cross-checking the stepped loop.
    fn oracle(v1: &[u32], v2: &[u32]) -> SetRelation {
        let a: BTreeSet<u32> = v1.iter().copied().collect();
        let b: BTreeSet<u32> = v2.iter().copied().collect();
        match (a.is_superset(&b), a.is_subset(&b)) {
            (true, true) => SetRelation::Equal,
            (true, false) => SetRelation::Superset,
            (false, true) => SetRelation::Subset,
            (false, false) => SetRelation::Incomparable,
        }
    }

    #[test]
    fn equal_sets() {
        assert_eq!(cmp(&[1, 2, 3], &[1, 2, 3]), SetRelation::Equal);
        assert_eq!(cmp(&[7], &[7]), SetRelation::Equal);
    }

    #[test]
    fn proper_superset_and_subset() {
        assert_eq!(cmp(&[1, 2, 3, 4, 5], &[2, 4]), SetRelation::Superset);
        assert_eq!(cmp(&[2, 4], &[1, 2, 3, 4, 5]), SetRelation::Subset);
    }

    #[test]
    fn incomparable_sets() {
        assert_eq!(cmp(&[1, 2, 3], &[2, 3, 4]), SetRelation::Incomparable);
        assert_eq!(cmp(&[1], &[2]), SetRelation::Incomparable);
    }

    #[test]
    fn sparse_requires_uses_the_wide_step() {
        // n1 >= 16 * n2 exercises the 8-step loop and its backtrack.
        let v1: Vec<u32> = (0..512).map(|i| i * 3).collect();
        let v2 = [3, 300, 1533];
        assert_eq!(cmp(&v1, &v2), SetRelation::Superset);
        let v2 = [3, 301];
        assert_eq!(cmp(&v1, &v2), SetRelation::Incomparable);
    }

    #[test]
    fn requires_beyond_the_last_provides() {
        assert_eq!(cmp(&[1, 2, 3], &[3, 1000]), SetRelation::Incomparable);
        assert_eq!(cmp(&[1, 2, 3], &[1000]), SetRelation::Incomparable);
    }

    #[test]
    fn max_value_elements_compare() {
        // u32::MAX is a legitimate 32-bit value, equal to the sentinels.
        assert_eq!(cmp(&[5, u32::MAX], &[u32::MAX]), SetRelation::Superset);
        assert_eq!(cmp(&[5, u32::MAX], &[5, u32::MAX]), SetRelation::Equal);
        assert_eq!(cmp(&[5], &[u32::MAX]), SetRelation::Incomparable);
    }

    fn sorted_set(values: Vec<u32>) -> Vec<u32> {
        let mut v = values;
        v.sort_unstable();
        v.dedup();
        v
    }

    proptest! {
        #[test]
        fn agrees_with_set_semantics(
            a in prop::collection::vec(0u32..500, 1..400),
            b in prop::collection::vec(0u32..500, 1..40),
        ) {
            let v1 = sorted_set(a);
            let v2 = sorted_set(b);
            prop_assert_eq!(cmp(&v1, &v2), oracle(&v1, &v2));
        }

        #[test]
        fn antisymmetric(
            a in prop::collection::vec(0u32..200, 1..100),
            b in prop::collection::vec(0u32..200, 1..100),
        ) {
            let v1 = sorted_set(a);
            let v2 = sorted_set(b);
            let ab = cmp(&v1, &v2);
            let ba = cmp(&v2, &v1);
            let flipped = match ab {
                SetRelation::Equal => SetRelation::Equal,
                SetRelation::Superset => SetRelation::Subset,
                SetRelation::Subset => SetRelation::Superset,
                SetRelation::Incomparable => SetRelation::Incomparable,
            };
            prop_assert_eq!(ba, flipped);
        }
    }
}
