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

//! Building a set-string from symbol names.
//!
//! Symbols are hashed to full 32-bit values when added; encoding masks them
//! to the requested width, so one bag can be encoded at several widths.
//! Hash collisions simply collapse, which is the whole premise of the
//! format: a membership test with a bounded false-positive rate. Distinct
//! names that collapse are still worth a warning, since each one weakens
//! the Provides string by an entry.

use crate::encoding::codec;
use crate::error::Result;

/// Jenkins' one-at-a-time hash of a symbol name.
pub fn symbol_hash(sym: &str) -> u32 {
    let mut hash: u32 = 0x9e3779b9;
    for &b in sym.as_bytes() {
        hash = hash.wrapping_add(u32::from(b));
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}

fn hash_mask(bpp: u32) -> u32 {
    if bpp < 32 {
        (1u32 << bpp) - 1
    } else {
        u32::MAX
    }
}

/// A bag of symbol names and their hashes, ready to encode.
#[derive(Debug, Default, Clone)]
pub struct SymbolSet {
    syms: Vec<(String, u32)>,
}

impl SymbolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one symbol. Duplicates are fine; they collapse on encode.
    pub fn add(&mut self, sym: &str) {
        self.syms.push((sym.to_string(), symbol_hash(sym)));
    }

    /// Number of symbols added so far, duplicates included.
    pub fn len(&self) -> usize {
        self.syms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syms.is_empty()
    }

    /// Adjacent pairs of distinct symbol names whose hashes coincide once
    /// masked to `bpp` bits. Such symbols become a single set element, so
    /// a Requires match on either one is satisfied by the other.
    pub fn collisions(&self, bpp: u32) -> Vec<(&str, &str)> {
        let mask = hash_mask(bpp);
        let mut sv: Vec<(u32, &str)> = self
            .syms
            .iter()
            .map(|(sym, hash)| (hash & mask, sym.as_str()))
            .collect();
        sv.sort_unstable();
        sv.windows(2)
            .filter(|w| w[0].0 == w[1].0 && w[0].1 != w[1].1)
            .map(|w| (w[0].1, w[1].1))
            .collect()
    }

    /// Masks the hashes to `bpp` bits, sorts, deduplicates and encodes,
    /// warning on stderr about any distinct names that collapsed.
    pub fn encode(&self, bpp: u32) -> Result<String> {
        for (a, b) in self.collisions(bpp) {
            eprintln!("warning: hash collision: {a} {b}");
        }
        let mask = hash_mask(bpp);
        let mut v: Vec<u32> = self.syms.iter().map(|(_, hash)| hash & mask).collect();
        v.sort_unstable();
        v.dedup();
        codec::encode(&v, bpp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::codec::decode;

    #[test]
    fn hash_is_stable() {
        // Pinned so stored Provides strings keep verifying.
        assert_eq!(symbol_hash(""), 0xecd739e9);
        assert_eq!(symbol_hash("malloc"), 0x07c1b8ff);
        assert_ne!(symbol_hash("malloc"), symbol_hash("free"));
    }

    #[test]
    fn encodes_sorted_unique_masked_hashes() {
        let mut set = SymbolSet::new();
        for sym in ["open", "close", "read", "write", "open"] {
            set.add(sym);
        }
        assert_eq!(set.len(), 5);
        let s = set.encode(16).unwrap();
        let (v, bpp) = decode(&s).unwrap();
        assert_eq!(bpp, 16);
        // The duplicate "open" collapsed.
        assert_eq!(v.len(), 4);
        assert!(v.windows(2).all(|w| w[0] < w[1]));
        let mut expected: Vec<u32> = ["open", "close", "read", "write"]
            .iter()
            .map(|sym| symbol_hash(sym) & 0xffff)
            .collect();
        expected.sort_unstable();
        assert_eq!(v, expected);
    }

    #[test]
    fn empty_bags_do_not_encode() {
        assert_eq!(SymbolSet::new().encode(16).unwrap_err().code(), -1);
    }

    #[test]
    fn distinct_names_colliding_at_the_masked_width_are_reported() {
        // These two hash apart at 32 bits but meet once masked to 12.
        assert_eq!(symbol_hash("sym86") & 0xfff, symbol_hash("sym157") & 0xfff);
        let mut set = SymbolSet::new();
        for sym in ["sym1", "sym86", "sym157"] {
            set.add(sym);
        }
        assert_eq!(set.collisions(12), [("sym157", "sym86")]);
        assert!(set.collisions(32).is_empty());
        // A repeated name is a duplicate, not a collision.
        set.add("sym86");
        assert_eq!(set.collisions(12).len(), 1);
        // The colliding pair collapses to one set element.
        let (v, _) = decode(&set.encode(12).unwrap()).unwrap();
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn requires_subset_of_provides() {
        let mut provides = SymbolSet::new();
        for sym in ["a", "b", "c", "d", "e", "f"] {
            provides.add(sym);
        }
        let mut requires = SymbolSet::new();
        requires.add("b");
        requires.add("e");
        let p = provides.encode(20).unwrap();
        let r = requires.encode(20).unwrap();
        let relation = crate::setcmp::compare(None, &p, &r).unwrap();
        assert_eq!(relation.as_i32(), 1);
    }
}
