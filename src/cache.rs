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

//! An LRU cache of decoded Provides strings.
//!
//! Provides strings repeat heavily during dependency resolution, and
//! decoding the big ones dominates; a cache of a couple hundred entries
//! reaches hit ratios around 75%. Two policies depart from plain LRU:
//! a hit moves the entry only a bounded distance toward the front (and
//! not at all when it already sits in the front region), and a first-time
//! insertion lands near the back of the list, so that one-shot strings
//! cannot wash out the hot region.
//!
//! Lookup scans a dense array of 16-bit key digests with the searched
//! digest planted one past the live entries, so the scan needs no count
//! check; a digest match is verified against the full string.

use crate::compare::{install_sentinels, SENTINELS};
use crate::encoding::codec;
use crate::error::Result;

/// Entry capacity; one more digest slot serves as the scan sentinel.
pub const CACHE_SIZE: usize = 254;

/// Where first-time insertions land once the cache is full.
const PIVOT: usize = CACHE_SIZE * 7 / 8;

/// Upper bound on how far a hit entry moves toward the front.
const MOVE_STEP: usize = 32;

struct CacheEntry {
    key: Box<str>,
    /// Number of decoded values; the block holds `n + SENTINELS` slots.
    n: usize,
    v: Box<[u32]>,
}

/// Decoded-Provides cache. A plain value with no hidden globals: keep one
/// per resolution pass, or one per thread.
pub struct DecodeCache {
    /// Key digests, parallel to `entries`, plus the sentinel slot.
    hv: [u16; CACHE_SIZE + 1],
    entries: Vec<CacheEntry>,
}

impl Default for DecodeCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodeCache {
    pub fn new() -> Self {
        Self {
            hv: [0; CACHE_SIZE + 1],
            entries: Vec::new(),
        }
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 16-bit digest of a set-string: four payload bytes past the
    /// parameter characters (zero-padded when shorter), spread by the
    /// Knuth multiplier, salted with the length.
    fn digest(s: &str) -> u16 {
        let bytes = s.as_bytes();
        let mut word = [0u8; 4];
        for (slot, &b) in word.iter_mut().zip(bytes.iter().skip(4)) {
            *slot = b;
        }
        let h = u32::from_le_bytes(word)
            .wrapping_mul(2654435761)
            .wrapping_add((bytes.len() as u32) << 16);
        (h >> 16) as u16
    }

    /// Returns the decoded values for `s`, decoding and caching on a miss.
    ///
    /// The returned slice holds the `n` values followed by the sentinel
    /// run ([`SENTINELS`] copies of `u32::MAX`); it borrows from the cache
    /// and must not outlive the next call. Decode failures propagate and
    /// are never cached.
    pub fn decode(&mut self, s: &str) -> Result<(&[u32], usize)> {
        let digest = Self::digest(s);
        let count = self.entries.len();
        self.hv[count] = digest;
        let mut i = 0;
        let pos = loop {
            // Quicker sequential search: four probes per round, no bounds
            // test thanks to the sentinel digest.
            loop {
                if self.hv[i] == digest {
                    break;
                }
                if self.hv[i + 1] == digest {
                    i += 1;
                    break;
                }
                if self.hv[i + 2] == digest {
                    i += 2;
                    break;
                }
                if self.hv[i + 3] == digest {
                    i += 3;
                    break;
                }
                i += 4;
            }
            if i == count {
                break self.insert(s, digest)?;
            }
            if self.entries[i].key.as_ref() != s {
                // Digest collision, resume the scan.
                i += 1;
                continue;
            }
            // Hit: an entry deep in the list is pulled up by exactly
            // MOVE_STEP; one already inside the front region stays put.
            if i > MOVE_STEP {
                let to = i - MOVE_STEP;
                self.hv.copy_within(to..i, to + 1);
                self.hv[to] = digest;
                self.entries[to..=i].rotate_right(1);
                break to;
            }
            break i;
        };
        let entry = &self.entries[pos];
        Ok((&entry.v[..], entry.n))
    }

    fn insert(&mut self, s: &str, digest: u16) -> Result<usize> {
        let header = codec::decode_init(s)?;
        let mut values = Vec::with_capacity(header.max_values + SENTINELS);
        let n = codec::decode_into(s, &mut values)?;
        install_sentinels(&mut values);
        let entry = CacheEntry {
            key: s.into(),
            n,
            v: values.into_boxed_slice(),
        };
        if self.entries.len() < CACHE_SIZE {
            self.hv[self.entries.len()] = digest;
            self.entries.push(entry);
            Ok(self.entries.len() - 1)
        } else {
            // Evict the tail, insert at the pivot.
            self.entries.pop();
            self.entries.insert(PIVOT, entry);
            self.hv.copy_within(PIVOT..CACHE_SIZE - 1, PIVOT + 1);
            self.hv[PIVOT] = digest;
            Ok(PIVOT)
        }
    }
}
