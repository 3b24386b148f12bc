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

//! Comparison of two set-strings.
//!
//! Decodes both sides, brings them to a common bit width by downsampling
//! the wider one, and runs the merge comparator. The Provides side is the
//! one worth caching: big Provides strings recur across a resolution pass,
//! while Requires strings are small and mostly unique.

use snafu::prelude::*;

use crate::cache::DecodeCache;
use crate::compare::{install_sentinels, set_cmp, SetRelation, SENTINELS};
use crate::downsample::downsample;
use crate::encoding::codec;
use crate::error::SetStringError;

/// Provides strings with more values than this go through the decode cache
/// when one is supplied.
pub const CACHE_THRESHOLD: usize = 256;

/// A comparison failure, attributed to one side; the other side's payload
/// is not inspected.
#[derive(Debug, Snafu)]
pub enum CompareError {
    #[snafu(display("Provides set-string: {}", source))]
    Provides { source: SetStringError },

    #[snafu(display("Requires set-string: {}", source))]
    Requires { source: SetStringError },
}

impl CompareError {
    /// The wire-visible code: -11 for the Provides side, -12 for Requires.
    pub fn as_i32(&self) -> i32 {
        match self {
            CompareError::Provides { .. } => -11,
            CompareError::Requires { .. } => -12,
        }
    }
}

/// Compares the sets behind two set-strings, Provides against Requires.
///
/// With `Some(cache)`, big Provides strings are decoded through the cache;
/// the result is identical either way.
pub fn compare(
    cache: Option<&mut DecodeCache>,
    provides: &str,
    requires: &str,
) -> Result<SetRelation, CompareError> {
    let h1 = codec::decode_init(provides).context(ProvidesSnafu)?;
    let h2 = codec::decode_init(requires).context(RequiresSnafu)?;
    let common_bpp = h1.bpp.min(h2.bpp);

    let mut v2 = Vec::with_capacity(h2.max_values);
    codec::decode_into(requires, &mut v2).context(RequiresSnafu)?;
    if h2.bpp > common_bpp {
        v2 = downsample(v2, h2.bpp, common_bpp);
    }

    // Decode Provides, with sentinels in place for the comparator.
    let use_cache = h1.max_values > CACHE_THRESHOLD;
    match cache {
        Some(cache) if use_cache => {
            let (cached, n1) = cache.decode(provides).context(ProvidesSnafu)?;
            if h1.bpp > common_bpp {
                // Cached entries are immutable; downsample into a copy.
                let mut v1 = downsample(cached[..n1].to_vec(), h1.bpp, common_bpp);
                let n1 = v1.len();
                install_sentinels(&mut v1);
                Ok(set_cmp(&v1, n1, &v2))
            } else {
                Ok(set_cmp(cached, n1, &v2))
            }
        }
        _ => {
            let mut v1 = Vec::with_capacity(h1.max_values + SENTINELS);
            codec::decode_into(provides, &mut v1).context(ProvidesSnafu)?;
            if h1.bpp > common_bpp {
                v1 = downsample(v1, h1.bpp, common_bpp);
            }
            let n1 = v1.len();
            install_sentinels(&mut v1);
            Ok(set_cmp(&v1, n1, &v2))
        }
    }
}
