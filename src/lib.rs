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

//! Compact textual set-strings for sets of unsigned integers, and the
//! subset/superset comparison over them.
//!
//! A package's exported symbols are hashed into a sorted set and encoded
//! as a short alphanumeric string (the "Provides" side); the symbols a
//! package needs become another such string ("Requires"). Dependency
//! resolution then reduces to [`compare`], which answers whether
//! Requires ⊆ Provides without materializing symbol names at all.
//!
//! The encoding is delta + Golomb–Rice over base-62 armor and sits close
//! to the entropy bound for uniform hashes, around two characters per
//! value at typical densities.
//!
//! ```
//! use setstring::{compare, encode, SetRelation};
//!
//! let provides = encode(&[10, 20, 30, 40], 16)?;
//! let requires = encode(&[20, 40], 16)?;
//! assert_eq!(compare(None, &provides, &requires)?, SetRelation::Superset);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cache;
pub mod compare;
pub mod downsample;
pub mod encoding;
pub mod error;
pub mod setcmp;
pub mod symbols;

pub use cache::DecodeCache;
pub use compare::{SetRelation, SENTINELS};
pub use encoding::codec::{
    decode, decode_init, encode, encode_init, EncodeParams, Header, MAX_BPP, MIN_BPP,
};
pub use error::{Result, SetStringError};
pub use setcmp::{compare, CompareError};
pub use symbols::SymbolSet;
