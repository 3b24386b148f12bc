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

use snafu::prelude::*;
use snafu::Location;

/// Everything that can go wrong while encoding or decoding a set-string.
///
/// Each variant maps to a stable negative integer via [`SetStringError::code`],
/// preserving the wire-visible conventions of the reference implementation
/// (per-operation numbering: encode and decode reuse the small codes).
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SetStringError {
    #[snafu(display("Cannot encode an empty set"))]
    EmptySet {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Bits per value {} out of range 7..=32", bpp))]
    BppOutOfRange {
        bpp: u32,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Largest value {} does not fit in {} bits", value, bpp))]
    LastValueOutOfRange {
        value: u32,
        bpp: u32,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display(
        "Largest value {} is impossible for {} strictly increasing values",
        value,
        count,
    ))]
    LastValueTooSmall {
        value: u32,
        count: usize,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display(
        "Set of {} values too dense for bpp {} with Rice parameter {}",
        count,
        bpp,
        m,
    ))]
    SetTooDense {
        count: usize,
        bpp: u32,
        m: u32,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Input values not strictly increasing at index {}", index))]
    NotIncreasing {
        index: usize,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Value {} at index {} does not fit in {} bits", value, index, bpp))]
    ValueOutOfRange {
        value: u32,
        index: usize,
        bpp: u32,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Set-string of {} bytes is too short", len))]
    StringTooShort {
        len: usize,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Invalid bits-per-value character {:?}", ch))]
    BadBppChar {
        ch: char,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Invalid Rice parameter character {:?}", ch))]
    BadParamChar {
        ch: char,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Rice parameter {} not below bits per value {}", m, bpp))]
    ParamOutOfOrder {
        m: u32,
        bpp: u32,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Invalid character pair {:?} {:?} in payload", c1, c2))]
    CorruptChar {
        c1: char,
        c2: char,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Payload ends in the middle of a value"))]
    TruncatedPayload {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("{} unused trailing zero bits exceed the allowed 5", q))]
    TrailingBits {
        q: u32,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Unary quotient exceeds the {}-value budget", budget))]
    QuotientOverflow {
        budget: u32,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Decoded value {} outside the {}-bit range", value, bpp))]
    ValueOverflow {
        value: i64,
        bpp: u32,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Payload encodes more than {} values", max))]
    TooManyValues {
        max: usize,
        #[snafu(implicit)]
        location: Location,
    },
}

impl SetStringError {
    /// Stable numeric code, negative, following the reference conventions.
    ///
    /// Encode preflight: -1..=-5; encode sequence: -11/-12; decode header:
    /// -1..=-4; decode payload: -20..=-25.
    pub fn code(&self) -> i32 {
        match self {
            Self::EmptySet { .. } => -1,
            Self::BppOutOfRange { .. } => -2,
            Self::LastValueOutOfRange { .. } => -3,
            Self::LastValueTooSmall { .. } => -4,
            Self::SetTooDense { .. } => -5,
            Self::NotIncreasing { .. } => -11,
            Self::ValueOutOfRange { .. } => -12,
            Self::BadBppChar { .. } => -1,
            Self::BadParamChar { .. } => -2,
            Self::ParamOutOfOrder { .. } => -3,
            Self::StringTooShort { .. } => -4,
            Self::TruncatedPayload { .. } => -20,
            Self::CorruptChar { .. } => -21,
            Self::TrailingBits { .. } => -22,
            Self::QuotientOverflow { .. } => -23,
            Self::ValueOverflow { .. } => -24,
            Self::TooManyValues { .. } => -25,
        }
    }
}

pub type Result<T, E = SetStringError> = std::result::Result<T, E>;
