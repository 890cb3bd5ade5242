// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

/// Failure to turn a path segment into a typed value.
///
/// Every variant maps to the invalid-argument outcome at the route boundary.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("expected {expected} hex characters, got {actual}")]
    WrongHexLength { expected: usize, actual: usize },

    #[error("invalid hex digit in {0:?}")]
    InvalidHex(String),

    #[error("expected 39-40 base32 characters, got {0}")]
    WrongBase32Length(usize),

    #[error("invalid base32 character {0:?}")]
    InvalidBase32Character(char),

    #[error("address has network byte {actual:#04x}, expected {expected:#04x}")]
    WrongNetwork { expected: u8, actual: u8 },

    #[error("invalid unsigned integer {0:?}")]
    InvalidInteger(String),

    #[error("unrecognized keyword {0:?}")]
    UnknownKeyword(String),

    #[error("unrecognized anchor {0:?}")]
    UnrecognizedAnchor(String),
}
