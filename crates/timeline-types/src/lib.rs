// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Identifier and keyword vocabulary for the timeline query layer.
//!
//! Everything a route path segment can denote lives here: fixed-width hex
//! identifiers, base32 addresses, and the keyword sets of the timeline
//! grammar. Recognizers (`is_*`) answer shape questions without allocating;
//! parsers return the normalized value or a typed [`ParseError`].

mod address;
mod base32;
mod error;
mod ids;
mod keywords;

pub use address::{is_base32_address, is_hex_address, Address, ADDRESS_LENGTH};
pub use error::ParseError;
pub use ids::{
    is_hex_hash, is_hex_mosaic_id, is_hex_namespace_id, is_hex_object_id, is_hex_public_key,
    Hash256, MosaicId, NamespaceId, ObjectId, PublicKey,
};
pub use keywords::{Duration, Extreme, SentinelSet, TransactionType, TransferFilter};

/// Strict decimal parse for unsigned path segments.
///
/// `u64::from_str` already rejects signs, whitespace, and stray characters
/// (`"0X"`, `"25 "`), which is exactly the strictness the route grammar
/// requires.
pub fn parse_uint(segment: &str) -> Result<u64, ParseError> {
    segment
        .parse::<u64>()
        .map_err(|_| ParseError::InvalidInteger(segment.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uint_accepts_plain_decimal() {
        assert_eq!(parse_uint("0").unwrap(), 0);
        assert_eq!(parse_uint("1234567890").unwrap(), 1234567890);
    }

    #[test]
    fn test_parse_uint_rejects_garbage() {
        for bad in ["", "0X", "+1", "-1", " 1", "1 ", "12a", "0x10"] {
            assert!(parse_uint(bad).is_err(), "{bad:?} should not parse");
        }
    }
}
