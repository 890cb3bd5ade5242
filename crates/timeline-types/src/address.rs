// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use crate::base32;
use crate::ParseError;

pub const ADDRESS_LENGTH: usize = 25;

/// 25-byte account address: one network byte followed by the account hash
/// and checksum.
///
/// The canonical textual form is 40 characters of unpadded base32; the raw
/// form doubles as 50 hex characters in route segments.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; ADDRESS_LENGTH]);

impl Address {
    pub fn network(&self) -> u8 {
        self.0[0]
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Parse the 40-character base32 form.
    pub fn from_base32(s: &str) -> Result<Self, ParseError> {
        if !(39..=40).contains(&s.len()) {
            return Err(ParseError::WrongBase32Length(s.len()));
        }
        let bytes = base32::decode(s)?;
        let raw: [u8; ADDRESS_LENGTH] = bytes
            .try_into()
            .map_err(|_| ParseError::WrongBase32Length(s.len()))?;
        Ok(Self(raw))
    }

    /// Parse the 50-character hex form.
    pub fn from_hex(s: &str) -> Result<Self, ParseError> {
        if s.len() != ADDRESS_LENGTH * 2 {
            return Err(ParseError::WrongHexLength {
                expected: ADDRESS_LENGTH * 2,
                actual: s.len(),
            });
        }
        let mut raw = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(s, &mut raw).map_err(|_| ParseError::InvalidHex(s.to_owned()))?;
        Ok(Self(raw))
    }

    pub fn require_network(self, expected: u8) -> Result<Self, ParseError> {
        if self.network() == expected {
            Ok(self)
        } else {
            Err(ParseError::WrongNetwork {
                expected,
                actual: self.network(),
            })
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base32::encode(&self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl serde::Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Address::from_base32(&raw).map_err(serde::de::Error::custom)
    }
}

/// Shape check for the base32 textual form (39-40 alphabet characters).
///
/// A 39-character string passes the shape check but cannot decode into 25
/// whole bytes, so the parser will still reject it; the split keeps anchor
/// classification (shape) separate from validation.
pub fn is_base32_address(s: &str) -> bool {
    (39..=40).contains(&s.len())
        && s.bytes()
            .all(|b| b.is_ascii_uppercase() || (b'2'..=b'7').contains(&b))
}

/// Shape check for the 50-character hex form.
pub fn is_hex_address(s: &str) -> bool {
    s.len() == ADDRESS_LENGTH * 2 && s.bytes().all(|b| b.is_ascii_hexdigit())
}
