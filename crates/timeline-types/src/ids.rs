// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use crate::ParseError;

fn decode_fixed_hex<const N: usize>(s: &str) -> Result<[u8; N], ParseError> {
    if s.len() != N * 2 {
        return Err(ParseError::WrongHexLength {
            expected: N * 2,
            actual: s.len(),
        });
    }
    let mut bytes = [0u8; N];
    hex::decode_to_slice(s, &mut bytes).map_err(|_| ParseError::InvalidHex(s.to_owned()))?;
    Ok(bytes)
}

fn is_fixed_hex(s: &str, chars: usize) -> bool {
    s.len() == chars && s.bytes().all(|b| b.is_ascii_hexdigit())
}

macro_rules! hex_id {
    ($(#[$doc:meta])* $name:ident, $len:expr, $recognizer:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            pub const LENGTH: usize = $len;
            pub const MIN: Self = Self([0x00; $len]);
            pub const MAX: Self = Self([0xff; $len]);

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode_upper(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self)
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                decode_fixed_hex::<$len>(s).map(Self)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }

        /// Shape check: exactly the right number of hex digits.
        pub fn $recognizer(s: &str) -> bool {
            is_fixed_hex(s, $len * 2)
        }
    };
}

hex_id!(
    /// Opaque 12-byte internal document id.
    ///
    /// Only ever a tie-breaker in sort keys; its time prefix can wrap, so it
    /// must never carry the primary ordering on its own.
    ObjectId,
    12,
    is_hex_object_id
);

hex_id!(
    /// 8-byte mosaic identifier.
    MosaicId,
    8,
    is_hex_mosaic_id
);

hex_id!(
    /// 8-byte namespace identifier.
    NamespaceId,
    8,
    is_hex_namespace_id
);

hex_id!(
    /// 32-byte entity hash.
    Hash256,
    32,
    is_hex_hash
);

hex_id!(
    /// 32-byte signer public key.
    PublicKey,
    32,
    is_hex_public_key
);

impl MosaicId {
    pub const fn from_u64(value: u64) -> Self {
        Self(value.to_be_bytes())
    }
}

impl NamespaceId {
    pub const fn from_u64(value: u64) -> Self {
        Self(value.to_be_bytes())
    }
}
