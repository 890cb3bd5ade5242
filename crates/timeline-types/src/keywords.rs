// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use crate::ParseError;

/// Paging direction relative to the anchor: `from` pages strictly below it,
/// `since` strictly above. Both are non-inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Duration {
    From,
    Since,
}

impl Duration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Duration::From => "from",
            Duration::Since => "since",
        }
    }
}

impl FromStr for Duration {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "from" => Ok(Duration::From),
            "since" => Ok(Duration::Since),
            _ => Err(ParseError::UnknownKeyword(s.to_owned())),
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An extreme of a family's sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extreme {
    Min,
    Max,
}

/// Which sentinel aliases a family accepts.
///
/// Time-sorted families speak `earliest`/`latest`, quantity-sorted families
/// `least`/`most`; the bare `min`/`max` work for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentinelSet {
    Time,
    Quantity,
}

impl SentinelSet {
    pub fn parse(&self, s: &str) -> Option<Extreme> {
        match (self, s) {
            (_, "min") => Some(Extreme::Min),
            (_, "max") => Some(Extreme::Max),
            (SentinelSet::Time, "earliest") => Some(Extreme::Min),
            (SentinelSet::Time, "latest") => Some(Extreme::Max),
            (SentinelSet::Quantity, "least") => Some(Extreme::Min),
            (SentinelSet::Quantity, "most") => Some(Extreme::Max),
            _ => None,
        }
    }
}

/// Transaction entity types addressable through the `/type/:type` segment.
///
/// The discriminant is the 16-bit wire code; the route keyword is the
/// camelCase name used by the path grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum TransactionType {
    Transfer = 0x4154,
    RegisterNamespace = 0x414e,
    MosaicDefinition = 0x414d,
    MosaicSupplyChange = 0x424d,
    ModifyMultisig = 0x4155,
    AggregateComplete = 0x4141,
    AggregateBonded = 0x4241,
    HashLock = 0x4148,
    SecretLock = 0x4152,
    SecretProof = 0x4252,
}

impl TransactionType {
    const ALL: [(TransactionType, &'static str); 10] = [
        (TransactionType::Transfer, "transfer"),
        (TransactionType::RegisterNamespace, "registerNamespace"),
        (TransactionType::MosaicDefinition, "mosaicDefinition"),
        (TransactionType::MosaicSupplyChange, "mosaicSupplyChange"),
        (TransactionType::ModifyMultisig, "modifyMultisig"),
        (TransactionType::AggregateComplete, "aggregateComplete"),
        (TransactionType::AggregateBonded, "aggregateBonded"),
        (TransactionType::HashLock, "hashLock"),
        (TransactionType::SecretLock, "secretLock"),
        (TransactionType::SecretProof, "secretProof"),
    ];

    pub fn code(&self) -> u16 {
        *self as u16
    }

    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(ty, _)| ty.code() == code)
            .map(|(ty, _)| *ty)
    }

    pub fn keyword(&self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(ty, _)| ty == self)
            .map(|(_, kw)| *kw)
            .unwrap_or("unknown")
    }

    /// Whether the type owns embedded sub-transactions.
    pub fn is_aggregate(&self) -> bool {
        matches!(
            self,
            TransactionType::AggregateComplete | TransactionType::AggregateBonded
        )
    }
}

impl FromStr for TransactionType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|(_, kw)| *kw == s)
            .map(|(ty, _)| *ty)
            .ok_or_else(|| ParseError::UnknownKeyword(s.to_owned()))
    }
}

impl serde::Serialize for TransactionType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code())
    }
}

impl<'de> serde::Deserialize<'de> for TransactionType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u16::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown transaction type {code:#06x}")))
    }
}

/// Subfilter applied on top of the transfer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferFilter {
    /// Transfers carrying at least one mosaic outside the well-known set.
    Mosaic,
    /// Transfers whose participants join to at least one multisig account.
    Multisig,
}

impl FromStr for TransferFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mosaic" => Ok(TransferFilter::Mosaic),
            "multisig" => Ok(TransferFilter::Multisig),
            _ => Err(ParseError::UnknownKeyword(s.to_owned())),
        }
    }
}
