// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Composite sort keys.
//!
//! Every family orders its rows by a short tuple of typed parts compared
//! lexicographically; "strictly before/after the anchor" is plain `Ord` on
//! [`SortKey`]. Sentinel keys are built from explicit per-width constants
//! rather than type metadata, keeping the algebra total.

use std::cmp::Ordering;

use timeline_types::ObjectId;

use crate::{AccountInfo, AccountRanking, TransactionInfo};

/// One position of a composite sort key.
///
/// Within a family, parts at the same position always carry the same
/// variant; the cross-variant ordering exists only to keep `Ord` total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPart {
    U64(u64),
    I64(i64),
    Id(ObjectId),
}

impl KeyPart {
    fn rank(&self) -> u8 {
        match self {
            KeyPart::U64(_) => 0,
            KeyPart::I64(_) => 1,
            KeyPart::Id(_) => 2,
        }
    }
}

impl Ord for KeyPart {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (KeyPart::U64(a), KeyPart::U64(b)) => a.cmp(b),
            (KeyPart::I64(a), KeyPart::I64(b)) => a.cmp(b),
            (KeyPart::Id(a), KeyPart::Id(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for KeyPart {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lexicographically ordered composite key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey(pub Vec<KeyPart>);

impl SortKey {
    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }
}

// Transactions: (block height, intra-block index). The sentinels bracket
// every real row: min sorts before (h, 0) for any h, max sorts after every
// (h, i) because no height reaches u64::MAX.
pub fn transaction_key(tx: &TransactionInfo) -> SortKey {
    SortKey(vec![
        KeyPart::U64(tx.meta.height),
        KeyPart::I64(i64::from(tx.meta.index)),
    ])
}

pub fn transaction_key_min() -> SortKey {
    SortKey(vec![KeyPart::U64(0), KeyPart::I64(-1)])
}

pub fn transaction_key_max() -> SortKey {
    SortKey(vec![KeyPart::U64(u64::MAX), KeyPart::I64(0)])
}

// Mosaics and namespaces: (start height, internal id).
pub fn start_height_key(start_height: u64, id: ObjectId) -> SortKey {
    SortKey(vec![KeyPart::U64(start_height), KeyPart::Id(id)])
}

pub fn start_height_key_min() -> SortKey {
    start_height_key(0, ObjectId::MIN)
}

pub fn start_height_key_max() -> SortKey {
    start_height_key(u64::MAX, ObjectId::MAX)
}

impl AccountRanking {
    /// The ephemeral computed attribute tuple for one account.
    pub fn sort_key(&self, account: &AccountInfo) -> SortKey {
        let tail = [
            KeyPart::U64(account.public_key_height),
            KeyPart::Id(account.id),
        ];
        match self {
            AccountRanking::Importance => {
                let mut parts = vec![KeyPart::U64(account.importance())];
                parts.extend(tail);
                SortKey(parts)
            }
            AccountRanking::HarvestedBlocks => {
                let mut parts = vec![KeyPart::U64(account.harvested_blocks())];
                parts.extend(tail);
                SortKey(parts)
            }
            AccountRanking::HarvestedFees => {
                let mut parts = vec![
                    KeyPart::U64(account.harvested_fees()),
                    KeyPart::U64(account.harvested_blocks()),
                ];
                parts.extend(tail);
                SortKey(parts)
            }
            AccountRanking::MosaicBalance(mosaic) => {
                let mut parts = vec![KeyPart::U64(account.balance_of(mosaic))];
                parts.extend(tail);
                SortKey(parts)
            }
        }
    }

    pub fn key_min(&self) -> SortKey {
        let zeros = match self {
            AccountRanking::HarvestedFees => 3,
            _ => 2,
        };
        let mut parts = vec![KeyPart::U64(0); zeros];
        parts.push(KeyPart::Id(ObjectId::MIN));
        SortKey(parts)
    }

    pub fn key_max(&self) -> SortKey {
        let maxes = match self {
            AccountRanking::HarvestedFees => 3,
            _ => 2,
        };
        let mut parts = vec![KeyPart::U64(u64::MAX); maxes];
        parts.push(KeyPart::Id(ObjectId::MAX));
        SortKey(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransactionMeta;
    use timeline_types::{Hash256, PublicKey, TransactionType};

    fn tx(height: u64, index: i32) -> TransactionInfo {
        TransactionInfo {
            meta: TransactionMeta {
                height,
                index,
                id: ObjectId::MIN,
                hash: Hash256::MIN,
                aggregate_id: None,
            },
            entity_type: TransactionType::Transfer,
            signer_public_key: PublicKey::MIN,
            signer_address: None,
            recipient: None,
            mosaics: vec![],
            cosignatories: vec![],
            inner_transactions: vec![],
        }
    }

    #[test]
    fn test_transaction_key_orders_by_height_then_index() {
        let a = transaction_key(&tx(10, 3));
        let b = transaction_key(&tx(10, 4));
        let c = transaction_key(&tx(11, 0));
        assert!(a < b && b < c);
    }

    #[test]
    fn test_transaction_sentinels_bracket_every_row() {
        for (height, index) in [(1, 0), (1, 25), (u64::MAX - 1, i32::MAX)] {
            let key = transaction_key(&tx(height, index));
            assert!(transaction_key_min() < key, "min !< ({height},{index})");
            assert!(key < transaction_key_max(), "({height},{index}) !< max");
        }
    }

    #[test]
    fn test_start_height_key_breaks_ties_by_id() {
        let low = start_height_key(5, ObjectId([1; 12]));
        let high = start_height_key(5, ObjectId([2; 12]));
        assert!(low < high);
        assert!(start_height_key_min() < low);
        assert!(high < start_height_key_max());
    }

    #[test]
    fn test_lex_order_is_strict_on_prefix() {
        // (6, min-id) sorts after every (5, id) regardless of the id part.
        let five = start_height_key(5, ObjectId::MAX);
        let six = start_height_key(6, ObjectId::MIN);
        assert!(five < six);
    }
}
