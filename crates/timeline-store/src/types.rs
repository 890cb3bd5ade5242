// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use timeline_types::{
    Address, Hash256, MosaicId, NamespaceId, ObjectId, PublicKey, TransactionType,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInfo {
    pub height: u64,
    pub hash: Hash256,
    pub signer_public_key: PublicKey,
    pub timestamp: u64,
    pub fee_multiplier: u32,
    pub transaction_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMeta {
    pub height: u64,
    /// Position within the containing block.
    pub index: i32,
    pub id: ObjectId,
    pub hash: Hash256,
    /// Back-reference to the owning aggregate; `Some` marks an embedded
    /// sub-transaction, which never appears in a timeline page directly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate_id: Option<ObjectId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicAmount {
    pub id: MosaicId,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfo {
    pub meta: TransactionMeta,
    #[serde(rename = "type")]
    pub entity_type: TransactionType,
    pub signer_public_key: PublicKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Address>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub mosaics: Vec<MosaicAmount>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub cosignatories: Vec<Address>,
    /// Embedded sub-transactions, materialized at assembly time for
    /// aggregate parents.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub inner_transactions: Vec<TransactionInfo>,
}

impl TransactionInfo {
    /// Addresses the multisig subfilter joins against.
    pub fn participant_addresses(&self) -> impl Iterator<Item = &Address> {
        self.signer_address
            .iter()
            .chain(self.recipient.iter())
            .chain(self.cosignatories.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicInfo {
    pub id: ObjectId,
    pub mosaic_id: MosaicId,
    pub start_height: u64,
    pub owner_address: Address,
    pub supply: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NamespaceAlias {
    None,
    Mosaic(MosaicId),
    Address(Address),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceInfo {
    pub id: ObjectId,
    /// Path from the root; `levels[depth - 1]` is the namespace's own id.
    pub levels: Vec<NamespaceId>,
    pub start_height: u64,
    pub end_height: u64,
    pub active: bool,
    pub owner_address: Address,
    pub alias: NamespaceAlias,
}

impl NamespaceInfo {
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// The id of the namespace itself (deepest path level).
    pub fn own_id(&self) -> Option<NamespaceId> {
        self.levels.last().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Importance {
    pub value: u64,
    pub height: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityBucket {
    pub start_height: u64,
    pub total_fees_paid: u64,
    pub beneficiary_count: u32,
    pub raw_score: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub id: ObjectId,
    pub address: Address,
    pub public_key: PublicKey,
    pub public_key_height: u64,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub importances: Vec<Importance>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub activity_buckets: Vec<ActivityBucket>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub mosaics: Vec<MosaicAmount>,
}

impl AccountInfo {
    /// Most recent importance entry, or zero for never-scored accounts.
    pub fn importance(&self) -> u64 {
        self.importances.last().map_or(0, |i| i.value)
    }

    pub fn harvested_blocks(&self) -> u64 {
        self.activity_buckets.len() as u64
    }

    pub fn harvested_fees(&self) -> u64 {
        self.activity_buckets
            .iter()
            .map(|bucket| bucket.total_fees_paid)
            .sum()
    }

    pub fn balance_of(&self, mosaic: &MosaicId) -> u64 {
        self.mosaics
            .iter()
            .filter(|held| held.id == *mosaic)
            .map(|held| held.amount)
            .sum()
    }
}

/// One row of the multisig collection: an account together with the
/// multisig graph it participates in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigInfo {
    pub account_address: Address,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub cosignatory_addresses: Vec<Address>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub multisig_addresses: Vec<Address>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(importances: Vec<Importance>, buckets: Vec<ActivityBucket>) -> AccountInfo {
        AccountInfo {
            id: ObjectId::MIN,
            address: Address([0x68; 25]),
            public_key: PublicKey::MIN,
            public_key_height: 1,
            importances,
            activity_buckets: buckets,
            mosaics: vec![
                MosaicAmount {
                    id: MosaicId::from_u64(7),
                    amount: 100,
                },
                MosaicAmount {
                    id: MosaicId::from_u64(9),
                    amount: 25,
                },
                MosaicAmount {
                    id: MosaicId::from_u64(7),
                    amount: 11,
                },
            ],
        }
    }

    fn bucket(total_fees_paid: u64) -> ActivityBucket {
        ActivityBucket {
            start_height: 1,
            total_fees_paid,
            beneficiary_count: 0,
            raw_score: 0,
        }
    }

    #[test]
    fn test_importance_is_last_entry_or_zero() {
        assert_eq!(account(vec![], vec![]).importance(), 0);
        let scored = account(
            vec![
                Importance {
                    value: 5,
                    height: 10,
                },
                Importance {
                    value: 9,
                    height: 20,
                },
            ],
            vec![],
        );
        assert_eq!(scored.importance(), 9);
    }

    #[test]
    fn test_harvest_attributes() {
        let harvester = account(vec![], vec![bucket(10), bucket(32), bucket(0)]);
        assert_eq!(harvester.harvested_blocks(), 3);
        assert_eq!(harvester.harvested_fees(), 42);
    }

    #[test]
    fn test_balance_sums_matching_mosaic_entries() {
        let holder = account(vec![], vec![]);
        assert_eq!(holder.balance_of(&MosaicId::from_u64(7)), 111);
        assert_eq!(holder.balance_of(&MosaicId::from_u64(9)), 25);
        assert_eq!(holder.balance_of(&MosaicId::from_u64(8)), 0);
    }

    #[test]
    fn test_embedded_marker_serialization() {
        let meta = TransactionMeta {
            height: 4,
            index: 0,
            id: ObjectId::MIN,
            hash: Hash256::MIN,
            aggregate_id: None,
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert!(json.get("aggregateId").is_none());
    }
}
