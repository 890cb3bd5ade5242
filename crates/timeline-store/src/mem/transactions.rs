// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Transaction pages and lookups.
//!
//! Pages only ever contain top-level rows; embedded sub-transactions (rows
//! carrying an `aggregate_id` back-reference) are filtered out before the
//! range predicate and re-attached to their parents at assembly time.

use std::collections::HashMap;

use timeline_types::{Address, Hash256, ObjectId, TransactionType};

use crate::key::transaction_key;
use crate::mem::page::{page_after, page_before};
use crate::{MultisigInfo, SortKey, TransactionFilter, TransactionInfo};

fn matches_filter(
    tx: &TransactionInfo,
    filter: &TransactionFilter,
    multisig: &HashMap<Address, MultisigInfo>,
) -> bool {
    if tx.meta.aggregate_id.is_some() {
        return false;
    }
    match filter {
        TransactionFilter::Any => true,
        TransactionFilter::ByType(entity_type) => tx.entity_type == *entity_type,
        TransactionFilter::TransferWithCustomMosaic { well_known } => {
            tx.entity_type == TransactionType::Transfer
                && tx
                    .mosaics
                    .iter()
                    .any(|attached| !well_known.contains(&attached.id))
        }
        TransactionFilter::TransferWithMultisig => {
            tx.entity_type == TransactionType::Transfer
                && tx
                    .participant_addresses()
                    .any(|address| multisig.contains_key(address))
        }
    }
}

pub(crate) fn transactions_from(
    rows: &[TransactionInfo],
    multisig: &HashMap<Address, MultisigInfo>,
    filter: &TransactionFilter,
    anchor: &SortKey,
    count: usize,
) -> Vec<TransactionInfo> {
    page_before(
        rows.iter()
            .filter(|tx| matches_filter(tx, filter, multisig))
            .cloned(),
        transaction_key,
        anchor,
        count,
    )
}

pub(crate) fn transactions_since(
    rows: &[TransactionInfo],
    multisig: &HashMap<Address, MultisigInfo>,
    filter: &TransactionFilter,
    anchor: &SortKey,
    count: usize,
) -> Vec<TransactionInfo> {
    page_after(
        rows.iter()
            .filter(|tx| matches_filter(tx, filter, multisig))
            .cloned(),
        transaction_key,
        anchor,
        count,
    )
}

pub(crate) fn by_hash<'a>(
    rows: &'a [TransactionInfo],
    hash: &Hash256,
) -> Option<&'a TransactionInfo> {
    rows.iter()
        .find(|tx| tx.meta.aggregate_id.is_none() && tx.meta.hash == *hash)
}

pub(crate) fn by_id<'a>(rows: &'a [TransactionInfo], id: &ObjectId) -> Option<&'a TransactionInfo> {
    rows.iter()
        .find(|tx| tx.meta.aggregate_id.is_none() && tx.meta.id == *id)
}

pub(crate) fn by_aggregate_ids(rows: &[TransactionInfo], ids: &[ObjectId]) -> Vec<TransactionInfo> {
    rows.iter()
        .filter(|tx| {
            tx.meta
                .aggregate_id
                .as_ref()
                .is_some_and(|parent| ids.contains(parent))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{transaction_key_max, transaction_key_min};
    use crate::TransactionMeta;
    use timeline_types::{MosaicId, PublicKey};

    fn address(tag: u8) -> Address {
        Address([tag; 25])
    }

    fn tx(height: u64, index: i32, entity_type: TransactionType) -> TransactionInfo {
        let mut id = [0u8; 12];
        id[..8].copy_from_slice(&height.to_be_bytes());
        id[8..].copy_from_slice(&index.to_be_bytes());
        TransactionInfo {
            meta: TransactionMeta {
                height,
                index,
                id: ObjectId(id),
                hash: Hash256([height as u8 ^ index as u8; 32]),
                aggregate_id: None,
            },
            entity_type,
            signer_public_key: PublicKey::MIN,
            signer_address: Some(address(1)),
            recipient: Some(address(2)),
            mosaics: vec![],
            cosignatories: vec![],
            inner_transactions: vec![],
        }
    }

    fn keys(rows: &[TransactionInfo]) -> Vec<(u64, i32)> {
        rows.iter().map(|t| (t.meta.height, t.meta.index)).collect()
    }

    fn no_multisig() -> HashMap<Address, MultisigInfo> {
        HashMap::new()
    }

    #[test]
    fn test_pages_order_by_height_then_index_descending() {
        let rows = vec![
            tx(5, 1, TransactionType::Transfer),
            tx(5, 0, TransactionType::Transfer),
            tx(7, 0, TransactionType::Transfer),
            tx(6, 2, TransactionType::Transfer),
        ];
        let anchor = transaction_key(&rows[2]); // (7, 0)
        let page = transactions_from(&rows, &no_multisig(), &TransactionFilter::Any, &anchor, 10);
        assert_eq!(keys(&page), vec![(6, 2), (5, 1), (5, 0)]);
    }

    #[test]
    fn test_since_keeps_rows_nearest_the_anchor() {
        let rows: Vec<_> = (1..=9)
            .map(|h| tx(h, 0, TransactionType::Transfer))
            .collect();
        let anchor = transaction_key(&rows[2]); // (3, 0)
        let page = transactions_since(&rows, &no_multisig(), &TransactionFilter::Any, &anchor, 2);
        assert_eq!(keys(&page), vec![(5, 0), (4, 0)]);
    }

    #[test]
    fn test_sentinels_cover_every_row() {
        let rows = vec![
            tx(1, 0, TransactionType::Transfer),
            tx(2, 0, TransactionType::RegisterNamespace),
        ];
        let all_from = transactions_from(
            &rows,
            &no_multisig(),
            &TransactionFilter::Any,
            &transaction_key_max(),
            10,
        );
        let all_since = transactions_since(
            &rows,
            &no_multisig(),
            &TransactionFilter::Any,
            &transaction_key_min(),
            10,
        );
        assert_eq!(keys(&all_from), vec![(2, 0), (1, 0)]);
        assert_eq!(keys(&all_since), vec![(2, 0), (1, 0)]);
    }

    #[test]
    fn test_embedded_rows_never_page() {
        let parent = tx(3, 0, TransactionType::AggregateComplete);
        let mut embedded = tx(3, 1, TransactionType::Transfer);
        embedded.meta.aggregate_id = Some(parent.meta.id);
        let rows = vec![parent.clone(), embedded.clone()];

        let page = transactions_from(
            &rows,
            &no_multisig(),
            &TransactionFilter::Any,
            &transaction_key_max(),
            10,
        );
        assert_eq!(keys(&page), vec![(3, 0)]);

        assert!(by_hash(&rows, &embedded.meta.hash).is_none());
        assert_eq!(
            by_aggregate_ids(&rows, &[parent.meta.id]),
            vec![embedded.clone()]
        );
        assert!(by_aggregate_ids(&rows, &[embedded.meta.id]).is_empty());
    }

    #[test]
    fn test_type_filter() {
        let rows = vec![
            tx(1, 0, TransactionType::Transfer),
            tx(2, 0, TransactionType::RegisterNamespace),
            tx(3, 0, TransactionType::Transfer),
        ];
        let page = transactions_from(
            &rows,
            &no_multisig(),
            &TransactionFilter::ByType(TransactionType::RegisterNamespace),
            &transaction_key_max(),
            10,
        );
        assert_eq!(keys(&page), vec![(2, 0)]);
    }

    #[test]
    fn test_custom_mosaic_filter_excludes_well_known_only_transfers() {
        let currency = MosaicId::from_u64(0xc0);
        let harvest = MosaicId::from_u64(0xaa);
        let custom = MosaicId::from_u64(0x07);

        let mut plain = tx(1, 0, TransactionType::Transfer);
        plain.mosaics = vec![crate::MosaicAmount {
            id: currency,
            amount: 5,
        }];
        let mut mixed = tx(2, 0, TransactionType::Transfer);
        mixed.mosaics = vec![
            crate::MosaicAmount {
                id: harvest,
                amount: 1,
            },
            crate::MosaicAmount {
                id: custom,
                amount: 3,
            },
        ];
        let rows = vec![plain, mixed];

        let filter = TransactionFilter::TransferWithCustomMosaic {
            well_known: vec![currency, harvest],
        };
        let page = transactions_from(
            &rows,
            &no_multisig(),
            &filter,
            &transaction_key_max(),
            10,
        );
        assert_eq!(keys(&page), vec![(2, 0)]);
    }

    #[test]
    fn test_multisig_filter_joins_participants() {
        let cosigner = address(9);
        let mut signed = tx(1, 0, TransactionType::Transfer);
        signed.cosignatories = vec![cosigner];
        let unsigned = tx(2, 0, TransactionType::Transfer);
        let rows = vec![signed, unsigned];

        let mut multisig = HashMap::new();
        multisig.insert(
            cosigner,
            MultisigInfo {
                account_address: cosigner,
                cosignatory_addresses: vec![],
                multisig_addresses: vec![address(3)],
            },
        );

        let page = transactions_from(
            &rows,
            &multisig,
            &TransactionFilter::TransferWithMultisig,
            &transaction_key_max(),
            10,
        );
        assert_eq!(keys(&page), vec![(1, 0)]);
    }
}
