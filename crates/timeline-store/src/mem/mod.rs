// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! In-memory reference store.
//!
//! Backs the route integration tests and local deployments. Ingestion is
//! external to the query layer, so the store only offers append-style
//! seeding; queries take a read lock for the duration of a single call,
//! which is exactly the per-query consistency the layer promises (no
//! cross-request snapshot isolation).

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard};

use async_trait::async_trait;

use timeline_types::{
    Address, Hash256, MosaicId, NamespaceId, ObjectId, PublicKey,
};

use crate::{
    AccountInfo, AccountRanking, BlockInfo, ChainStore, MosaicInfo, MultisigInfo, NamespaceInfo,
    SortKey, StoreError, StoreResult, TransactionFilter, TransactionGroup, TransactionInfo,
};

mod accounts;
mod blocks;
mod mosaics;
mod namespaces;
mod page;
mod transactions;

#[derive(Default)]
struct Collections {
    blocks: BTreeMap<u64, BlockInfo>,
    confirmed: Vec<TransactionInfo>,
    unconfirmed: Vec<TransactionInfo>,
    partial: Vec<TransactionInfo>,
    mosaics: Vec<MosaicInfo>,
    namespaces: Vec<NamespaceInfo>,
    accounts: Vec<AccountInfo>,
    multisig: HashMap<Address, MultisigInfo>,
}

impl Collections {
    fn transaction_group(&self, group: TransactionGroup) -> &Vec<TransactionInfo> {
        match group {
            TransactionGroup::Confirmed => &self.confirmed,
            TransactionGroup::Unconfirmed => &self.unconfirmed,
            TransactionGroup::Partial => &self.partial,
        }
    }

    fn chain_height(&self) -> u64 {
        self.blocks.keys().next_back().copied().unwrap_or(0)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Collections>> {
        self.collections
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_owned()))
    }

    fn write(&self, apply: impl FnOnce(&mut Collections)) {
        if let Ok(mut collections) = self.collections.write() {
            apply(&mut collections);
        }
    }

    pub fn add_block(&self, block: BlockInfo) {
        self.write(|c| {
            c.blocks.insert(block.height, block);
        });
    }

    pub fn add_transaction(&self, group: TransactionGroup, tx: TransactionInfo) {
        self.write(|c| match group {
            TransactionGroup::Confirmed => c.confirmed.push(tx),
            TransactionGroup::Unconfirmed => c.unconfirmed.push(tx),
            TransactionGroup::Partial => c.partial.push(tx),
        });
    }

    pub fn add_mosaic(&self, mosaic: MosaicInfo) {
        self.write(|c| c.mosaics.push(mosaic));
    }

    pub fn add_namespace(&self, namespace: NamespaceInfo) {
        self.write(|c| c.namespaces.push(namespace));
    }

    pub fn add_account(&self, account: AccountInfo) {
        self.write(|c| c.accounts.push(account));
    }

    pub fn add_multisig(&self, entry: MultisigInfo) {
        self.write(|c| {
            c.multisig.insert(entry.account_address, entry);
        });
    }
}

#[async_trait]
impl ChainStore for MemoryStore {
    async fn chain_height(&self) -> StoreResult<u64> {
        Ok(self.read()?.chain_height())
    }

    async fn block_by_hash(&self, hash: &Hash256) -> StoreResult<Option<BlockInfo>> {
        let collections = self.read()?;
        Ok(collections
            .blocks
            .values()
            .find(|block| block.hash == *hash)
            .cloned())
    }

    async fn blocks_from(&self, height: u64, count: usize) -> StoreResult<Vec<BlockInfo>> {
        let collections = self.read()?;
        let chain_height = collections.chain_height();
        Ok(blocks::blocks_from(
            &collections.blocks,
            chain_height,
            height,
            count,
        ))
    }

    async fn blocks_since(&self, height: u64, count: usize) -> StoreResult<Vec<BlockInfo>> {
        let collections = self.read()?;
        let chain_height = collections.chain_height();
        Ok(blocks::blocks_since(
            &collections.blocks,
            chain_height,
            height,
            count,
        ))
    }

    async fn transaction_by_hash(
        &self,
        group: TransactionGroup,
        hash: &Hash256,
    ) -> StoreResult<Option<TransactionInfo>> {
        let collections = self.read()?;
        Ok(transactions::by_hash(collections.transaction_group(group), hash).cloned())
    }

    async fn transaction_by_id(
        &self,
        group: TransactionGroup,
        id: &ObjectId,
    ) -> StoreResult<Option<TransactionInfo>> {
        let collections = self.read()?;
        Ok(transactions::by_id(collections.transaction_group(group), id).cloned())
    }

    async fn transactions_from(
        &self,
        group: TransactionGroup,
        filter: &TransactionFilter,
        anchor: &SortKey,
        count: usize,
    ) -> StoreResult<Vec<TransactionInfo>> {
        let collections = self.read()?;
        Ok(transactions::transactions_from(
            collections.transaction_group(group),
            &collections.multisig,
            filter,
            anchor,
            count,
        ))
    }

    async fn transactions_since(
        &self,
        group: TransactionGroup,
        filter: &TransactionFilter,
        anchor: &SortKey,
        count: usize,
    ) -> StoreResult<Vec<TransactionInfo>> {
        let collections = self.read()?;
        Ok(transactions::transactions_since(
            collections.transaction_group(group),
            &collections.multisig,
            filter,
            anchor,
            count,
        ))
    }

    async fn transactions_by_aggregate_ids(
        &self,
        group: TransactionGroup,
        ids: &[ObjectId],
    ) -> StoreResult<Vec<TransactionInfo>> {
        let collections = self.read()?;
        Ok(transactions::by_aggregate_ids(
            collections.transaction_group(group),
            ids,
        ))
    }

    async fn mosaic_by_id(&self, id: &MosaicId) -> StoreResult<Option<MosaicInfo>> {
        let collections = self.read()?;
        Ok(mosaics::by_id(&collections.mosaics, id).cloned())
    }

    async fn mosaics_from(&self, anchor: &SortKey, count: usize) -> StoreResult<Vec<MosaicInfo>> {
        let collections = self.read()?;
        Ok(mosaics::mosaics_from(&collections.mosaics, anchor, count))
    }

    async fn mosaics_since(&self, anchor: &SortKey, count: usize) -> StoreResult<Vec<MosaicInfo>> {
        let collections = self.read()?;
        Ok(mosaics::mosaics_since(&collections.mosaics, anchor, count))
    }

    async fn namespace_by_id(&self, id: &NamespaceId) -> StoreResult<Option<NamespaceInfo>> {
        let collections = self.read()?;
        Ok(namespaces::by_namespace_id(&collections.namespaces, id).cloned())
    }

    async fn namespace_by_object_id(&self, id: &ObjectId) -> StoreResult<Option<NamespaceInfo>> {
        let collections = self.read()?;
        Ok(namespaces::by_object_id(&collections.namespaces, id).cloned())
    }

    async fn namespaces_from(
        &self,
        anchor: &SortKey,
        count: usize,
    ) -> StoreResult<Vec<NamespaceInfo>> {
        let collections = self.read()?;
        Ok(namespaces::namespaces_from(
            &collections.namespaces,
            anchor,
            count,
        ))
    }

    async fn namespaces_since(
        &self,
        anchor: &SortKey,
        count: usize,
    ) -> StoreResult<Vec<NamespaceInfo>> {
        let collections = self.read()?;
        Ok(namespaces::namespaces_since(
            &collections.namespaces,
            anchor,
            count,
        ))
    }

    async fn mosaic_alias(&self, id: &NamespaceId) -> StoreResult<Option<MosaicId>> {
        let collections = self.read()?;
        Ok(namespaces::mosaic_alias(&collections.namespaces, id))
    }

    async fn account_by_address(&self, address: &Address) -> StoreResult<Option<AccountInfo>> {
        let collections = self.read()?;
        Ok(accounts::by_address(&collections.accounts, address).cloned())
    }

    async fn account_by_public_key(&self, key: &PublicKey) -> StoreResult<Option<AccountInfo>> {
        let collections = self.read()?;
        Ok(accounts::by_public_key(&collections.accounts, key).cloned())
    }

    async fn accounts_from(
        &self,
        ranking: &AccountRanking,
        anchor: &SortKey,
        count: usize,
    ) -> StoreResult<Vec<AccountInfo>> {
        let collections = self.read()?;
        Ok(accounts::accounts_from(
            &collections.accounts,
            ranking,
            anchor,
            count,
        ))
    }

    async fn accounts_since(
        &self,
        ranking: &AccountRanking,
        anchor: &SortKey,
        count: usize,
    ) -> StoreResult<Vec<AccountInfo>> {
        let collections = self.read()?;
        Ok(accounts::accounts_since(
            &collections.accounts,
            ranking,
            anchor,
            count,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::transaction_key_max;
    use crate::TransactionMeta;
    use timeline_types::TransactionType;

    fn block(height: u64) -> BlockInfo {
        BlockInfo {
            height,
            hash: Hash256([height as u8; 32]),
            signer_public_key: PublicKey::MIN,
            timestamp: height,
            fee_multiplier: 0,
            transaction_count: 0,
        }
    }

    #[tokio::test]
    async fn test_chain_height_tracks_highest_block() {
        let store = MemoryStore::new();
        assert_eq!(store.chain_height().await.unwrap(), 0);
        store.add_block(block(5));
        store.add_block(block(3));
        assert_eq!(store.chain_height().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_groups_are_isolated() {
        let store = MemoryStore::new();
        let tx = TransactionInfo {
            meta: TransactionMeta {
                height: 1,
                index: 0,
                id: ObjectId([7; 12]),
                hash: Hash256([7; 32]),
                aggregate_id: None,
            },
            entity_type: TransactionType::Transfer,
            signer_public_key: PublicKey::MIN,
            signer_address: None,
            recipient: None,
            mosaics: vec![],
            cosignatories: vec![],
            inner_transactions: vec![],
        };
        store.add_transaction(TransactionGroup::Unconfirmed, tx.clone());

        let unconfirmed = store
            .transactions_from(
                TransactionGroup::Unconfirmed,
                &TransactionFilter::Any,
                &transaction_key_max(),
                10,
            )
            .await
            .unwrap();
        let confirmed = store
            .transactions_from(
                TransactionGroup::Confirmed,
                &TransactionFilter::Any,
                &transaction_key_max(),
                10,
            )
            .await
            .unwrap();
        assert_eq!(unconfirmed.len(), 1);
        assert!(confirmed.is_empty());

        assert!(store
            .transaction_by_hash(TransactionGroup::Unconfirmed, &tx.meta.hash)
            .await
            .unwrap()
            .is_some());
        assert!(store
            .transaction_by_hash(TransactionGroup::Confirmed, &tx.meta.hash)
            .await
            .unwrap()
            .is_none());
    }
}
