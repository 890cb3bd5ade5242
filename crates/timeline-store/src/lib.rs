// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Record model and store seam for the timeline query layer.
//!
//! [`ChainStore`] is the surface the timeline engine binds against: ranged
//! page queries (`*_from` strictly below an anchor, `*_since` strictly
//! above, both presented descending), identifier lookups, and the two
//! auxiliary operations (aggregate batch fetch, namespace alias
//! resolution). [`mem::MemoryStore`] is the reference implementation; a
//! deployment backed by the indexing database implements the same trait.

use async_trait::async_trait;

use timeline_types::{
    Address, Hash256, MosaicId, NamespaceId, ObjectId, PublicKey, TransactionType,
};

pub mod key;
pub mod mem;
mod types;

pub use key::{KeyPart, SortKey};
pub use types::{
    AccountInfo, ActivityBucket, BlockInfo, Importance, MosaicAmount, MosaicInfo, MultisigInfo,
    NamespaceAlias, NamespaceInfo, TransactionInfo, TransactionMeta,
};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure below the query layer. Never retried by the core; surfaced as an
/// internal error by the route boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("malformed row in {collection}: {reason}")]
    Corrupted {
        collection: &'static str,
        reason: String,
    },
}

/// Which transaction collection a query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionGroup {
    Confirmed,
    Unconfirmed,
    Partial,
}

impl TransactionGroup {
    pub fn collection_name(&self) -> &'static str {
        match self {
            TransactionGroup::Confirmed => "transactions",
            TransactionGroup::Unconfirmed => "unconfirmedTransactions",
            TransactionGroup::Partial => "partialTransactions",
        }
    }
}

/// Row filter applied before the range predicate in transaction queries.
///
/// Embedded sub-transactions (rows with an `aggregate_id` back-reference)
/// are excluded from every variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionFilter {
    Any,
    ByType(TransactionType),
    /// Transfers carrying at least one mosaic outside the well-known set.
    TransferWithCustomMosaic { well_known: Vec<MosaicId> },
    /// Transfers whose participating addresses join to at least one entry
    /// in the multisig collection.
    TransferWithMultisig,
}

/// Which ephemeral computed attribute ranks an account query.
///
/// The attribute is recomputed per query and projected away after sorting;
/// it is never a stored column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRanking {
    Importance,
    HarvestedBlocks,
    HarvestedFees,
    MosaicBalance(MosaicId),
}

#[async_trait]
pub trait ChainStore: Send + Sync {
    async fn chain_height(&self) -> StoreResult<u64>;

    // Blocks. Anchors are plain heights; the window clamp rules live in the
    // query builder (see `mem::blocks`).
    async fn block_by_hash(&self, hash: &Hash256) -> StoreResult<Option<BlockInfo>>;
    async fn blocks_from(&self, height: u64, count: usize) -> StoreResult<Vec<BlockInfo>>;
    async fn blocks_since(&self, height: u64, count: usize) -> StoreResult<Vec<BlockInfo>>;

    // Transactions.
    async fn transaction_by_hash(
        &self,
        group: TransactionGroup,
        hash: &Hash256,
    ) -> StoreResult<Option<TransactionInfo>>;
    async fn transaction_by_id(
        &self,
        group: TransactionGroup,
        id: &ObjectId,
    ) -> StoreResult<Option<TransactionInfo>>;
    async fn transactions_from(
        &self,
        group: TransactionGroup,
        filter: &TransactionFilter,
        anchor: &SortKey,
        count: usize,
    ) -> StoreResult<Vec<TransactionInfo>>;
    async fn transactions_since(
        &self,
        group: TransactionGroup,
        filter: &TransactionFilter,
        anchor: &SortKey,
        count: usize,
    ) -> StoreResult<Vec<TransactionInfo>>;
    /// Batch-fetch embedded sub-transactions for a page of aggregate
    /// parents.
    async fn transactions_by_aggregate_ids(
        &self,
        group: TransactionGroup,
        ids: &[ObjectId],
    ) -> StoreResult<Vec<TransactionInfo>>;

    // Mosaics.
    async fn mosaic_by_id(&self, id: &MosaicId) -> StoreResult<Option<MosaicInfo>>;
    async fn mosaics_from(&self, anchor: &SortKey, count: usize) -> StoreResult<Vec<MosaicInfo>>;
    async fn mosaics_since(&self, anchor: &SortKey, count: usize) -> StoreResult<Vec<MosaicInfo>>;

    // Namespaces.
    async fn namespace_by_id(&self, id: &NamespaceId) -> StoreResult<Option<NamespaceInfo>>;
    async fn namespace_by_object_id(&self, id: &ObjectId) -> StoreResult<Option<NamespaceInfo>>;
    async fn namespaces_from(
        &self,
        anchor: &SortKey,
        count: usize,
    ) -> StoreResult<Vec<NamespaceInfo>>;
    async fn namespaces_since(
        &self,
        anchor: &SortKey,
        count: usize,
    ) -> StoreResult<Vec<NamespaceInfo>>;
    /// Resolve a well-known namespace to its mosaic alias: the namespace
    /// must exist, be active, and carry a mosaic alias.
    async fn mosaic_alias(&self, id: &NamespaceId) -> StoreResult<Option<MosaicId>>;

    // Accounts.
    async fn account_by_address(&self, address: &Address) -> StoreResult<Option<AccountInfo>>;
    async fn account_by_public_key(&self, key: &PublicKey) -> StoreResult<Option<AccountInfo>>;
    async fn accounts_from(
        &self,
        ranking: &AccountRanking,
        anchor: &SortKey,
        count: usize,
    ) -> StoreResult<Vec<AccountInfo>>;
    async fn accounts_since(
        &self,
        ranking: &AccountRanking,
        anchor: &SortKey,
        count: usize,
    ) -> StoreResult<Vec<AccountInfo>>;
}
