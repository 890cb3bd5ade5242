// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The generic cursor engine.
//!
//! A [`Timeline`] is a map from operation keys (duration × anchor kind) to
//! one of four operation kinds. Families assemble their method surface
//! declaratively through [`TimelineBuilder`]: `absolute` wires the four
//! sentinel entries in one call (`from min` and `since max` are trivially
//! empty), `identifier`/`record` wire a `from`/`since` pair per anchor
//! shape. Entries hold their store calls as function values; operation
//! names only exist at construction time.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;

use timeline_store::{StoreError, StoreResult};
use timeline_types::{
    Address, Duration, Hash256, MosaicId, NamespaceId, ObjectId, PublicKey,
};

/// A parsed anchor identifier, produced by a family's anchor classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorValue {
    Hash(Hash256),
    ObjectId(ObjectId),
    MosaicId(MosaicId),
    NamespaceId(NamespaceId),
    Address(Address),
    PublicKey(PublicKey),
    Height(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    Min,
    Max,
    Id(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationKey {
    pub duration: Duration,
    pub anchor: AnchorKind,
}

impl OperationKey {
    pub fn new(duration: Duration, anchor: AnchorKind) -> Self {
        Self { duration, anchor }
    }
}

/// Seeded page query: the sentinel anchor is already applied.
pub type AbsoluteFn<R> =
    Arc<dyn Fn(usize) -> BoxFuture<'static, StoreResult<Vec<R>>> + Send + Sync>;

/// Page query anchored at a resolved key tuple.
pub type AnchorQueryFn<A, R> =
    Arc<dyn Fn(A, usize) -> BoxFuture<'static, StoreResult<Vec<R>>> + Send + Sync>;

/// Key extraction for direct-value anchors; `None` marks a value with no
/// addressable record (for example block height zero).
pub type ExtractFn<A> = Arc<dyn Fn(&AnchorValue) -> Option<A> + Send + Sync>;

/// Store lookup resolving an identifier to the anchored key tuple.
pub type ResolveFn<A> =
    Arc<dyn Fn(AnchorValue) -> BoxFuture<'static, StoreResult<Option<A>>> + Send + Sync>;

pub enum Operation<A, R> {
    /// Resolves to the empty page without touching the store.
    Empty,
    /// Sentinel-seeded page query.
    Absolute(AbsoluteFn<R>),
    /// Direct-value anchor: extract the key tuple, then query.
    Record {
        extract: ExtractFn<A>,
        query: AnchorQueryFn<A, R>,
    },
    /// Identifier anchor: look the record up first; a miss is the
    /// not-found outcome, a hit delegates to the record query.
    Identifier {
        resolve: ResolveFn<A>,
        query: AnchorQueryFn<A, R>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineResult<R> {
    Page(Vec<R>),
    NotFound,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TimelineError {
    /// The family has no entry for the requested operation, or the entry
    /// was invoked without the anchor it needs.
    #[error("unsupported timeline operation")]
    Unsupported,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct Timeline<A, R> {
    entries: HashMap<OperationKey, Operation<A, R>>,
}

impl<A, R> Timeline<A, R> {
    pub fn builder() -> TimelineBuilder<A, R> {
        TimelineBuilder {
            entries: HashMap::new(),
        }
    }

    pub async fn execute(
        &self,
        key: OperationKey,
        anchor: Option<AnchorValue>,
        count: usize,
    ) -> Result<TimelineResult<R>, TimelineError> {
        if count == 0 {
            return Ok(TimelineResult::Page(Vec::new()));
        }
        let operation = self.entries.get(&key).ok_or(TimelineError::Unsupported)?;
        match operation {
            Operation::Empty => Ok(TimelineResult::Page(Vec::new())),
            Operation::Absolute(query) => Ok(TimelineResult::Page(query(count).await?)),
            Operation::Record { extract, query } => {
                let anchor = anchor.ok_or(TimelineError::Unsupported)?;
                match extract(&anchor) {
                    None => Ok(TimelineResult::NotFound),
                    Some(args) => Ok(TimelineResult::Page(query(args, count).await?)),
                }
            }
            Operation::Identifier { resolve, query } => {
                let anchor = anchor.ok_or(TimelineError::Unsupported)?;
                match resolve(anchor).await? {
                    None => Ok(TimelineResult::NotFound),
                    Some(args) => Ok(TimelineResult::Page(query(args, count).await?)),
                }
            }
        }
    }
}

pub struct TimelineBuilder<A, R> {
    entries: HashMap<OperationKey, Operation<A, R>>,
}

impl<A, R> TimelineBuilder<A, R> {
    /// Wire the four sentinel entries: `from min` and `since max` resolve
    /// empty, `from max` and `since min` run the seeded queries.
    pub fn absolute(mut self, from_max: AbsoluteFn<R>, since_min: AbsoluteFn<R>) -> Self {
        self.entries.insert(
            OperationKey::new(Duration::From, AnchorKind::Min),
            Operation::Empty,
        );
        self.entries.insert(
            OperationKey::new(Duration::From, AnchorKind::Max),
            Operation::Absolute(from_max),
        );
        self.entries.insert(
            OperationKey::new(Duration::Since, AnchorKind::Min),
            Operation::Absolute(since_min),
        );
        self.entries.insert(
            OperationKey::new(Duration::Since, AnchorKind::Max),
            Operation::Empty,
        );
        self
    }

    /// Wire a `from`/`since` pair of identifier-lookup entries.
    pub fn identifier(
        mut self,
        name: &'static str,
        resolve: ResolveFn<A>,
        from: AnchorQueryFn<A, R>,
        since: AnchorQueryFn<A, R>,
    ) -> Self {
        self.entries.insert(
            OperationKey::new(Duration::From, AnchorKind::Id(name)),
            Operation::Identifier {
                resolve: resolve.clone(),
                query: from,
            },
        );
        self.entries.insert(
            OperationKey::new(Duration::Since, AnchorKind::Id(name)),
            Operation::Identifier {
                resolve,
                query: since,
            },
        );
        self
    }

    /// Wire a `from`/`since` pair of direct-value entries.
    pub fn record(
        mut self,
        name: &'static str,
        extract: ExtractFn<A>,
        from: AnchorQueryFn<A, R>,
        since: AnchorQueryFn<A, R>,
    ) -> Self {
        self.entries.insert(
            OperationKey::new(Duration::From, AnchorKind::Id(name)),
            Operation::Record {
                extract: extract.clone(),
                query: from,
            },
        );
        self.entries.insert(
            OperationKey::new(Duration::Since, AnchorKind::Id(name)),
            Operation::Record { extract, query: since },
        );
        self
    }

    pub fn build(self) -> Timeline<A, R> {
        Timeline {
            entries: self.entries,
        }
    }
}
