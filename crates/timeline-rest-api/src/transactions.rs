// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Response;
use futures::FutureExt;
use itertools::Itertools;

use timeline_store::{
    key::{transaction_key, transaction_key_max, transaction_key_min},
    ChainStore, SortKey, TransactionFilter, TransactionGroup, TransactionInfo,
};
use timeline_types::{
    is_hex_hash, is_hex_object_id, ParseError, SentinelSet, TransactionType, TransferFilter,
};

use crate::params::{classify_sentinel, parse_duration, parse_limit, Limit, TimelinePathParams};
use crate::response::{redirect, respond, ResultType};
use crate::timeline::{
    AbsoluteFn, AnchorKind, AnchorQueryFn, AnchorValue, OperationKey, ResolveFn, Timeline,
    TimelineResult,
};
use crate::{RestError, RestService, Result};

pub const TRANSACTIONS_TIMELINE_PATH: &str = "/transactions/:duration/:anchor/limit/:limit";
pub const TRANSACTIONS_BY_TYPE_PATH: &str =
    "/transactions/:duration/:anchor/type/:type/limit/:limit";
pub const TRANSACTIONS_BY_TYPE_WITH_FILTER_PATH: &str =
    "/transactions/:duration/:anchor/type/:type/filter/:filter/limit/:limit";
pub const UNCONFIRMED_TRANSACTIONS_TIMELINE_PATH: &str =
    "/transactions/unconfirmed/:duration/:anchor/limit/:limit";
pub const PARTIAL_TRANSACTIONS_TIMELINE_PATH: &str =
    "/transactions/partial/:duration/:anchor/limit/:limit";

#[derive(Debug, serde::Deserialize)]
pub(crate) struct TypedPathParams {
    duration: String,
    anchor: String,
    #[serde(rename = "type")]
    entity_type: String,
    limit: String,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct FilteredPathParams {
    duration: String,
    anchor: String,
    #[serde(rename = "type")]
    entity_type: String,
    filter: String,
    limit: String,
}

pub(crate) async fn transactions_timeline(
    State(state): State<RestService>,
    Path(path): Path<TimelinePathParams>,
) -> Result<Response, RestError> {
    let canonical = |preset: usize| {
        format!(
            "/transactions/{}/{}/limit/{}",
            path.duration, path.anchor, preset
        )
    };
    run(
        state,
        TransactionGroup::Confirmed,
        TransactionFilter::Any,
        &path.duration,
        &path.anchor,
        &path.limit,
        canonical,
    )
    .await
}

pub(crate) async fn unconfirmed_transactions_timeline(
    State(state): State<RestService>,
    Path(path): Path<TimelinePathParams>,
) -> Result<Response, RestError> {
    let canonical = |preset: usize| {
        format!(
            "/transactions/unconfirmed/{}/{}/limit/{}",
            path.duration, path.anchor, preset
        )
    };
    run(
        state,
        TransactionGroup::Unconfirmed,
        TransactionFilter::Any,
        &path.duration,
        &path.anchor,
        &path.limit,
        canonical,
    )
    .await
}

pub(crate) async fn partial_transactions_timeline(
    State(state): State<RestService>,
    Path(path): Path<TimelinePathParams>,
) -> Result<Response, RestError> {
    let canonical = |preset: usize| {
        format!(
            "/transactions/partial/{}/{}/limit/{}",
            path.duration, path.anchor, preset
        )
    };
    run(
        state,
        TransactionGroup::Partial,
        TransactionFilter::Any,
        &path.duration,
        &path.anchor,
        &path.limit,
        canonical,
    )
    .await
}

pub(crate) async fn transactions_by_type_timeline(
    State(state): State<RestService>,
    Path(path): Path<TypedPathParams>,
) -> Result<Response, RestError> {
    let entity_type: TransactionType = path.entity_type.parse()?;
    let canonical = |preset: usize| {
        format!(
            "/transactions/{}/{}/type/{}/limit/{}",
            path.duration, path.anchor, path.entity_type, preset
        )
    };
    run(
        state,
        TransactionGroup::Confirmed,
        TransactionFilter::ByType(entity_type),
        &path.duration,
        &path.anchor,
        &path.limit,
        canonical,
    )
    .await
}

pub(crate) async fn transactions_by_type_with_filter_timeline(
    State(state): State<RestService>,
    Path(path): Path<FilteredPathParams>,
) -> Result<Response, RestError> {
    let entity_type: TransactionType = path.entity_type.parse()?;
    let subfilter: TransferFilter = path.filter.parse()?;
    // Subfilters are defined for the transfer type only.
    if entity_type != TransactionType::Transfer {
        return Err(ParseError::UnknownKeyword(path.filter.clone()).into());
    }
    let filter = match subfilter {
        TransferFilter::Mosaic => TransactionFilter::TransferWithCustomMosaic {
            well_known: state.config().well_known_mosaics(),
        },
        TransferFilter::Multisig => TransactionFilter::TransferWithMultisig,
    };
    let canonical = |preset: usize| {
        format!(
            "/transactions/{}/{}/type/{}/filter/{}/limit/{}",
            path.duration, path.anchor, path.entity_type, path.filter, preset
        )
    };
    run(
        state,
        TransactionGroup::Confirmed,
        filter,
        &path.duration,
        &path.anchor,
        &path.limit,
        canonical,
    )
    .await
}

async fn run(
    state: RestService,
    group: TransactionGroup,
    filter: TransactionFilter,
    duration: &str,
    anchor: &str,
    limit: &str,
    canonical: impl FnOnce(usize) -> String,
) -> Result<Response, RestError> {
    let duration = parse_duration(duration)?;
    let range = state.config().count_range();
    let limit = match parse_limit(limit, &range)? {
        Limit::Valid(limit) => limit,
        Limit::OutOfRange => return Ok(redirect(canonical(range.preset))),
    };
    let (kind, anchor) = classify_anchor(anchor)?;

    let mut result = timeline(state.store(), group, filter)
        .execute(OperationKey::new(duration, kind), anchor, limit)
        .await?;
    if let TimelineResult::Page(page) = &mut result {
        attach_embedded(state.store(), group, page).await;
    }
    respond(result, ResultType::Transaction)
}

/// 32-byte hashes first, then 12-byte internal ids.
fn classify_anchor(segment: &str) -> Result<(AnchorKind, Option<AnchorValue>), ParseError> {
    if let Some(kind) = classify_sentinel(SentinelSet::Time, segment) {
        return Ok((kind, None));
    }
    if is_hex_hash(segment) {
        return Ok((
            AnchorKind::Id("hash"),
            Some(AnchorValue::Hash(segment.parse()?)),
        ));
    }
    if is_hex_object_id(segment) {
        return Ok((
            AnchorKind::Id("id"),
            Some(AnchorValue::ObjectId(segment.parse()?)),
        ));
    }
    Err(ParseError::UnrecognizedAnchor(segment.to_owned()))
}

fn timeline(
    store: Arc<dyn ChainStore>,
    group: TransactionGroup,
    filter: TransactionFilter,
) -> Timeline<SortKey, TransactionInfo> {
    let from: AnchorQueryFn<SortKey, TransactionInfo> = {
        let store = store.clone();
        let filter = filter.clone();
        Arc::new(move |anchor, count| {
            let store = store.clone();
            let filter = filter.clone();
            async move { store.transactions_from(group, &filter, &anchor, count).await }.boxed()
        })
    };
    let since: AnchorQueryFn<SortKey, TransactionInfo> = {
        let store = store.clone();
        let filter = filter.clone();
        Arc::new(move |anchor, count| {
            let store = store.clone();
            let filter = filter.clone();
            async move {
                store
                    .transactions_since(group, &filter, &anchor, count)
                    .await
            }
            .boxed()
        })
    };

    let from_max: AbsoluteFn<TransactionInfo> = {
        let from = from.clone();
        Arc::new(move |count| from(transaction_key_max(), count))
    };
    let since_min: AbsoluteFn<TransactionInfo> = {
        let since = since.clone();
        Arc::new(move |count| since(transaction_key_min(), count))
    };

    let resolve_hash: ResolveFn<SortKey> = {
        let store = store.clone();
        Arc::new(move |anchor| {
            let store = store.clone();
            async move {
                match anchor {
                    AnchorValue::Hash(hash) => Ok(store
                        .transaction_by_hash(group, &hash)
                        .await?
                        .map(|tx| transaction_key(&tx))),
                    _ => Ok(None),
                }
            }
            .boxed()
        })
    };
    let resolve_id: ResolveFn<SortKey> = {
        let store = store.clone();
        Arc::new(move |anchor| {
            let store = store.clone();
            async move {
                match anchor {
                    AnchorValue::ObjectId(id) => Ok(store
                        .transaction_by_id(group, &id)
                        .await?
                        .map(|tx| transaction_key(&tx))),
                    _ => Ok(None),
                }
            }
            .boxed()
        })
    };

    Timeline::builder()
        .absolute(from_max, since_min)
        .identifier("hash", resolve_hash, from.clone(), since.clone())
        .identifier("id", resolve_id, from, since)
        .build()
}

/// Materialize embedded sub-transactions onto their aggregate parents.
///
/// Attachment failure degrades the page rather than failing it: the
/// parents are returned with whatever inner prefix is known.
async fn attach_embedded(
    store: Arc<dyn ChainStore>,
    group: TransactionGroup,
    page: &mut [TransactionInfo],
) {
    let parent_ids: Vec<_> = page
        .iter()
        .filter(|tx| tx.entity_type.is_aggregate())
        .map(|tx| tx.meta.id)
        .collect();
    if parent_ids.is_empty() {
        return;
    }

    let embedded = match store.transactions_by_aggregate_ids(group, &parent_ids).await {
        Ok(embedded) => embedded,
        Err(error) => {
            tracing::warn!(
                collection = group.collection_name(),
                %error,
                "failed to attach embedded transactions"
            );
            return;
        }
    };

    let mut by_parent: HashMap<_, Vec<_>> = embedded
        .into_iter()
        .filter_map(|tx| tx.meta.aggregate_id.map(|parent| (parent, tx)))
        .into_group_map();
    for parent in page.iter_mut() {
        if let Some(mut inner) = by_parent.remove(&parent.meta.id) {
            inner.sort_by_key(|tx| tx.meta.index);
            parent.inner_transactions = inner;
        }
    }
}
