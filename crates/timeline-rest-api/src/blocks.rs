// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Response;
use futures::FutureExt;

use timeline_store::{BlockInfo, ChainStore};
use timeline_types::{is_hex_hash, parse_uint, ParseError, SentinelSet};

use crate::params::{classify_sentinel, parse_duration, parse_limit, Limit, TimelinePathParams};
use crate::response::{redirect, respond, ResultType};
use crate::timeline::{
    AbsoluteFn, AnchorKind, AnchorQueryFn, AnchorValue, ExtractFn, OperationKey, ResolveFn,
    Timeline,
};
use crate::{RestError, RestService, Result};

pub const BLOCKS_TIMELINE_PATH: &str = "/blocks/:duration/:anchor/limit/:limit";

pub(crate) async fn blocks_timeline(
    State(state): State<RestService>,
    Path(path): Path<TimelinePathParams>,
) -> Result<Response, RestError> {
    let duration = parse_duration(&path.duration)?;
    let range = state.config().count_range();
    let limit = match parse_limit(&path.limit, &range)? {
        Limit::Valid(limit) => limit,
        Limit::OutOfRange => {
            return Ok(redirect(format!(
                "/blocks/{}/{}/limit/{}",
                path.duration, path.anchor, range.preset
            )))
        }
    };
    let (kind, anchor) = classify_anchor(&path.anchor)?;

    let result = timeline(state.store())
        .execute(OperationKey::new(duration, kind), anchor, limit)
        .await?;
    respond(result, ResultType::Block)
}

/// Sentinels, then 32-byte hashes, then plain heights.
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
    if segment.bytes().all(|b| b.is_ascii_digit()) && !segment.is_empty() {
        return Ok((
            AnchorKind::Id("height"),
            Some(AnchorValue::Height(parse_uint(segment)?)),
        ));
    }
    Err(ParseError::UnrecognizedAnchor(segment.to_owned()))
}

/// The block timeline. Heights are unique, so anchors are plain heights:
/// hash anchors resolve to the block's height, the sentinel entries anchor
/// at the tip and at genesis (`since min` therefore starts at height 2,
/// genesis itself being excluded by the non-inclusive contract).
fn timeline(store: Arc<dyn ChainStore>) -> Timeline<u64, BlockInfo> {
    let from: AnchorQueryFn<u64, BlockInfo> = {
        let store = store.clone();
        Arc::new(move |height, count| {
            let store = store.clone();
            async move { store.blocks_from(height, count).await }.boxed()
        })
    };
    let since: AnchorQueryFn<u64, BlockInfo> = {
        let store = store.clone();
        Arc::new(move |height, count| {
            let store = store.clone();
            async move { store.blocks_since(height, count).await }.boxed()
        })
    };

    let from_max: AbsoluteFn<BlockInfo> = {
        let store = store.clone();
        Arc::new(move |count| {
            let store = store.clone();
            async move {
                let tip = store.chain_height().await?;
                store.blocks_from(tip + 1, count).await
            }
            .boxed()
        })
    };
    let since_min: AbsoluteFn<BlockInfo> = {
        let store = store.clone();
        Arc::new(move |count| {
            let store = store.clone();
            async move { store.blocks_since(1, count).await }.boxed()
        })
    };

    let resolve_hash: ResolveFn<u64> = {
        let store = store.clone();
        Arc::new(move |anchor| {
            let store = store.clone();
            async move {
                match anchor {
                    AnchorValue::Hash(hash) => Ok(store
                        .block_by_hash(&hash)
                        .await?
                        .map(|block| block.height)),
                    _ => Ok(None),
                }
            }
            .boxed()
        })
    };

    // Height zero has no addressable block; everything else is served
    // through the clamped windows.
    let extract_height: ExtractFn<u64> = Arc::new(|anchor| match anchor {
        AnchorValue::Height(height) if *height > 0 => Some(*height),
        _ => None,
    });

    Timeline::builder()
        .absolute(from_max, since_min)
        .identifier("hash", resolve_hash, from.clone(), since.clone())
        .record("height", extract_height, from, since)
        .build()
}
