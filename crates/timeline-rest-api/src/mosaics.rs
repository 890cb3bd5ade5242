// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Response;
use futures::FutureExt;

use timeline_store::{
    key::{start_height_key, start_height_key_max, start_height_key_min},
    ChainStore, MosaicInfo, SortKey,
};
use timeline_types::{is_hex_mosaic_id, ParseError, SentinelSet};

use crate::params::{classify_sentinel, parse_duration, parse_limit, Limit, TimelinePathParams};
use crate::response::{redirect, respond, ResultType};
use crate::timeline::{
    AbsoluteFn, AnchorKind, AnchorQueryFn, AnchorValue, OperationKey, ResolveFn, Timeline,
};
use crate::{RestError, RestService, Result};

pub const MOSAICS_TIMELINE_PATH: &str = "/mosaics/:duration/:anchor/limit/:limit";

pub(crate) async fn mosaics_timeline(
    State(state): State<RestService>,
    Path(path): Path<TimelinePathParams>,
) -> Result<Response, RestError> {
    let duration = parse_duration(&path.duration)?;
    let range = state.config().count_range();
    let limit = match parse_limit(&path.limit, &range)? {
        Limit::Valid(limit) => limit,
        Limit::OutOfRange => {
            return Ok(redirect(format!(
                "/mosaics/{}/{}/limit/{}",
                path.duration, path.anchor, range.preset
            )))
        }
    };
    let (kind, anchor) = classify_anchor(&path.anchor)?;

    let result = timeline(state.store())
        .execute(OperationKey::new(duration, kind), anchor, limit)
        .await?;
    respond(result, ResultType::Mosaic)
}

fn classify_anchor(segment: &str) -> Result<(AnchorKind, Option<AnchorValue>), ParseError> {
    if let Some(kind) = classify_sentinel(SentinelSet::Time, segment) {
        return Ok((kind, None));
    }
    if is_hex_mosaic_id(segment) {
        return Ok((
            AnchorKind::Id("id"),
            Some(AnchorValue::MosaicId(segment.parse()?)),
        ));
    }
    Err(ParseError::UnrecognizedAnchor(segment.to_owned()))
}

fn timeline(store: Arc<dyn ChainStore>) -> Timeline<SortKey, MosaicInfo> {
    let from: AnchorQueryFn<SortKey, MosaicInfo> = {
        let store = store.clone();
        Arc::new(move |anchor, count| {
            let store = store.clone();
            async move { store.mosaics_from(&anchor, count).await }.boxed()
        })
    };
    let since: AnchorQueryFn<SortKey, MosaicInfo> = {
        let store = store.clone();
        Arc::new(move |anchor, count| {
            let store = store.clone();
            async move { store.mosaics_since(&anchor, count).await }.boxed()
        })
    };

    let from_max: AbsoluteFn<MosaicInfo> = {
        let from = from.clone();
        Arc::new(move |count| from(start_height_key_max(), count))
    };
    let since_min: AbsoluteFn<MosaicInfo> = {
        let since = since.clone();
        Arc::new(move |count| since(start_height_key_min(), count))
    };

    let resolve_id: ResolveFn<SortKey> = {
        let store = store.clone();
        Arc::new(move |anchor| {
            let store = store.clone();
            async move {
                match anchor {
                    AnchorValue::MosaicId(id) => Ok(store
                        .mosaic_by_id(&id)
                        .await?
                        .map(|mosaic| start_height_key(mosaic.start_height, mosaic.id))),
                    _ => Ok(None),
                }
            }
            .boxed()
        })
    };

    Timeline::builder()
        .absolute(from_max, since_min)
        .identifier("id", resolve_id, from, since)
        .build()
}
