// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Response;
use futures::FutureExt;

use timeline_store::{
    key::{start_height_key, start_height_key_max, start_height_key_min},
    ChainStore, NamespaceInfo, SortKey,
};
use timeline_types::{is_hex_namespace_id, is_hex_object_id, ParseError, SentinelSet};

use crate::params::{classify_sentinel, parse_duration, parse_limit, Limit, TimelinePathParams};
use crate::response::{redirect, respond, ResultType};
use crate::timeline::{
    AbsoluteFn, AnchorKind, AnchorQueryFn, AnchorValue, OperationKey, ResolveFn, Timeline,
};
use crate::{RestError, RestService, Result};

pub const NAMESPACES_TIMELINE_PATH: &str = "/namespaces/:duration/:anchor/limit/:limit";

pub(crate) async fn namespaces_timeline(
    State(state): State<RestService>,
    Path(path): Path<TimelinePathParams>,
) -> Result<Response, RestError> {
    let duration = parse_duration(&path.duration)?;
    let range = state.config().count_range();
    let limit = match parse_limit(&path.limit, &range)? {
        Limit::Valid(limit) => limit,
        Limit::OutOfRange => {
            return Ok(redirect(format!(
                "/namespaces/{}/{}/limit/{}",
                path.duration, path.anchor, range.preset
            )))
        }
    };
    let (kind, anchor) = classify_anchor(&path.anchor)?;

    let result = timeline(state.store())
        .execute(OperationKey::new(duration, kind), anchor, limit)
        .await?;
    respond(result, ResultType::Namespace)
}

/// Namespace ids take precedence over internal object ids; the shapes are
/// disjoint (16 vs 24 hex characters) so the priority only decides error
/// wording.
fn classify_anchor(segment: &str) -> Result<(AnchorKind, Option<AnchorValue>), ParseError> {
    if let Some(kind) = classify_sentinel(SentinelSet::Time, segment) {
        return Ok((kind, None));
    }
    if is_hex_namespace_id(segment) {
        return Ok((
            AnchorKind::Id("id"),
            Some(AnchorValue::NamespaceId(segment.parse()?)),
        ));
    }
    if is_hex_object_id(segment) {
        return Ok((
            AnchorKind::Id("objectId"),
            Some(AnchorValue::ObjectId(segment.parse()?)),
        ));
    }
    Err(ParseError::UnrecognizedAnchor(segment.to_owned()))
}

fn timeline(store: Arc<dyn ChainStore>) -> Timeline<SortKey, NamespaceInfo> {
    let from: AnchorQueryFn<SortKey, NamespaceInfo> = {
        let store = store.clone();
        Arc::new(move |anchor, count| {
            let store = store.clone();
            async move { store.namespaces_from(&anchor, count).await }.boxed()
        })
    };
    let since: AnchorQueryFn<SortKey, NamespaceInfo> = {
        let store = store.clone();
        Arc::new(move |anchor, count| {
            let store = store.clone();
            async move { store.namespaces_since(&anchor, count).await }.boxed()
        })
    };

    let from_max: AbsoluteFn<NamespaceInfo> = {
        let from = from.clone();
        Arc::new(move |count| from(start_height_key_max(), count))
    };
    let since_min: AbsoluteFn<NamespaceInfo> = {
        let since = since.clone();
        Arc::new(move |count| since(start_height_key_min(), count))
    };

    let resolve_id: ResolveFn<SortKey> = {
        let store = store.clone();
        Arc::new(move |anchor| {
            let store = store.clone();
            async move {
                match anchor {
                    AnchorValue::NamespaceId(id) => Ok(store
                        .namespace_by_id(&id)
                        .await?
                        .map(|ns| start_height_key(ns.start_height, ns.id))),
                    _ => Ok(None),
                }
            }
            .boxed()
        })
    };
    let resolve_object_id: ResolveFn<SortKey> = {
        let store = store.clone();
        Arc::new(move |anchor| {
            let store = store.clone();
            async move {
                match anchor {
                    AnchorValue::ObjectId(id) => Ok(store
                        .namespace_by_object_id(&id)
                        .await?
                        .map(|ns| start_height_key(ns.start_height, ns.id))),
                    _ => Ok(None),
                }
            }
            .boxed()
        })
    };

    Timeline::builder()
        .absolute(from_max, since_min)
        .identifier("id", resolve_id, from.clone(), since.clone())
        .identifier("objectId", resolve_object_id, from, since)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_anchor_shapes() {
        assert_eq!(classify_anchor("max").unwrap().0, AnchorKind::Max);
        assert_eq!(
            classify_anchor(&"ab".repeat(8)).unwrap().0,
            AnchorKind::Id("id")
        );
        assert_eq!(
            classify_anchor(&"ab".repeat(12)).unwrap().0,
            AnchorKind::Id("objectId")
        );
        assert!(classify_anchor(&"ab".repeat(10)).is_err());
        assert!(classify_anchor("most").is_err());
    }
}
