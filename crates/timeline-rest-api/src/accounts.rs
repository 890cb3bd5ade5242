// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Response;
use futures::FutureExt;

use timeline_store::{AccountInfo, AccountRanking, ChainStore, SortKey};
use timeline_types::{
    is_base32_address, is_hex_address, is_hex_public_key, Address, NamespaceId, ParseError,
    SentinelSet,
};

use crate::params::{classify_sentinel, parse_duration, parse_limit, Limit, TimelinePathParams};
use crate::response::{redirect, respond, ResultType};
use crate::timeline::{
    AbsoluteFn, AnchorKind, AnchorQueryFn, AnchorValue, OperationKey, ResolveFn, Timeline,
};
use crate::{RestError, RestService, Result};

pub const ACCOUNTS_BY_IMPORTANCE_PATH: &str = "/accounts/importance/:duration/:anchor/limit/:limit";
pub const ACCOUNTS_BY_HARVESTED_PATH: &str =
    "/accounts/harvested/:which/:duration/:anchor/limit/:limit";
pub const ACCOUNTS_BY_BALANCE_PATH: &str = "/accounts/balance/:which/:duration/:anchor/limit/:limit";

#[derive(Debug, serde::Deserialize)]
pub(crate) struct WhichPathParams {
    which: String,
    duration: String,
    anchor: String,
    limit: String,
}

pub(crate) async fn accounts_by_importance_timeline(
    State(state): State<RestService>,
    Path(path): Path<TimelinePathParams>,
) -> Result<Response, RestError> {
    let canonical = |preset: usize| {
        format!(
            "/accounts/importance/{}/{}/limit/{}",
            path.duration, path.anchor, preset
        )
    };
    run(
        state,
        AccountRanking::Importance,
        &path.duration,
        &path.anchor,
        &path.limit,
        canonical,
    )
    .await
}

pub(crate) async fn accounts_by_harvested_timeline(
    State(state): State<RestService>,
    Path(path): Path<WhichPathParams>,
) -> Result<Response, RestError> {
    let ranking = match path.which.as_str() {
        "blocks" => AccountRanking::HarvestedBlocks,
        "fees" => AccountRanking::HarvestedFees,
        _ => return Err(ParseError::UnknownKeyword(path.which.clone()).into()),
    };
    let canonical = |preset: usize| {
        format!(
            "/accounts/harvested/{}/{}/{}/limit/{}",
            path.which, path.duration, path.anchor, preset
        )
    };
    run(
        state,
        ranking,
        &path.duration,
        &path.anchor,
        &path.limit,
        canonical,
    )
    .await
}

pub(crate) async fn accounts_by_balance_timeline(
    State(state): State<RestService>,
    Path(path): Path<WhichPathParams>,
) -> Result<Response, RestError> {
    let namespace = well_known_namespace(&state, &path.which)?;
    let duration = parse_duration(&path.duration)?;
    let range = state.config().count_range();
    let limit = match parse_limit(&path.limit, &range)? {
        Limit::Valid(limit) => limit,
        Limit::OutOfRange => {
            return Ok(redirect(format!(
                "/accounts/balance/{}/{}/{}/limit/{}",
                path.which, path.duration, path.anchor, range.preset
            )))
        }
    };
    let (kind, anchor) = classify_anchor(&path.anchor, state.config().network_id)?;

    // The alias is resolved on every query; it can be re-linked while the
    // server runs. A missing or non-mosaic alias means the family has no
    // data set to page over.
    let mosaic = state
        .store()
        .mosaic_alias(&namespace)
        .await?
        .ok_or_else(|| RestError::not_found("no mosaic is linked to the well-known namespace"))?;

    let result = timeline(state.store(), AccountRanking::MosaicBalance(mosaic))
        .execute(OperationKey::new(duration, kind), anchor, limit)
        .await?;
    respond(result, ResultType::Account)
}

fn well_known_namespace(state: &RestService, which: &str) -> Result<NamespaceId, RestError> {
    let config = state.config();
    match which {
        "currency" => Ok(config.currency_namespace_id),
        "harvest" => Ok(config.harvest_namespace_id),
        "xem" => Ok(config.xem_namespace_id),
        _ => Err(ParseError::UnknownKeyword(which.to_owned()).into()),
    }
}

async fn run(
    state: RestService,
    ranking: AccountRanking,
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
    let (kind, anchor) = classify_anchor(anchor, state.config().network_id)?;

    let result = timeline(state.store(), ranking)
        .execute(OperationKey::new(duration, kind), anchor, limit)
        .await?;
    respond(result, ResultType::Account)
}

/// Base32 addresses first, then hex addresses, then public keys. The
/// network byte of either address form must match the configured network.
fn classify_anchor(
    segment: &str,
    network_id: u8,
) -> Result<(AnchorKind, Option<AnchorValue>), ParseError> {
    if let Some(kind) = classify_sentinel(SentinelSet::Quantity, segment) {
        return Ok((kind, None));
    }
    if is_base32_address(segment) {
        let address = Address::from_base32(segment)?.require_network(network_id)?;
        return Ok((AnchorKind::Id("address"), Some(AnchorValue::Address(address))));
    }
    if is_hex_address(segment) {
        let address = Address::from_hex(segment)?.require_network(network_id)?;
        return Ok((AnchorKind::Id("address"), Some(AnchorValue::Address(address))));
    }
    if is_hex_public_key(segment) {
        return Ok((
            AnchorKind::Id("publicKey"),
            Some(AnchorValue::PublicKey(segment.parse()?)),
        ));
    }
    Err(ParseError::UnrecognizedAnchor(segment.to_owned()))
}

fn timeline(store: Arc<dyn ChainStore>, ranking: AccountRanking) -> Timeline<SortKey, AccountInfo> {
    let from: AnchorQueryFn<SortKey, AccountInfo> = {
        let store = store.clone();
        Arc::new(move |anchor, count| {
            let store = store.clone();
            async move { store.accounts_from(&ranking, &anchor, count).await }.boxed()
        })
    };
    let since: AnchorQueryFn<SortKey, AccountInfo> = {
        let store = store.clone();
        Arc::new(move |anchor, count| {
            let store = store.clone();
            async move { store.accounts_since(&ranking, &anchor, count).await }.boxed()
        })
    };

    let from_max: AbsoluteFn<AccountInfo> = {
        let from = from.clone();
        Arc::new(move |count| from(ranking.key_max(), count))
    };
    let since_min: AbsoluteFn<AccountInfo> = {
        let since = since.clone();
        Arc::new(move |count| since(ranking.key_min(), count))
    };

    let resolve_address: ResolveFn<SortKey> = {
        let store = store.clone();
        Arc::new(move |anchor| {
            let store = store.clone();
            async move {
                match anchor {
                    AnchorValue::Address(address) => Ok(store
                        .account_by_address(&address)
                        .await?
                        .map(|account| ranking.sort_key(&account))),
                    _ => Ok(None),
                }
            }
            .boxed()
        })
    };
    let resolve_public_key: ResolveFn<SortKey> = {
        let store = store.clone();
        Arc::new(move |anchor| {
            let store = store.clone();
            async move {
                match anchor {
                    AnchorValue::PublicKey(key) => Ok(store
                        .account_by_public_key(&key)
                        .await?
                        .map(|account| ranking.sort_key(&account))),
                    _ => Ok(None),
                }
            }
            .boxed()
        })
    };

    Timeline::builder()
        .absolute(from_max, since_min)
        .identifier("address", resolve_address, from.clone(), since.clone())
        .identifier("publicKey", resolve_public_key, from, since)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NETWORK: u8 = 0x68;

    fn address_text() -> String {
        Address([NETWORK; 25]).to_string()
    }

    #[test]
    fn test_classify_quantity_sentinels() {
        assert_eq!(
            classify_anchor("most", NETWORK).unwrap().0,
            AnchorKind::Max
        );
        assert_eq!(
            classify_anchor("least", NETWORK).unwrap().0,
            AnchorKind::Min
        );
        assert!(classify_anchor("latest", NETWORK).is_err());
    }

    #[test]
    fn test_classify_address_forms() {
        let (kind, _) = classify_anchor(&address_text(), NETWORK).unwrap();
        assert_eq!(kind, AnchorKind::Id("address"));

        let hex_form = hex::encode_upper([NETWORK; 25]);
        let (kind, _) = classify_anchor(&hex_form, NETWORK).unwrap();
        assert_eq!(kind, AnchorKind::Id("address"));
    }

    #[test]
    fn test_classify_rejects_wrong_network() {
        assert!(classify_anchor(&address_text(), 0x98).is_err());
    }

    #[test]
    fn test_classify_public_key() {
        let (kind, _) = classify_anchor(&"ef".repeat(32), NETWORK).unwrap();
        assert_eq!(kind, AnchorKind::Id("publicKey"));
    }

    #[test]
    fn test_classify_rejects_unknown_shapes() {
        assert!(classify_anchor("longest", NETWORK).is_err());
        assert!(classify_anchor(&"ef".repeat(12), NETWORK).is_err());
    }
}
