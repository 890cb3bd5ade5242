// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Cursor-based timeline REST layer over a chain indexing store.
//!
//! Every route follows the `/:duration/:anchor/limit/:limit` grammar:
//! `from` pages strictly below the anchor, `since` strictly above, pages
//! are presented descending in the family's sort order and never overlap.
//! Anchors are sentinels (`earliest`/`latest`, `least`/`most`, or the
//! `min`/`max` aliases) or family identifiers; out-of-range limits redirect
//! to the canonical URL.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tap::Pipe;
use tower::ServiceBuilder;

use timeline_store::ChainStore;

mod accounts;
mod blocks;
mod config;
mod error;
mod info;
mod metrics;
mod mosaics;
mod namespaces;
mod params;
mod response;
pub mod timeline;
mod transactions;

pub use accounts::{
    ACCOUNTS_BY_BALANCE_PATH, ACCOUNTS_BY_HARVESTED_PATH, ACCOUNTS_BY_IMPORTANCE_PATH,
};
pub use blocks::BLOCKS_TIMELINE_PATH;
pub use config::{ApiConfig, CountRange, PageSizeConfig};
pub use error::{RestError, Result};
pub use info::HEALTH_PATH;
pub use metrics::RestMetrics;
pub use mosaics::MOSAICS_TIMELINE_PATH;
pub use namespaces::NAMESPACES_TIMELINE_PATH;
pub use response::{ResultType, TimelinePage};
pub use transactions::{
    PARTIAL_TRANSACTIONS_TIMELINE_PATH, TRANSACTIONS_BY_TYPE_PATH,
    TRANSACTIONS_BY_TYPE_WITH_FILTER_PATH, TRANSACTIONS_TIMELINE_PATH,
    UNCONFIRMED_TRANSACTIONS_TIMELINE_PATH,
};

#[derive(Clone)]
pub struct RestService {
    store: Arc<dyn ChainStore>,
    config: Arc<ApiConfig>,
    metrics: Option<Arc<RestMetrics>>,
}

impl RestService {
    pub fn new(store: Arc<dyn ChainStore>, config: ApiConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
            metrics: None,
        }
    }

    pub fn with_metrics(&mut self, metrics: Arc<RestMetrics>) {
        self.metrics = Some(metrics);
    }

    pub fn store(&self) -> Arc<dyn ChainStore> {
        self.store.clone()
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn into_router(self) -> Router {
        let metrics = self.metrics.clone();
        let timeout = Duration::from_millis(self.config.request_timeout_ms);

        Router::new()
            .route("/", get(info::service_info))
            .route(info::HEALTH_PATH, get(info::health))
            .route(blocks::BLOCKS_TIMELINE_PATH, get(blocks::blocks_timeline))
            .route(
                transactions::TRANSACTIONS_TIMELINE_PATH,
                get(transactions::transactions_timeline),
            )
            .route(
                transactions::TRANSACTIONS_BY_TYPE_PATH,
                get(transactions::transactions_by_type_timeline),
            )
            .route(
                transactions::TRANSACTIONS_BY_TYPE_WITH_FILTER_PATH,
                get(transactions::transactions_by_type_with_filter_timeline),
            )
            .route(
                transactions::UNCONFIRMED_TRANSACTIONS_TIMELINE_PATH,
                get(transactions::unconfirmed_transactions_timeline),
            )
            .route(
                transactions::PARTIAL_TRANSACTIONS_TIMELINE_PATH,
                get(transactions::partial_transactions_timeline),
            )
            .route(
                mosaics::MOSAICS_TIMELINE_PATH,
                get(mosaics::mosaics_timeline),
            )
            .route(
                namespaces::NAMESPACES_TIMELINE_PATH,
                get(namespaces::namespaces_timeline),
            )
            .route(
                accounts::ACCOUNTS_BY_IMPORTANCE_PATH,
                get(accounts::accounts_by_importance_timeline),
            )
            .route(
                accounts::ACCOUNTS_BY_HARVESTED_PATH,
                get(accounts::accounts_by_harvested_timeline),
            )
            .route(
                accounts::ACCOUNTS_BY_BALANCE_PATH,
                get(accounts::accounts_by_balance_timeline),
            )
            .with_state(self)
            .layer(
                ServiceBuilder::new()
                    .layer(HandleErrorLayer::new(|_: tower::BoxError| async {
                        StatusCode::SERVICE_UNAVAILABLE
                    }))
                    .timeout(timeout),
            )
            .pipe(|router| {
                if let Some(metrics) = metrics {
                    router.layer(axum::middleware::from_fn_with_state(
                        metrics,
                        metrics::track,
                    ))
                } else {
                    router
                }
            })
    }

    pub async fn start_service(self, socket_address: SocketAddr) -> anyhow::Result<()> {
        let app = self.into_router();
        axum::Server::bind(&socket_address)
            .serve(app.into_make_service())
            .await?;
        Ok(())
    }
}
