// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use axum::extract::State;
use axum::Json;
use tap::Pipe;

use crate::{RestError, RestService, Result};

pub const HEALTH_PATH: &str = "/health";

pub(crate) async fn health() -> &'static str {
    "up"
}

#[derive(Debug, serde::Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub chain_height: u64,
}

pub(crate) async fn service_info(
    State(state): State<RestService>,
) -> Result<Json<ServiceInfo>, RestError> {
    let chain_height = state.store().chain_height().await?;
    ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        chain_height,
    }
    .pipe(Json)
    .pipe(Ok)
}
