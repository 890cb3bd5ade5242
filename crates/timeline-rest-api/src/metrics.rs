// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, State};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use prometheus::{
    register_histogram_vec_with_registry, register_int_counter_vec_with_registry, HistogramVec,
    IntCounterVec, Registry,
};

const LATENCY_SEC_BUCKETS: &[f64] = &[
    0.001, 0.002, 0.005, 0.01, 0.02, 0.05, 0.1, 0.2, 0.5, 1.0, 2.0, 5.0, 10.0,
];

#[derive(Clone)]
pub struct RestMetrics {
    pub requests_received: IntCounterVec,
    pub requests_failed: IntCounterVec,
    pub request_latency: HistogramVec,
}

impl RestMetrics {
    pub fn new(registry: &Registry) -> Arc<Self> {
        Arc::new(Self {
            requests_received: register_int_counter_vec_with_registry!(
                "timeline_requests_received",
                "Number of requests received, by route",
                &["route"],
                registry
            )
            .unwrap(),

            requests_failed: register_int_counter_vec_with_registry!(
                "timeline_requests_failed",
                "Number of requests that completed with an error status, by route and status",
                &["route", "status"],
                registry
            )
            .unwrap(),

            request_latency: register_histogram_vec_with_registry!(
                "timeline_request_latency",
                "Time taken to respond, by route",
                &["route"],
                LATENCY_SEC_BUCKETS.to_vec(),
                registry
            )
            .unwrap(),
        })
    }
}

pub(crate) async fn track(
    State(metrics): State<Arc<RestMetrics>>,
    request: Request<axum::body::Body>,
    next: Next<axum::body::Body>,
) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    metrics.requests_received.with_label_values(&[&route]).inc();
    let start = Instant::now();
    let response = next.run(request).await;
    metrics
        .request_latency
        .with_label_values(&[&route])
        .observe(start.elapsed().as_secs_f64());

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        metrics
            .requests_failed
            .with_label_values(&[&route, status.as_str()])
            .inc();
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_register_once_per_registry() {
        let registry = Registry::new();
        let metrics = RestMetrics::new(&registry);
        metrics.requests_received.with_label_values(&["/x"]).inc();
        assert!(!registry.gather().is_empty());
    }
}
