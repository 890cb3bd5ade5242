// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::RestError;
use crate::timeline::TimelineResult;

/// Family tag propagated to downstream formatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultType {
    Block,
    Transaction,
    Mosaic,
    Namespace,
    Account,
}

impl ResultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::Block => "block",
            ResultType::Transaction => "transaction",
            ResultType::Mosaic => "mosaic",
            ResultType::Namespace => "namespace",
            ResultType::Account => "account",
        }
    }
}

/// One timeline page: `{ "payload": [...], "type": "<family-tag>" }`.
#[derive(Debug, serde::Serialize)]
pub struct TimelinePage<T> {
    pub payload: Vec<T>,
    #[serde(rename = "type", serialize_with = "serialize_result_type")]
    pub result_type: ResultType,
}

fn serialize_result_type<S: serde::Serializer>(
    value: &ResultType,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_str())
}

impl<T: serde::Serialize> IntoResponse for TimelinePage<T> {
    fn into_response(self) -> Response {
        axum::Json(self).into_response()
    }
}

/// Map a timeline outcome onto the response surface: a page (possibly
/// empty) is 200, a lookup miss is 404.
pub(crate) fn respond<T: serde::Serialize>(
    result: TimelineResult<T>,
    result_type: ResultType,
) -> Result<Response, RestError> {
    match result {
        TimelineResult::Page(payload) => Ok(TimelinePage {
            payload,
            result_type,
        }
        .into_response()),
        TimelineResult::NotFound => Err(RestError::not_found("no resource exists with id")),
    }
}

/// Canonicalizing redirect for out-of-range limits.
pub(crate) fn redirect(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_serialization_carries_type_tag() {
        let page = TimelinePage {
            payload: vec![1u64, 2, 3],
            result_type: ResultType::Block,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["type"], "block");
        assert_eq!(json["payload"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_empty_page_is_success() {
        let response = respond::<u64>(TimelineResult::Page(vec![]), ResultType::Mosaic).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = respond::<u64>(TimelineResult::NotFound, ResultType::Mosaic).unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_redirect_is_302_with_location() {
        let response = redirect("/blocks/from/latest/limit/20".to_owned());
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/blocks/from/latest/limit/20"
        );
    }
}
