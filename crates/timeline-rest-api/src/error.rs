// Copyright (c) Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use axum::http::StatusCode;

use crate::timeline::TimelineError;
use timeline_store::StoreError;
use timeline_types::ParseError;

pub type Result<T, E = RestError> = std::result::Result<T, E>;

/// Terminal error sink for the route layer.
///
/// Parse failures surface as 409 (syntactically present but not
/// dispatchable), lookup misses as 404, store failures as 500.
#[derive(Debug)]
pub struct RestError {
    status: StatusCode,
    message: Option<String>,
}

impl RestError {
    pub fn new<T: Into<String>>(status: StatusCode, message: T) -> Self {
        Self {
            status,
            message: Some(message.into()),
        }
    }

    pub fn not_found<T: Into<String>>(message: T) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn invalid_argument<T: Into<String>>(message: T) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl axum::response::IntoResponse for RestError {
    fn into_response(self) -> axum::response::Response {
        match self.message {
            Some(message) => (self.status, message).into_response(),
            None => self.status.into_response(),
        }
    }
}

impl From<ParseError> for RestError {
    fn from(value: ParseError) -> Self {
        Self::invalid_argument(value.to_string())
    }
}

impl From<StoreError> for RestError {
    fn from(value: StoreError) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, value.to_string())
    }
}

impl From<TimelineError> for RestError {
    fn from(value: TimelineError) -> Self {
        match value {
            TimelineError::Unsupported => {
                Self::invalid_argument("unsupported timeline operation")
            }
            TimelineError::Store(err) => err.into(),
        }
    }
}

impl From<anyhow::Error> for RestError {
    fn from(value: anyhow::Error) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let parse: RestError = ParseError::UnknownKeyword("longest".into()).into();
        assert_eq!(parse.status(), StatusCode::CONFLICT);

        let store: RestError = StoreError::Unavailable("down".into()).into();
        assert_eq!(store.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let dispatch: RestError = TimelineError::Unsupported.into();
        assert_eq!(dispatch.status(), StatusCode::CONFLICT);

        assert_eq!(
            RestError::not_found("missing").status(),
            StatusCode::NOT_FOUND
        );
    }
}
