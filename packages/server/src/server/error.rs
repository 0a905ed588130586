//! Mapping from service errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::common::EngagementError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl EngagementError {
    /// Status code for each error kind. No wildcard arm: new kinds must be classified here.
    pub fn status_code(&self) -> StatusCode {
        match self {
            EngagementError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            EngagementError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            EngagementError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EngagementError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_kind_has_its_status() {
        assert_eq!(
            EngagementError::invalid_input("missing").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            EngagementError::NotConfigured("Vector search").status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            EngagementError::Backend(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn backend_message_is_passed_through() {
        let response = EngagementError::Backend(anyhow::anyhow!("connection refused")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
