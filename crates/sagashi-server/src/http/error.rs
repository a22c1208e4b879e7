//! Mapping of library errors onto HTTP responses.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sagashi_core::SagashiError;
use sagashi_links::LinkError;
use tokio::task::JoinError;
use tracing::warn;

use super::types::ErrorResponse;

/// An error returned by a handler, rendered as `{ code, message }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// 400 with code `BAD_REQUEST`.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    /// 404 with the given code.
    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }
}

impl From<SagashiError> for ApiError {
    fn from(err: SagashiError) -> Self {
        match err {
            SagashiError::EmptyQuery => {
                Self::new(StatusCode::BAD_REQUEST, "EMPTY_QUERY", err.to_string())
            }
            SagashiError::InvalidPolicy(_) => {
                Self::new(StatusCode::BAD_REQUEST, "INVALID_POLICY", err.to_string())
            }
            SagashiError::RegexError(_) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                err.to_string(),
            ),
        }
    }
}

impl From<LinkError> for ApiError {
    fn from(err: LinkError) -> Self {
        match err {
            LinkError::InvalidUrl(_) => {
                Self::new(StatusCode::BAD_REQUEST, "INVALID_URL", err.to_string())
            }
            LinkError::ForbiddenHost(_) => {
                Self::new(StatusCode::BAD_REQUEST, "FORBIDDEN_HOST", err.to_string())
            }
            LinkError::NotFound => Self::not_found("NOT_FOUND", err.to_string()),
            LinkError::TooManyRedirects(_) => {
                Self::new(StatusCode::BAD_GATEWAY, "TOO_MANY_REDIRECTS", err.to_string())
            }
            LinkError::Http(_) => {
                Self::new(StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_BODY", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_QUERY", rejection.body_text())
    }
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            format!("scoring task failed: {err}"),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            warn!(code = self.code, message = %self.message, "request failed");
        }
        (self.status, Json(ErrorResponse::new(self.code, self.message))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_are_client_errors() {
        let err = ApiError::from(SagashiError::EmptyQuery);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "EMPTY_QUERY");

        let err = ApiError::from(SagashiError::InvalidPolicy("threshold is NaN".into()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn link_errors_map_to_status() {
        assert_eq!(
            ApiError::from(LinkError::InvalidUrl("x".into())).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::from(LinkError::NotFound).status, StatusCode::NOT_FOUND);
        let forbidden = ApiError::from(LinkError::ForbiddenHost("10.0.0.1".into()));
        assert_eq!(forbidden.status, StatusCode::BAD_REQUEST);
        assert_eq!(forbidden.code, "FORBIDDEN_HOST");
        assert_eq!(
            ApiError::from(LinkError::TooManyRedirects(10)).status,
            StatusCode::BAD_GATEWAY
        );
    }
}
