use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::application::use_cases::search::search_videos::SearchError;
use crate::application::use_cases::votes::cast_vote::CastVoteError;
use crate::application::use_cases::votes::get_tally::TallyError;
use crate::domain::votes::vote::ValidationError;

/// Every failure the HTTP surface can report. Bodies are plain text and never
/// carry store or upstream details; those only go to the logs.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("malformed vote payload")]
    MalformedPayload,

    #[error("vote payload too large")]
    PayloadTooLarge,

    #[error("Internal Server Error")]
    Storage,

    #[error("HTTP Method {0} Not Allowed")]
    MethodNotAllowed(Method),

    #[error("search proxy not configured")]
    SearchUnavailable,

    #[error("error reaching search api")]
    Upstream,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedPayload => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Storage => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::SearchUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

impl From<CastVoteError> for ApiError {
    fn from(e: CastVoteError) -> Self {
        match e {
            CastVoteError::Validation(v) => {
                tracing::debug!(error = %v, "vote_rejected");
                ApiError::Validation(v)
            }
            CastVoteError::Storage(source) => {
                tracing::error!(error = ?source, "vote_insert_failed");
                ApiError::Storage
            }
        }
    }
}

impl From<TallyError> for ApiError {
    fn from(e: TallyError) -> Self {
        match e {
            TallyError::Validation(v) => {
                tracing::debug!(error = %v, "tally_rejected");
                ApiError::Validation(v)
            }
            TallyError::Storage(source) => {
                tracing::error!(error = ?source, "tally_scan_failed");
                ApiError::Storage
            }
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::NotConfigured => ApiError::SearchUnavailable,
            SearchError::Upstream(source) => {
                tracing::error!(error = ?source, "search_proxy_failed");
                ApiError::Upstream
            }
        }
    }
}

/// Shared fallback for methods a route does not serve.
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method)
}

/// Answers plain `OPTIONS` requests; real CORS preflights are handled by the cors layer.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_a_client_error() {
        let err = ApiError::from(CastVoteError::Validation(ValidationError::MissingField(
            "tagId",
        )));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "tagId property missing from request");
    }

    #[test]
    fn storage_failure_hides_details() {
        let err = ApiError::from(TallyError::Storage(anyhow::anyhow!(
            "connection refused at 10.0.0.3"
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.to_string().contains("10.0.0.3"));
    }

    #[test]
    fn method_not_allowed_names_method() {
        let err = ApiError::MethodNotAllowed(Method::DELETE);
        assert_eq!(err.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(err.to_string(), "HTTP Method DELETE Not Allowed");
    }
}
