use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Request-level error taxonomy. Per-path fetch failures are not represented
/// here: they degrade the affected path to "absent" inside the fetch step and
/// never fail the request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("none of the selected paths exist in this repository tree")]
    EmptySelection,

    #[error("failed to fetch repository data from GitHub: {0}")]
    UpstreamListing(String),

    #[error("LLM failed to generate content: {0}")]
    LlmFailure(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::EmptySelection => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::UpstreamListing(_) => StatusCode::BAD_GATEWAY,
            ApiError::LlmFailure(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(json!({ "success": false, "error": self.to_string() }))
    }
}
