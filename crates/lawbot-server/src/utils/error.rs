use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NotFound", msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BadRequest", msg)
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "InternalError", msg)
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Stage of the answer pipeline that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Retrieval,
    Summarization,
    Generation,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Retrieval => "retrieval",
            PipelineStage::Summarization => "summarization",
            PipelineStage::Generation => "generation",
        };
        f.write_str(name)
    }
}

/// Failure of one submission. Displays as the underlying error chain only,
/// which is what ends up in the error turn shown to the user.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{0:#}")]
    Retrieval(anyhow::Error),

    #[error("{0:#}")]
    Summarization(anyhow::Error),

    #[error("{0:#}")]
    Generation(anyhow::Error),
}

impl PipelineError {
    pub fn stage(&self) -> PipelineStage {
        match self {
            PipelineError::Retrieval(_) => PipelineStage::Retrieval,
            PipelineError::Summarization(_) => PipelineStage::Summarization,
            PipelineError::Generation(_) => PipelineStage::Generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_pipeline_error_displays_full_chain() {
        let inner: anyhow::Result<()> = Err(anyhow::anyhow!("connection refused"));
        let err = PipelineError::Generation(inner.context("Answer generation failed").unwrap_err());

        assert_eq!(err.stage(), PipelineStage::Generation);
        assert_eq!(err.to_string(), "Answer generation failed: connection refused");
    }

    #[test]
    fn test_api_error_status() {
        let response = ApiError::BadRequest("empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::NotFound("session".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
