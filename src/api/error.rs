// src/api/error.rs
// Maps handler failures to status codes and JSON error bodies

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Required field absent or empty
    #[error("Missing {0}")]
    MissingField(&'static str),

    /// Body could not be read as a practice request
    #[error("{0}")]
    BadRequest(String),

    /// No route under `/api`
    #[error("Not found")]
    NotFound,

    /// Caller exceeded the admission window
    #[error("Too many requests, please try again later.")]
    RateLimited,

    /// Anything that went wrong after validation, usually the upstream call
    #[error("Server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            ApiError::Internal(err) => {
                let details = format!("{:#}", err);
                error!(error = %details, "Practice handler error");
                json!({ "error": self.to_string(), "details": details })
            }
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
