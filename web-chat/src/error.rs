//! Web error type. Handlers return `Result<T, WebError>`; errors become a JSON `{error}` body.
//!
//! Provider failures never reach this type: they arrive as reply text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WebError>;

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            WebError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            WebError::Database(e) => {
                error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
            other => {
                error!(error = %other, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}
