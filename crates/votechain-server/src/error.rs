use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use votechain_ledger::LedgerError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("malformed request body: {0}")]
    MalformedInput(String),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("unable to marshal: {0}")]
    Encoding(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match &self {
            ServerError::MalformedInput(_) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": self.to_string() })),
            )
                .into_response(),
            ServerError::Ledger(err) if err.is_rejection() => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "message": "invalid vote" })),
            )
                .into_response(),
            _ => {
                tracing::error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}
