use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use votechain_ledger::{ChainReader, ChainStore, ChainWriter};

use crate::error::{ServerError, ServerResult};

/// Body of `POST /vote`.
#[derive(Clone, Debug, Deserialize)]
pub struct VoteRequest {
    pub value: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Serialize `payload` as the JSON response body.
///
/// Encoding failures become a 500 with a plain-text message.
pub fn json_response<T: Serialize>(status: StatusCode, payload: &T) -> ServerResult<Response> {
    let body = serde_json::to_vec(payload).map_err(|e| ServerError::Encoding(e.to_string()))?;
    Ok((status, [(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// `GET /vote`: the whole chain in index order.
pub async fn list_votes(State(store): State<Arc<ChainStore>>) -> ServerResult<Response> {
    let entries = store.get_all()?;
    json_response(StatusCode::OK, &entries)
}

/// `POST /vote`: append a vote and return the updated chain.
pub async fn submit_vote(
    State(store): State<Arc<ChainStore>>,
    body: Bytes,
) -> ServerResult<Response> {
    let request: VoteRequest =
        serde_json::from_slice(&body).map_err(|e| ServerError::MalformedInput(e.to_string()))?;

    let entry = store.append(&request.value)?;
    tracing::info!(index = entry.index, hash = %entry.hash.short_hex(), "vote accepted");

    let entries = store.get_all()?;
    json_response(StatusCode::OK, &entries)
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler(
    State(store): State<Arc<ChainStore>>,
) -> ServerResult<Json<serde_json::Value>> {
    let head = store.head()?;
    Ok(Json(json!({
        "name": "votechain-server",
        "version": env!("CARGO_PKG_VERSION"),
        "length": head.length,
        "head": head.hash.to_hex(),
    })))
}
