use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use votechain_ledger::ChainStore;

use crate::handler;

/// Build the axum router with all votechain endpoints.
pub fn build_router(store: Arc<ChainStore>) -> Router {
    Router::new()
        .route("/vote", get(handler::list_votes).post(handler::submit_vote))
        .route("/health", get(handler::health_handler))
        .route("/info", get(handler::info_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
