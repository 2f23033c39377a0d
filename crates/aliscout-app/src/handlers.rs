use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod index;
pub mod search;
pub mod translate;

use index::{health, index};
use search::handle_search;
use translate::{handle_translate_get, handle_translate_post};

/// Build the HTTP router
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "request",
            id = %uuid::Uuid::new_v4(),
            method = %request.method(),
            path = %request.uri().path(),
        )
    });

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route(
            "/translate",
            get(handle_translate_get).post(handle_translate_post),
        )
        .route("/search", get(handle_search))
        .layer(trace)
        .layer(cors)
        .with_state(state)
}
