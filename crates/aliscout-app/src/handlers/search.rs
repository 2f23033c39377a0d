use std::sync::Arc;

use aliscout_core::SearchResult;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(alias = "keywords")]
    pub q: Option<String>,
}

pub async fn handle_search(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResult>, ApiError> {
    let Query(params) = params.map_err(ApiError::from)?;
    tracing::debug!("Search requested: {:?}", params.q);

    let result = state.search.search(params.q.as_deref()).await?;
    tracing::info!(
        "Search for {:?} returned {} products",
        result.search_for,
        result.results.len()
    );

    Ok(Json(result))
}
