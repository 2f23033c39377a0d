use std::sync::Arc;

use aliscout_core::TranslationResult;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TranslateParams {
    pub text: Option<String>,
    pub q: Option<String>,
    #[serde(alias = "to")]
    pub target_lang: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TranslateBody {
    pub text: Option<String>,
    #[serde(alias = "to")]
    pub target_lang: Option<String>,
}

/// `GET /translate?text=...` (or `q=...`)
pub async fn handle_translate_get(
    State(state): State<Arc<AppState>>,
    params: Result<Query<TranslateParams>, QueryRejection>,
) -> Result<Json<TranslationResult>, ApiError> {
    let Query(params) = params.map_err(ApiError::from)?;
    let text = [params.text, params.q]
        .into_iter()
        .flatten()
        .find(|t| !t.trim().is_empty())
        .unwrap_or_default();
    translate(&state, &text, params.target_lang.as_deref()).await
}

/// `POST /translate` with `{"text": ..., "target_lang" | "to": ...}`
pub async fn handle_translate_post(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TranslateBody>, JsonRejection>,
) -> Result<Json<TranslationResult>, ApiError> {
    let Json(body) = body.map_err(ApiError::from)?;
    let text = body.text.unwrap_or_default();
    translate(&state, &text, body.target_lang.as_deref()).await
}

async fn translate(
    state: &AppState,
    text: &str,
    target_lang: Option<&str>,
) -> Result<Json<TranslationResult>, ApiError> {
    let result = state.translation.translate(text, target_lang).await?;
    Ok(Json(result))
}
