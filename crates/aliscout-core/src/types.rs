use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationResult {
    pub original: String,
    pub translated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Translated term the affiliate API was queried with
    pub search_for: String,
    /// Product records exactly as the affiliate API returned them
    pub results: Vec<Value>,
}
