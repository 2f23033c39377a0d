use std::sync::Arc;

use aliscout_translator::{AUTO, Translator};

use crate::error::SearchError;
use crate::preprocess::{Preprocessor, QueryPreprocessor};
use crate::types::TranslationResult;

/// Translation entry point shared by `/translate` and `/search`.
///
/// In strict mode provider failures are returned to the caller; otherwise
/// the failure is logged and the original text stands in for the translation.
#[derive(Clone)]
pub struct TranslationService {
    translator: Arc<dyn Translator>,
    default_target: String,
    strict: bool,
}

impl TranslationService {
    pub fn new(translator: Arc<dyn Translator>, default_target: String, strict: bool) -> Self {
        Self {
            translator,
            default_target,
            strict,
        }
    }

    pub fn default_target(&self) -> &str {
        &self.default_target
    }

    /// Translate `text` into `target` (the configured default when `None`)
    pub async fn translate(
        &self,
        text: &str,
        target: Option<&str>,
    ) -> Result<TranslationResult, SearchError> {
        let query = QueryPreprocessor.process(text);
        if query.is_empty() {
            return Err(SearchError::MissingParameter("text"));
        }

        let target = target
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(self.default_target.as_str())
            .to_lowercase();

        match self.translator.translate(&query, AUTO.to_string(), target).await {
            Ok(translation) => {
                tracing::info!(
                    "Translated {query:?} -> {:?} via {}",
                    translation.text,
                    translation.provider
                );
                Ok(TranslationResult {
                    original: text.trim().to_string(),
                    translated: translation.text,
                })
            }
            Err(e) if self.strict => {
                tracing::error!("Translation of {query:?} failed: {e}");
                Err(e.into())
            }
            Err(e) => {
                tracing::warn!("Translation of {query:?} failed, using original text: {e}");
                Ok(TranslationResult {
                    original: text.trim().to_string(),
                    translated: query,
                })
            }
        }
    }
}
