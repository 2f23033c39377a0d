use serde::Serialize;

pub mod chain;
pub mod google;

pub use chain::{ChainTranslator, split_words};
pub use google::GoogleTranslator;

pub type LanguageCode = String;

/// Source language value that asks the provider to detect it
pub const AUTO: &str = "auto";

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Translation {
    pub text: String,
    pub from: LanguageCode,
    pub to: LanguageCode,
    pub provider: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_network: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unsupported language pair: {from} -> {to}")]
    UnsupportedLanguagePair { from: String, to: String },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// A lookup-only provider has no entry for the text
    #[error("No entry for {0:?}")]
    NoMatch(String),
}

impl TranslateError {
    pub fn is_no_match(&self) -> bool {
        matches!(self, TranslateError::NoMatch(_))
    }
}
