use aliscout_affiliate::AffiliateError;
use aliscout_translator::TranslateError;
use serde_json::Value;

/// Coarse classification used to pick the response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingParameter,
    TranslationFailure,
    TokenInvalid,
    DownstreamCallFailure,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("{0} parameter is required")]
    MissingParameter(&'static str),

    #[error("Translation failed: {0}")]
    Translation(#[from] TranslateError),

    #[error("Access token is invalid or expired, please re-authorize")]
    TokenInvalid,

    #[error("Affiliate API call failed: {0}")]
    Downstream(#[from] AffiliateError),
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::MissingParameter(_) => ErrorKind::MissingParameter,
            SearchError::Translation(_) => ErrorKind::TranslationFailure,
            SearchError::TokenInvalid => ErrorKind::TokenInvalid,
            SearchError::Downstream(e) if e.is_token_error() => ErrorKind::TokenInvalid,
            SearchError::Downstream(_) => ErrorKind::DownstreamCallFailure,
        }
    }

    /// Raw upstream payload, when the failure came with one
    pub fn details(&self) -> Option<&Value> {
        match self {
            SearchError::Downstream(e) => e.payload(),
            _ => None,
        }
    }
}
