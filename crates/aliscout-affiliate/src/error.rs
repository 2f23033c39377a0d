use serde_json::Value;

/// Upstream error codes meaning the access token is unusable
const TOKEN_ERROR_CODES: [&str; 3] = ["27", "IllegalAccessToken", "InvalidSession"];

#[derive(Debug, thiserror::Error)]
pub enum AffiliateError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode affiliate response: {0}")]
    Decode(String),

    #[error("Affiliate API returned HTTP {status}")]
    Status { status: u16, body: Value },

    #[error("Affiliate API error {code}: {message}")]
    Upstream {
        code: String,
        message: String,
        payload: Value,
    },

    #[error("{0} is not configured")]
    MissingCredential(&'static str),

    #[error("Parameter {0:?} is reserved for the signature")]
    ReservedParameter(String),

    #[error("Signing failed: {0}")]
    Signing(String),
}

impl AffiliateError {
    /// Raw upstream body, when the failure came with one
    pub fn payload(&self) -> Option<&Value> {
        match self {
            AffiliateError::Status { body, .. } => Some(body),
            AffiliateError::Upstream { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// The upstream rejected the access token
    pub fn is_token_error(&self) -> bool {
        match self {
            AffiliateError::Upstream { code, .. } => TOKEN_ERROR_CODES.contains(&code.as_str()),
            _ => false,
        }
    }
}
