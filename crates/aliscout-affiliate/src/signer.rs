use std::collections::BTreeMap;
use std::fmt;

use aliscout_config::SignAlgorithm;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::error::AffiliateError;

type HmacSha256 = Hmac<Sha256>;

/// Name of the parameter carrying the signature
pub const SIGN_PARAM: &str = "sign";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Timestamp(i64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Timestamp(ms) => write!(f, "{ms}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Timestamp(value)
    }
}

/// Business parameters of one outbound call, ordered by name (byte order)
pub type SignatureRequest = BTreeMap<String, ParamValue>;

/// `key1value1key2value2...`, optionally prefixed with the API path
fn canonical(api_path: Option<&str>, params: &SignatureRequest) -> String {
    let mut out = api_path.unwrap_or_default().to_string();
    for (key, value) in params {
        out.push_str(key);
        out.push_str(&value.to_string());
    }
    out
}

/// SHA-256 over the sorted parameters followed by the secret, as uppercase hex
pub fn sign(params: &SignatureRequest, secret: &str) -> String {
    sha256_signature(None, params, secret)
}

fn sha256_signature(api_path: Option<&str>, params: &SignatureRequest, secret: &str) -> String {
    let mut payload = canonical(api_path, params);
    payload.push_str(secret);
    hex::encode_upper(Sha256::digest(payload.as_bytes()))
}

/// Signs outbound affiliate calls with the configured algorithm
#[derive(Debug, Clone, Copy, Default)]
pub struct Signer {
    algorithm: SignAlgorithm,
}

impl Signer {
    pub fn new(algorithm: SignAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> SignAlgorithm {
        self.algorithm
    }

    /// Signature over `params`; REST-style endpoints pass their path as `api_path`
    pub fn sign(
        &self,
        api_path: Option<&str>,
        params: &SignatureRequest,
        secret: &str,
    ) -> Result<String, AffiliateError> {
        match self.algorithm {
            SignAlgorithm::Sha256 => Ok(sha256_signature(api_path, params, secret)),
            SignAlgorithm::HmacSha256 => {
                let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
                    .map_err(|e| AffiliateError::Signing(e.to_string()))?;
                mac.update(canonical(api_path, params).as_bytes());
                Ok(hex::encode_upper(mac.finalize().into_bytes()))
            }
        }
    }

    /// Final outbound parameters: the business parameters plus `sign`
    pub fn signed_pairs(
        &self,
        api_path: Option<&str>,
        params: SignatureRequest,
        secret: &str,
    ) -> Result<Vec<(String, String)>, AffiliateError> {
        if params.contains_key(SIGN_PARAM) {
            return Err(AffiliateError::ReservedParameter(SIGN_PARAM.to_string()));
        }

        let signature = self.sign(api_path, &params, secret)?;

        let mut pairs: Vec<(String, String)> = params
            .into_iter()
            .map(|(key, value)| (key, value.to_string()))
            .collect();
        pairs.push((SIGN_PARAM.to_string(), signature));
        Ok(pairs)
    }
}
