use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{EnvSource, parse_flag};

fn default_api_url() -> String {
    "https://api-sg.aliexpress.com/sync".to_string()
}

fn default_refresh_url() -> String {
    "https://api-sg.aliexpress.com/rest/auth/token/refresh".to_string()
}

fn default_strict_verify() -> bool {
    true
}

/// Affiliate program credentials, supplied by the environment
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub app_key: String,
    pub app_secret: String,
    pub access_token: String,
    pub refresh_token: String,
    pub tracking_id: String,
}

impl Credentials {
    pub fn from_source(source: &dyn EnvSource) -> Self {
        let read = |key: &str| source.get(key).map(|v| v.trim().to_string()).unwrap_or_default();

        Self {
            app_key: read("APP_KEY"),
            app_secret: read("APP_SECRET"),
            access_token: read("ACCESS_TOKEN"),
            refresh_token: read("REFRESH_TOKEN"),
            tracking_id: read("TRACKING_ID"),
        }
    }

    /// Environment variable names whose value is empty
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("APP_KEY", &self.app_key),
            ("APP_SECRET", &self.app_secret),
            ("ACCESS_TOKEN", &self.access_token),
            ("REFRESH_TOKEN", &self.refresh_token),
            ("TRACKING_ID", &self.tracking_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &str) -> &'static str {
            if value.is_empty() { "<unset>" } else { "<redacted>" }
        }

        f.debug_struct("Credentials")
            .field("app_key", &self.app_key)
            .field("app_secret", &redact(&self.app_secret))
            .field("access_token", &redact(&self.access_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .field("tracking_id", &self.tracking_id)
            .finish()
    }
}

/// How the access token is checked before a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyMode {
    /// Minimal signed product query
    #[default]
    Probe,
    /// Token refresh call, success when a new access token comes back
    Refresh,
    /// Skip verification
    Off,
}

impl FromStr for VerifyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "probe" => Ok(Self::Probe),
            "refresh" => Ok(Self::Refresh),
            "off" | "none" | "disabled" => Ok(Self::Off),
            other => Err(format!("unknown token verify mode: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignAlgorithm {
    /// SHA-256 over the sorted parameters followed by the secret
    #[default]
    Sha256,
    /// HMAC-SHA256 keyed by the secret over the sorted parameters
    HmacSha256,
}

impl FromStr for SignAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" => Ok(Self::Sha256),
            "hmac-sha256" | "hmac_sha256" | "hmac" => Ok(Self::HmacSha256),
            other => Err(format!("unknown sign algorithm: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AffiliateConfig {
    pub credentials: Credentials,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_refresh_url")]
    pub refresh_url: String,
    pub verify_mode: VerifyMode,
    /// Probe verification also rejects bodies carrying `error_response`
    #[serde(default = "default_strict_verify")]
    pub strict_verify: bool,
    pub sign_algorithm: SignAlgorithm,
    /// Suffixes appended to the translated term for extra queries
    pub keyword_expansions: Vec<String>,
}

impl Default for AffiliateConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            api_url: default_api_url(),
            refresh_url: default_refresh_url(),
            verify_mode: VerifyMode::default(),
            strict_verify: default_strict_verify(),
            sign_algorithm: SignAlgorithm::default(),
            keyword_expansions: vec![],
        }
    }
}

impl AffiliateConfig {
    pub fn from_source(source: &dyn EnvSource) -> Self {
        let verify_mode = parse_enum(source, "TOKEN_VERIFY_MODE");
        let sign_algorithm = parse_enum(source, "SIGN_ALGORITHM");

        let keyword_expansions = source
            .get("KEYWORD_EXPANSIONS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            credentials: Credentials::from_source(source),
            api_url: source.get("AFFILIATE_API_URL").unwrap_or_else(default_api_url),
            refresh_url: source
                .get("AFFILIATE_REFRESH_URL")
                .unwrap_or_else(default_refresh_url),
            verify_mode,
            strict_verify: parse_flag(source, "TOKEN_VERIFY_STRICT", default_strict_verify()),
            sign_algorithm,
            keyword_expansions,
        }
    }
}

fn parse_enum<T>(source: &dyn EnvSource, key: &str) -> T
where
    T: FromStr<Err = String> + Default,
{
    match source.get(key) {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!("{key}: {e}, using default");
            T::default()
        }),
        None => T::default(),
    }
}
