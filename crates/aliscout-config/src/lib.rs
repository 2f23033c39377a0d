use std::env;

use serde::{Deserialize, Serialize};

use self::affiliate::AffiliateConfig;
use self::network::NetworkConfig;
use self::translator::TranslatorConfig;

pub mod affiliate;
pub mod network;
pub mod translator;

pub use affiliate::{Credentials, SignAlgorithm, VerifyMode};

/// Source of raw configuration values, keyed by environment variable name
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads from the process environment
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl<F> EnvSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        self(key)
    }
}

pub(crate) fn parse_or<T: std::str::FromStr>(source: &dyn EnvSource, key: &str, default: T) -> T {
    source
        .get(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

pub(crate) fn parse_flag(source: &dyn EnvSource, key: &str, default: bool) -> bool {
    match source.get(key).map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        _ => default,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    pub translator: TranslatorConfig,
    pub affiliate: AffiliateConfig,

    /// Timeout applied to every outbound HTTP call
    pub http_timeout_seconds: u64,
}

impl Config {
    /// Build the configuration from the process environment
    pub fn new() -> Self {
        Self::from_source(&ProcessEnv)
    }

    pub fn from_source(source: &dyn EnvSource) -> Self {
        let http_timeout_seconds = parse_or(source, "HTTP_TIMEOUT_SECONDS", 10); // 10 seconds default

        Config {
            network: NetworkConfig::from_source(source),
            translator: TranslatorConfig::from_source(source),
            affiliate: AffiliateConfig::from_source(source),

            http_timeout_seconds,
        }
    }

    /// Log a warning for every credential the environment did not supply.
    ///
    /// Missing credentials never stop the process; requests that need them
    /// fail at request time instead.
    pub fn warn_missing(&self) {
        for name in self.affiliate.credentials.missing() {
            tracing::warn!("{name} is not set, affiliate calls will fail until it is provided");
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_source(&|_: &str| -> Option<String> { None })
    }
}
