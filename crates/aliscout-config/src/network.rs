use serde::{Deserialize, Serialize};

use crate::{EnvSource, parse_or};

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Where the HTTP server listens
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl NetworkConfig {
    pub fn from_source(source: &dyn EnvSource) -> Self {
        let host = source.get("HOST").unwrap_or_else(default_host);
        let port = parse_or(source, "PORT", default_port());

        Self { host, port }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
