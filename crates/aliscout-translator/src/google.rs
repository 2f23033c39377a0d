use std::time::Duration;

use async_trait::async_trait;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

/// Google Translate through the public `gtx` client endpoint
#[derive(Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_url: String,
}

impl GoogleTranslator {
    pub fn new(api_url: String, timeout: Duration) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_url })
    }

    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if to.trim().is_empty() {
            return Err(TranslateError::UnsupportedLanguagePair { from, to });
        }

        let params = [
            ("client", "gtx"),
            ("sl", from.as_str()),
            ("tl", to.as_str()),
            ("dt", "t"),
            ("q", text),
        ];

        let response = self.client.get(&self.api_url).query(&params).send().await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if response.status() == 400 {
            return Err(TranslateError::UnsupportedLanguagePair { from, to });
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            TranslateError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        let translated_text = collect_segments(&json)
            .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))?;

        let detected = json
            .get(2)
            .and_then(|v| v.as_str())
            .map(String::from)
            .unwrap_or(from);

        Ok(Translation {
            text: translated_text,
            from: detected,
            to,
            provider: "google".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Google Translate".to_string(),
            requires_network: true,
        }
    }
}

/// Long input comes back split into sentence segments: `[[["seg", "src", ..], ..], ..]`
fn collect_segments(json: &serde_json::Value) -> Option<String> {
    let segments = json.get(0)?.as_array()?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|v| v.as_str()))
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text.trim().to_string())
    }
}
