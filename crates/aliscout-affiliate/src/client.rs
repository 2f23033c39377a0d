use std::time::Duration;

use aliscout_config::Credentials;
use aliscout_config::affiliate::AffiliateConfig;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AffiliateError;
use crate::response::{extract_products, upstream_error};
use crate::signer::{ParamValue, SignatureRequest, Signer};

pub const PRODUCT_QUERY_METHOD: &str = "aliexpress.affiliate.product.query";

/// Value of the `sign_method` parameter for both signing algorithms
const SIGN_METHOD: &str = "sha256";

/// Placeholder keyword used by token probes
const PROBE_KEYWORD: &str = "test";

/// Raw outcome of a signed call: HTTP status and decoded body
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Option<Value>,
}

/// Result of a token refresh
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

#[derive(Clone)]
pub struct AffiliateClient {
    client: reqwest::Client,
    api_url: String,
    refresh_url: String,
    signer: Signer,
}

impl AffiliateClient {
    pub fn new(config: &AffiliateConfig, timeout: Duration) -> Result<Self, AffiliateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &AffiliateConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            refresh_url: config.refresh_url.clone(),
            signer: Signer::new(config.sign_algorithm),
        }
    }

    /// Search products by keywords, returning the product records verbatim
    pub async fn product_query(
        &self,
        credentials: &Credentials,
        keywords: &str,
    ) -> Result<Vec<Value>, AffiliateError> {
        let params = self.product_query_params(credentials, keywords)?;
        let RawResponse { status, body } =
            self.send_signed(&self.api_url, None, params, credentials).await?;
        let success = (200..300).contains(&status);

        let body = match body {
            Some(body) => body,
            None if !success => {
                return Err(AffiliateError::Status {
                    status,
                    body: Value::Null,
                });
            }
            None => return Err(AffiliateError::Decode("empty or non-JSON body".to_string())),
        };

        if let Some(err) = upstream_error(&body) {
            return Err(err);
        }

        if !success {
            return Err(AffiliateError::Status { status, body });
        }

        let products = extract_products(&body);
        tracing::debug!("Affiliate returned {} products for {keywords:?}", products.len());
        Ok(products)
    }

    /// Minimal product query used to check the access token
    pub async fn probe(&self, credentials: &Credentials) -> Result<RawResponse, AffiliateError> {
        let params = self.product_query_params(credentials, PROBE_KEYWORD)?;
        self.send_signed(&self.api_url, None, params, credentials).await
    }

    /// Exchange the refresh token for a new access token
    pub async fn refresh_token(&self, credentials: &Credentials) -> Result<TokenGrant, AffiliateError> {
        require("APP_KEY", &credentials.app_key)?;
        require("APP_SECRET", &credentials.app_secret)?;
        require("REFRESH_TOKEN", &credentials.refresh_token)?;

        let mut params = SignatureRequest::new();
        params.insert("app_key".into(), credentials.app_key.as_str().into());
        params.insert("refresh_token".into(), credentials.refresh_token.as_str().into());
        params.insert("sign_method".into(), SIGN_METHOD.into());
        params.insert("timestamp".into(), timestamp_ms());

        let api_path = rest_api_path(&self.refresh_url);
        let response = self
            .send_signed(&self.refresh_url, api_path.as_deref(), params, credentials)
            .await?;

        let body = response
            .body
            .ok_or_else(|| AffiliateError::Decode("empty or non-JSON body".to_string()))?;

        if let Some(err) = upstream_error(&body) {
            return Err(err);
        }

        let has_token = body
            .get("access_token")
            .and_then(Value::as_str)
            .is_some_and(|token| !token.is_empty());
        if has_token {
            return serde_json::from_value(body).map_err(|e| AffiliateError::Decode(e.to_string()));
        }

        let code = match body.get("code") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "unknown".to_string(),
        };
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("no access token in refresh response")
            .to_string();

        Err(AffiliateError::Upstream {
            code,
            message,
            payload: body,
        })
    }

    fn product_query_params(
        &self,
        credentials: &Credentials,
        keywords: &str,
    ) -> Result<SignatureRequest, AffiliateError> {
        require("APP_KEY", &credentials.app_key)?;
        require("APP_SECRET", &credentials.app_secret)?;
        require("ACCESS_TOKEN", &credentials.access_token)?;

        let mut params = SignatureRequest::new();
        params.insert("method".into(), PRODUCT_QUERY_METHOD.into());
        params.insert("app_key".into(), credentials.app_key.as_str().into());
        params.insert("access_token".into(), credentials.access_token.as_str().into());
        params.insert("sign_method".into(), SIGN_METHOD.into());
        params.insert("timestamp".into(), timestamp_ms());
        params.insert("keywords".into(), keywords.into());
        params.insert("tracking_id".into(), credentials.tracking_id.as_str().into());
        params.insert("target_language".into(), "EN".into());
        Ok(params)
    }

    /// Sign the parameters and POST them as a query string
    async fn send_signed(
        &self,
        url: &str,
        api_path: Option<&str>,
        params: SignatureRequest,
        credentials: &Credentials,
    ) -> Result<RawResponse, AffiliateError> {
        let pairs = self
            .signer
            .signed_pairs(api_path, params, &credentials.app_secret)?;

        tracing::debug!("Calling affiliate endpoint {url}");
        let response = self.client.post(url).query(&pairs).send().await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = serde_json::from_str(&text).ok();
        if body.is_none() {
            tracing::warn!("Affiliate endpoint answered HTTP {status} with a non-JSON body");
        }

        Ok(RawResponse { status, body })
    }
}

fn require(name: &'static str, value: &str) -> Result<(), AffiliateError> {
    if value.is_empty() {
        Err(AffiliateError::MissingCredential(name))
    } else {
        Ok(())
    }
}

fn timestamp_ms() -> ParamValue {
    ParamValue::Timestamp(chrono::Utc::now().timestamp_millis())
}

/// Path of a `/rest/...` endpoint as it enters the signature (`/auth/token/refresh`)
fn rest_api_path(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let path = parsed.path();
    let api_path = path.strip_prefix("/rest").unwrap_or(path);
    if api_path.is_empty() || api_path == "/" {
        None
    } else {
        Some(api_path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::Json;
    use axum::Router;
    use axum::extract::Query;
    use axum::routing::post;
    use serde_json::json;

    use super::*;
    use crate::signer::sign;

    fn credentials() -> Credentials {
        Credentials {
            app_key: "517514".into(),
            app_secret: "secret".into(),
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            tracking_id: "tracker".into(),
        }
    }

    async fn serve(router: Router) -> AffiliateConfig {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        AffiliateConfig {
            api_url: format!("http://{addr}/sync"),
            refresh_url: format!("http://{addr}/rest/auth/token/refresh"),
            ..AffiliateConfig::default()
        }
    }

    fn client(config: &AffiliateConfig) -> AffiliateClient {
        AffiliateClient::new(config, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn rest_path_is_stripped() {
        assert_eq!(
            rest_api_path("https://api-sg.aliexpress.com/rest/auth/token/refresh").as_deref(),
            Some("/auth/token/refresh")
        );
        assert_eq!(rest_api_path("https://api-sg.aliexpress.com/"), None);
        assert_eq!(rest_api_path("not a url"), None);
    }

    #[tokio::test]
    async fn product_query_sends_signed_parameters() {
        let seen: Arc<Mutex<Option<HashMap<String, String>>>> = Arc::default();
        let sink = seen.clone();
        let router = Router::new().route(
            "/sync",
            post(move |Query(params): Query<HashMap<String, String>>| {
                let sink = sink.clone();
                async move {
                    *sink.lock().unwrap() = Some(params);
                    Json(json!({"resp_result": {"result": {"products": [{"id": 1}]}}}))
                }
            }),
        );
        let config = serve(router).await;

        let products = client(&config)
            .product_query(&credentials(), "shoes")
            .await
            .unwrap();
        assert_eq!(products, vec![json!({"id": 1})]);

        let params = seen.lock().unwrap().clone().unwrap();
        assert_eq!(params["method"], PRODUCT_QUERY_METHOD);
        assert_eq!(params["keywords"], "shoes");
        assert_eq!(params["tracking_id"], "tracker");
        assert_eq!(params["target_language"], "EN");
        assert_eq!(params["sign_method"], "sha256");
        assert!(params["timestamp"].parse::<i64>().unwrap() > 1_600_000_000_000);

        let mut unsigned: SignatureRequest = params
            .iter()
            .filter(|(k, _)| k.as_str() != "sign")
            .map(|(k, v)| (k.clone(), ParamValue::Text(v.clone())))
            .collect();
        assert_eq!(params["sign"], sign(&unsigned, "secret"));
        unsigned.insert("keywords".into(), "boots".into());
        assert_ne!(params["sign"], sign(&unsigned, "secret"));
    }

    #[tokio::test]
    async fn error_response_becomes_upstream_error() {
        let router = Router::new().route(
            "/sync",
            post(|| async { Json(json!({"error_response": {"code": "27", "msg": "Invalid session"}})) }),
        );
        let config = serve(router).await;

        let err = client(&config)
            .product_query(&credentials(), "shoes")
            .await
            .unwrap_err();
        assert!(err.is_token_error());
    }

    #[tokio::test]
    async fn non_success_status_keeps_body() {
        let router = Router::new().route(
            "/sync",
            post(|| async {
                (
                    axum::http::StatusCode::BAD_GATEWAY,
                    Json(json!({"message": "upstream down"})),
                )
            }),
        );
        let config = serve(router).await;

        let err = client(&config)
            .product_query(&credentials(), "shoes")
            .await
            .unwrap_err();
        match err {
            AffiliateError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body["message"], "upstream down");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_any_call() {
        let config = AffiliateConfig {
            api_url: "http://127.0.0.1:9/sync".into(),
            ..AffiliateConfig::default()
        };
        let err = client(&config)
            .product_query(&Credentials::default(), "shoes")
            .await
            .unwrap_err();
        assert!(matches!(err, AffiliateError::MissingCredential("APP_KEY")));
    }

    #[tokio::test]
    async fn refresh_returns_new_token() {
        let router = Router::new().route(
            "/rest/auth/token/refresh",
            post(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params["refresh_token"], "refresh");
                assert!(params.contains_key("sign"));
                Json(json!({"access_token": "fresh", "refresh_token": "next", "expires_in": 86400}))
            }),
        );
        let config = serve(router).await;

        let grant = client(&config).refresh_token(&credentials()).await.unwrap();
        assert_eq!(grant.access_token, "fresh");
        assert_eq!(grant.refresh_token.as_deref(), Some("next"));
        assert_eq!(grant.expires_in, Some(86400));
    }

    #[tokio::test]
    async fn refresh_without_token_is_an_error() {
        let router = Router::new().route(
            "/rest/auth/token/refresh",
            post(|| async { Json(json!({"code": "InvalidRefreshToken", "message": "expired"})) }),
        );
        let config = serve(router).await;

        let err = client(&config).refresh_token(&credentials()).await.unwrap_err();
        assert_eq!(err.to_string(), "Affiliate API error InvalidRefreshToken: expired");
    }
}
