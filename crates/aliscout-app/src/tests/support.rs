//! Shared fixtures: stub providers and a fake affiliate endpoint

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use aliscout_affiliate::{AffiliateClient, TokenVerifier};
use aliscout_config::Credentials;
use aliscout_config::affiliate::AffiliateConfig;
use aliscout_core::{SearchOrchestrator, TranslationService};
use aliscout_lang_hebrew::LexiconTranslator;
use aliscout_translator::{
    ChainTranslator, LanguageCode, ProviderMetadata, TranslateError, Translation, Translator,
};
use async_trait::async_trait;
use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::extract::Query;
use axum::http::{Request, StatusCode};
use axum::routing::post;
use serde_json::Value;
use tower::ServiceExt;

use crate::handlers::router;
use crate::state::AppState;

/// Live-provider stand-in: records calls, returns the text unchanged
#[derive(Default)]
pub struct LiveStub {
    pub calls: Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

impl LiveStub {
    pub fn texts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(t, _)| t.clone()).collect()
    }
}

#[async_trait]
impl Translator for LiveStub {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        self.calls.lock().unwrap().push((text.to_string(), to.clone()));
        if self.fail {
            return Err(TranslateError::ApiError("HTTP 503".into()));
        }
        Ok(Translation {
            text: text.to_string(),
            from,
            to,
            provider: "stub".into(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "stub".into(),
            requires_network: true,
        }
    }
}

pub struct FixedVerifier {
    pub answer: bool,
    pub calls: AtomicUsize,
}

#[async_trait]
impl TokenVerifier for FixedVerifier {
    async fn verify(&self, _credentials: &Credentials) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

pub struct Options {
    pub verified: bool,
    pub strict: bool,
    pub live_fails: bool,
    pub reply: fn(&str) -> Value,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            verified: true,
            strict: true,
            live_fails: false,
            reply: |_| serde_json::json!({"resp_result": {"result": {"products": [{"id": 1}]}}}),
        }
    }
}

pub struct Harness {
    pub router: Router,
    pub live: Arc<LiveStub>,
    pub verifier: Arc<FixedVerifier>,
    pub upstream_calls: Arc<AtomicUsize>,
}

/// Serve a fake `/sync` endpoint on an ephemeral port
async fn fake_affiliate(reply: fn(&str) -> Value) -> (String, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let app = Router::new().route(
        "/sync",
        post(move |Query(params): Query<HashMap<String, String>>| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(reply(params.get("keywords").map(String::as_str).unwrap_or("")))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/sync"), calls)
}

pub async fn harness(options: Options) -> Harness {
    let (api_url, upstream_calls) = fake_affiliate(options.reply).await;

    let live = Arc::new(LiveStub {
        fail: options.live_fails,
        ..Default::default()
    });
    let translator = Arc::new(ChainTranslator::new(
        Arc::new(LexiconTranslator::default()),
        live.clone(),
    ));
    let translation = TranslationService::new(translator, "en".into(), options.strict);

    let config = AffiliateConfig {
        api_url,
        ..AffiliateConfig::default()
    };
    let affiliate = AffiliateClient::new(&config, Duration::from_secs(5)).unwrap();
    let verifier = Arc::new(FixedVerifier {
        answer: options.verified,
        calls: AtomicUsize::new(0),
    });
    let credentials = Credentials {
        app_key: "517514".into(),
        app_secret: "secret".into(),
        access_token: "access".into(),
        refresh_token: "refresh".into(),
        tracking_id: "tracker".into(),
    };

    let search = SearchOrchestrator::new(
        translation.clone(),
        verifier.clone(),
        affiliate,
        Arc::new(credentials),
        vec![],
    );

    Harness {
        router: router(Arc::new(AppState::new(translation, search))),
        live,
        verifier,
        upstream_calls,
    }
}

pub async fn call(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let body = match body {
        Some(raw) => Body::from(raw.to_string()),
        None => Body::empty(),
    };
    let req = builder.body(body).unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    (status, bytes.to_vec())
}

pub async fn call_json(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let (status, bytes) = call(router, method, uri, body).await;
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Request target with form-encoded query parameters
pub fn uri(path: &str, params: &[(&str, &str)]) -> String {
    let url = reqwest::Url::parse_with_params(&format!("http://localhost{path}"), params).unwrap();
    match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    }
}
