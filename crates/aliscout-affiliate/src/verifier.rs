use std::sync::Arc;

use aliscout_config::{Credentials, VerifyMode};
use async_trait::async_trait;

use crate::client::AffiliateClient;
use crate::response::upstream_error;

/// Checks that the access token is usable before a real search.
///
/// Failures of any kind answer `false`; nothing is cached, so every call is
/// one round trip to the affiliate API.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, credentials: &Credentials) -> bool;
}

/// Sends a minimal signed product query
pub struct ProbeVerifier {
    client: AffiliateClient,
    /// Also reject 200 responses carrying `error_response`
    strict: bool,
}

impl ProbeVerifier {
    pub fn new(client: AffiliateClient, strict: bool) -> Self {
        Self { client, strict }
    }
}

#[async_trait]
impl TokenVerifier for ProbeVerifier {
    async fn verify(&self, credentials: &Credentials) -> bool {
        let response = match self.client.probe(credentials).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Token probe failed: {e}");
                return false;
            }
        };

        if response.status != 200 {
            tracing::warn!("Token probe answered HTTP {}", response.status);
            return false;
        }

        if self.strict {
            match response.body.as_ref().map(upstream_error) {
                Some(None) => {}
                Some(Some(err)) => {
                    tracing::warn!("Token probe rejected: {err}");
                    return false;
                }
                None => {
                    tracing::warn!("Token probe answered with an undecodable body");
                    return false;
                }
            }
        }

        true
    }
}

/// Calls the token refresh endpoint; a returned access token means success
pub struct RefreshVerifier {
    client: AffiliateClient,
}

impl RefreshVerifier {
    pub fn new(client: AffiliateClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TokenVerifier for RefreshVerifier {
    async fn verify(&self, credentials: &Credentials) -> bool {
        match self.client.refresh_token(credentials).await {
            Ok(grant) => {
                tracing::info!(
                    "Token refresh succeeded (expires in {:?}s); update ACCESS_TOKEN to use the new token",
                    grant.expires_in
                );
                true
            }
            Err(e) => {
                tracing::warn!("Token refresh failed: {e}");
                false
            }
        }
    }
}

/// Accepts every token without a network call
pub struct NoVerification;

#[async_trait]
impl TokenVerifier for NoVerification {
    async fn verify(&self, _credentials: &Credentials) -> bool {
        true
    }
}

/// Verifier for the configured mode
pub fn verifier_for(mode: VerifyMode, client: AffiliateClient, strict: bool) -> Arc<dyn TokenVerifier> {
    match mode {
        VerifyMode::Probe => Arc::new(ProbeVerifier::new(client, strict)),
        VerifyMode::Refresh => Arc::new(RefreshVerifier::new(client)),
        VerifyMode::Off => Arc::new(NoVerification),
    }
}
