use std::sync::Arc;

use aliscout_affiliate::{AffiliateClient, TokenVerifier};
use aliscout_config::Credentials;

use crate::error::SearchError;
use crate::translate::TranslationService;
use crate::types::SearchResult;

/// Translate, verify the token, then query the affiliate API.
///
/// Everything runs sequentially within the calling task; a failure at any
/// step ends the search without a retry.
#[derive(Clone)]
pub struct SearchOrchestrator {
    translation: TranslationService,
    verifier: Arc<dyn TokenVerifier>,
    affiliate: AffiliateClient,
    credentials: Arc<Credentials>,
    /// Suffixes for additional queries, e.g. `women` -> "{term} women"
    expansions: Vec<String>,
}

impl SearchOrchestrator {
    pub fn new(
        translation: TranslationService,
        verifier: Arc<dyn TokenVerifier>,
        affiliate: AffiliateClient,
        credentials: Arc<Credentials>,
        expansions: Vec<String>,
    ) -> Self {
        Self {
            translation,
            verifier,
            affiliate,
            credentials,
            expansions,
        }
    }

    pub async fn search(&self, raw_query: Option<&str>) -> Result<SearchResult, SearchError> {
        let raw_query = raw_query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or(SearchError::MissingParameter("q"))?;

        let translated = self.translation.translate(raw_query, None).await?.translated;

        if !self.verifier.verify(&self.credentials).await {
            tracing::warn!("Access token verification failed, search for {translated:?} aborted");
            return Err(SearchError::TokenInvalid);
        }

        let mut results = Vec::new();
        for keywords in self.keyword_variants(&translated) {
            let products = self.affiliate.product_query(&self.credentials, &keywords).await?;
            tracing::info!("{} products for {keywords:?}", products.len());
            results.extend(products);
        }

        Ok(SearchResult {
            search_for: translated,
            results,
        })
    }

    /// The translated term followed by one variant per configured suffix
    fn keyword_variants(&self, term: &str) -> Vec<String> {
        std::iter::once(term.to_string())
            .chain(self.expansions.iter().map(|suffix| format!("{term} {suffix}")))
            .collect()
    }
}
