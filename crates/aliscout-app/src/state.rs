use std::sync::Arc;
use std::time::Duration;

use aliscout_affiliate::{AffiliateClient, verifier_for};
use aliscout_config::Config;
use aliscout_core::{SearchOrchestrator, TranslationService};
use aliscout_lang_hebrew::{HebrewLexicon, LexiconTranslator};
use aliscout_translator::{ChainTranslator, GoogleTranslator, Translator};

pub struct AppState {
    pub translation: TranslationService,
    pub search: SearchOrchestrator,
}

impl AppState {
    pub fn new(translation: TranslationService, search: SearchOrchestrator) -> Self {
        Self {
            translation,
            search,
        }
    }

    /// Wire every component from the configuration, once at startup
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.http_timeout_seconds);

        let live: Arc<dyn Translator> =
            Arc::new(GoogleTranslator::new(config.translator.api_url.clone(), timeout)?);

        let translator: Arc<dyn Translator> = if config.translator.use_lexicon {
            let lexicon = load_lexicon(config.translator.lexicon_path.as_deref());
            tracing::info!("Lexicon enabled with {} entries", lexicon.len());
            Arc::new(ChainTranslator::new(
                Arc::new(LexiconTranslator::new(lexicon)),
                live,
            ))
        } else {
            live
        };

        let translation = TranslationService::new(
            translator,
            config.translator.target_lang.clone(),
            config.translator.strict,
        );

        let affiliate = AffiliateClient::new(&config.affiliate, timeout)?;
        let verifier = verifier_for(
            config.affiliate.verify_mode,
            affiliate.clone(),
            config.affiliate.strict_verify,
        );

        let search = SearchOrchestrator::new(
            translation.clone(),
            verifier,
            affiliate,
            Arc::new(config.affiliate.credentials.clone()),
            config.affiliate.keyword_expansions.clone(),
        );

        Ok(Self::new(translation, search))
    }
}

fn load_lexicon(path: Option<&str>) -> HebrewLexicon {
    let Some(path) = path else {
        return HebrewLexicon::with_defaults();
    };

    HebrewLexicon::load_from_file(path).unwrap_or_else(|e| {
        tracing::warn!("Failed to load lexicon from {path}: {e}, using built-in entries");
        HebrewLexicon::with_defaults()
    })
}
