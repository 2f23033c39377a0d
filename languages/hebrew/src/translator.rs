use async_trait::async_trait;
use aliscout_translator::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

use crate::lexicon::{HebrewLexicon, is_hebrew};

/// Lookup-only translator over the Hebrew lexicon.
///
/// Answers `NoMatch` for anything the lexicon does not hold, so it is meant
/// to sit in front of a live provider.
pub struct LexiconTranslator {
    lexicon: HebrewLexicon,
}

impl LexiconTranslator {
    pub fn new(lexicon: HebrewLexicon) -> Self {
        Self { lexicon }
    }
}

impl Default for LexiconTranslator {
    fn default() -> Self {
        Self::new(HebrewLexicon::with_defaults())
    }
}

#[async_trait]
impl Translator for LexiconTranslator {
    async fn translate(
        &self,
        text: &str,
        _from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if !to.eq_ignore_ascii_case("en") || !is_hebrew(text) {
            return Err(TranslateError::NoMatch(text.to_string()));
        }

        match self.lexicon.get(text) {
            Some(english) => {
                tracing::debug!("Lexicon hit: {text:?} -> {english:?}");
                Ok(Translation {
                    text: english.to_string(),
                    from: "he".to_string(),
                    to,
                    provider: "lexicon".to_string(),
                })
            }
            None => Err(TranslateError::NoMatch(text.to_string())),
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Hebrew lexicon".to_string(),
            requires_network: false,
        }
    }
}
