use std::sync::Arc;

use async_trait::async_trait;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

const STRIPPED_PUNCTUATION: [char; 8] = ['.', ',', '!', '?', ';', ':', '"', '\''];

/// Split a query into words, dropping punctuation that would defeat lookups
pub fn split_words(text: &str) -> Vec<String> {
    text.chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect::<String>()
        .split_whitespace()
        .map(String::from)
        .collect()
}

/// Two-tier translation: a lookup-only `primary` over a live `fallback`.
///
/// The whole text is tried against the primary first. On a miss, each word
/// is resolved on its own, going to the fallback only for words the primary
/// does not know. When the primary knows none of the words the fallback
/// receives the whole text in one call.
pub struct ChainTranslator {
    primary: Arc<dyn Translator>,
    fallback: Arc<dyn Translator>,
}

impl ChainTranslator {
    pub fn new(primary: Arc<dyn Translator>, fallback: Arc<dyn Translator>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl Translator for ChainTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        match self.primary.translate(text, from.clone(), to.clone()).await {
            Ok(translation) => return Ok(translation),
            Err(e) if e.is_no_match() => {}
            Err(e) => return Err(e),
        }

        let words = split_words(text);
        if let [word] = words.as_slice() {
            // Punctuation stripped, so the bare word may still be known
            if word != text.trim() {
                match self.primary.translate(word, from.clone(), to.clone()).await {
                    Ok(translation) => return Ok(translation),
                    Err(e) if e.is_no_match() => {}
                    Err(e) => return Err(e),
                }
            }
        }
        if words.len() < 2 {
            return self.fallback.translate(text, from, to).await;
        }

        let mut resolved: Vec<Option<String>> = Vec::with_capacity(words.len());
        for word in &words {
            match self.primary.translate(word, from.clone(), to.clone()).await {
                Ok(translation) => resolved.push(Some(translation.text)),
                Err(e) if e.is_no_match() => resolved.push(None),
                Err(e) => return Err(e),
            }
        }

        if resolved.iter().all(Option::is_none) {
            return self.fallback.translate(text, from, to).await;
        }

        let mut output = Vec::with_capacity(words.len());
        for (word, known) in words.iter().zip(resolved) {
            let text = match known {
                Some(text) => text,
                None => {
                    tracing::debug!("No lexicon entry for {word:?}, asking live provider");
                    self.fallback
                        .translate(word, from.clone(), to.clone())
                        .await?
                        .text
                }
            };
            output.push(text);
        }

        Ok(Translation {
            text: output.join(" "),
            from,
            to,
            provider: format!(
                "{}+{}",
                self.primary.metadata().name,
                self.fallback.metadata().name
            ),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: format!(
                "{} over {}",
                self.primary.metadata().name,
                self.fallback.metadata().name
            ),
            requires_network: self.fallback.metadata().requires_network,
        }
    }
}
