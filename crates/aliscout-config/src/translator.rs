use serde::{Deserialize, Serialize};

use crate::{EnvSource, parse_flag};

fn default_api_url() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_target_lang() -> String {
    "en".to_string()
}

fn default_use_lexicon() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    /// Propagate provider failures instead of falling back to the input text
    #[serde(default)]
    pub strict: bool,
    /// Consult the static lexicon before the live provider
    #[serde(default = "default_use_lexicon")]
    pub use_lexicon: bool,
    /// Extra lexicon entries, one `hebrew<TAB>english` pair per line
    #[serde(default)]
    pub lexicon_path: Option<String>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            target_lang: default_target_lang(),
            strict: false,
            use_lexicon: default_use_lexicon(),
            lexicon_path: None,
        }
    }
}

impl TranslatorConfig {
    pub fn from_source(source: &dyn EnvSource) -> Self {
        Self {
            api_url: source.get("TRANSLATE_API_URL").unwrap_or_else(default_api_url),
            target_lang: source
                .get("TRANSLATE_TARGET_LANG")
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(default_target_lang),
            strict: parse_flag(source, "TRANSLATE_STRICT", false),
            use_lexicon: parse_flag(source, "TRANSLATE_USE_LEXICON", default_use_lexicon()),
            lexicon_path: source
                .get("TRANSLATE_LEXICON_PATH")
                .filter(|v| !v.trim().is_empty()),
        }
    }
}
