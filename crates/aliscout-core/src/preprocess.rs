use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default query preprocessor
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC) folds presentation forms and full-width letters
        let text: String = text.nfkc().collect();

        // Line breaks and runs of spaces become single spaces
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

pub struct QueryPreprocessor;
impl Preprocessor for QueryPreprocessor {}
