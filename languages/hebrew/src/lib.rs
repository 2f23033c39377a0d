pub mod lexicon;
pub mod translator;

pub use lexicon::{HebrewLexicon, is_hebrew};
pub use translator::LexiconTranslator;
