pub mod error;
pub mod preprocess;
pub mod search;
pub mod translate;
pub mod types;

pub use error::{ErrorKind, SearchError};
pub use search::SearchOrchestrator;
pub use translate::TranslationService;
pub use types::{SearchResult, TranslationResult};
