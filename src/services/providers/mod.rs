/// Book data provider abstraction
///
/// Keeps the remote book-search API behind a trait so the search flow and the
/// HTTP layer can run against any backend (Google Books in production, fakes in
/// tests).
use crate::{error::AppResult, models::BookResult};

pub mod google_books;

pub use google_books::GoogleBooksProvider;

/// Trait for book search providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BookProvider: Send + Sync {
    /// Runs a free-text query and returns at most `max_results` books
    ///
    /// Issues exactly one outbound request. Zero matches is `Ok(vec![])`;
    /// transport failures, non-success statuses and unparseable bodies are errors.
    async fn search_volumes(&self, query: &str, max_results: u8) -> AppResult<Vec<BookResult>>;

    /// Fetches a single volume by id; an unknown id is `AppError::NotFound`
    async fn volume(&self, source_id: &str) -> AppResult<BookResult>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
