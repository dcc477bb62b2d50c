use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::EmotionKeywordMap;
use crate::services::{
    BookProvider, FeedbackProvider, GoogleBooksProvider, ImageProvider, RedditFeedback,
    UnsplashImagery,
};

/// Shared application state
///
/// Everything in here is read-only after startup; requests never mutate it.
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BookProvider>,
    pub imagery: Arc<dyn ImageProvider>,
    pub feedback: Arc<dyn FeedbackProvider>,
    pub keywords: Arc<EmotionKeywordMap>,
    pub default_max_results: u8,
}

impl AppState {
    /// Creates state from explicit providers
    pub fn new(
        books: Arc<dyn BookProvider>,
        imagery: Arc<dyn ImageProvider>,
        feedback: Arc<dyn FeedbackProvider>,
        keywords: EmotionKeywordMap,
        default_max_results: u8,
    ) -> Self {
        Self {
            books,
            imagery,
            feedback,
            keywords: Arc::new(keywords),
            default_max_results,
        }
    }

    /// Wires the production providers from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let books = GoogleBooksProvider::new(
            config.google_books_api_key.clone(),
            config.google_books_api_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;

        let imagery = UnsplashImagery::new(
            config.unsplash_url.clone(),
            Duration::from_secs(config.image_timeout_secs),
        )?;

        let feedback = RedditFeedback::new(
            config.reddit_url.clone(),
            config.reddit_user_agent.clone(),
            Duration::from_secs(config.feedback_timeout_secs),
        )?;

        tracing::info!(
            provider = books.name(),
            api_key = config.google_books_api_key.is_some(),
            "Book provider configured"
        );

        Ok(Self::new(
            Arc::new(books),
            Arc::new(imagery),
            Arc::new(feedback),
            EmotionKeywordMap::builtin(),
            config.default_max_results,
        ))
    }

    /// Emotion labels offered in the search form
    pub fn offered_emotions(&self) -> Vec<String> {
        self.keywords.emotions().map(str::to_string).collect()
    }
}
