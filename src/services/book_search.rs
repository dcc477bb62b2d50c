use crate::{
    models::{BookResult, EmotionKeywordMap, SearchRequest},
    services::{providers::BookProvider, query::build_query},
};

/// Result of one search as seen by the presentation layer
///
/// Provider failures never cross this boundary as errors: network failures,
/// timeouts, bad statuses and malformed payloads all collapse into
/// [`SearchOutcome::Unavailable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The provider answered; the list may be empty
    Results(Vec<BookResult>),
    /// The provider could not be reached or answered unusably
    Unavailable,
}

impl SearchOutcome {
    pub fn books(&self) -> &[BookResult] {
        match self {
            SearchOutcome::Results(books) => books,
            SearchOutcome::Unavailable => &[],
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, SearchOutcome::Unavailable)
    }
}

/// A completed search: the query that was sent and what came back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSearch {
    pub query: String,
    pub outcome: SearchOutcome,
}

/// Builds the query for `request` and runs it against `provider`
///
/// Exactly one provider call per invocation; no retries and no caching.
pub async fn search_books(
    provider: &dyn BookProvider,
    request: &SearchRequest,
    keywords: &EmotionKeywordMap,
) -> BookSearch {
    let query = build_query(request, keywords);

    let outcome = match provider.search_volumes(&query, request.max_results).await {
        Ok(books) => SearchOutcome::Results(books),
        Err(e) => {
            tracing::warn!(
                error = %e,
                query = %query,
                provider = provider.name(),
                "Book search unavailable"
            );
            SearchOutcome::Unavailable
        }
    };

    BookSearch { query, outcome }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::providers::MockBookProvider;
    use mockall::predicate::eq;

    fn book(id: &str, title: &str) -> BookResult {
        BookResult {
            source_id: id.to_string(),
            title: title.to_string(),
            authors: vec![],
            thumbnail_url: None,
            description: None,
            published_date: None,
            info_link: None,
        }
    }

    #[tokio::test]
    async fn test_search_sends_built_query_once() {
        let mut provider = MockBookProvider::new();
        provider
            .expect_search_volumes()
            .with(
                eq("feel-good humor optimistic uplifting inauthor:\"Jane Austen\""),
                eq(6u8),
            )
            .times(1)
            .returning(|_, _| Ok(vec![book("1", "Emma")]));
        provider.expect_name().return_const("mock");

        let request = SearchRequest::new("happy", "Jane Austen", 6);
        let search = search_books(&provider, &request, &EmotionKeywordMap::builtin()).await;

        assert_eq!(
            search.query,
            "feel-good humor optimistic uplifting inauthor:\"Jane Austen\""
        );
        assert_eq!(search.outcome, SearchOutcome::Results(vec![book("1", "Emma")]));
    }

    #[tokio::test]
    async fn test_empty_result_is_not_an_error() {
        let mut provider = MockBookProvider::new();
        provider
            .expect_search_volumes()
            .times(1)
            .returning(|_, _| Ok(vec![]));
        provider.expect_name().return_const("mock");

        let request = SearchRequest::new("nostalgic", "", 6);
        let search = search_books(&provider, &request, &EmotionKeywordMap::builtin()).await;

        assert!(!search.outcome.is_unavailable());
        assert!(search.outcome.books().is_empty());
    }

    #[tokio::test]
    async fn test_provider_error_becomes_unavailable() {
        let mut provider = MockBookProvider::new();
        provider
            .expect_search_volumes()
            .times(1)
            .returning(|_, _| {
                Err(AppError::ExternalApi(
                    "Google Books returned status 500".to_string(),
                ))
            });
        provider.expect_name().return_const("mock");

        let request = SearchRequest::new("", "", 6);
        let search = search_books(&provider, &request, &EmotionKeywordMap::builtin()).await;

        assert_eq!(search.query, "bestseller");
        assert_eq!(search.outcome, SearchOutcome::Unavailable);
        assert!(search.outcome.books().is_empty());
    }
}
