/// Reader feedback from Reddit
///
/// Looks up a handful of posts mentioning a book for its details page. Like
/// decorative imagery this is best-effort: any failure yields an empty list.
use std::time::Duration;

use reqwest::{header::USER_AGENT, Client as HttpClient};

use crate::{
    error::{AppError, AppResult},
    models::{trim_text, FeedbackItem, RedditListing},
};

/// Maximum characters kept from a post body
pub const SNIPPET_MAX_LEN: usize = 280;

/// Trait for reader feedback sources
#[async_trait::async_trait]
pub trait FeedbackProvider: Send + Sync {
    /// Up to `limit` items mentioning the book; empty on any failure
    async fn feedback_for(&self, title: &str, author: &str, limit: u8) -> Vec<FeedbackItem>;
}

#[derive(Clone)]
pub struct RedditFeedback {
    http_client: HttpClient,
    base_url: String,
    user_agent: String,
}

impl RedditFeedback {
    pub fn new(base_url: String, user_agent: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent,
        })
    }

    async fn search(&self, query: &str, limit: u8) -> AppResult<Vec<FeedbackItem>> {
        let url = format!("{}/search.json", self.base_url);
        let limit = limit.to_string();

        let response = self
            .http_client
            .get(&url)
            .header(USER_AGENT, &self.user_agent)
            .query(&[
                ("q", query),
                ("limit", limit.as_str()),
                ("sort", "relevance"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Reddit returned status {}",
                response.status()
            )));
        }

        let listing: RedditListing = response.json().await?;
        Ok(Self::convert_listing(listing))
    }

    fn convert_listing(listing: RedditListing) -> Vec<FeedbackItem> {
        listing
            .data
            .children
            .into_iter()
            .map(|child| child.data)
            .filter_map(|post| {
                let title = post.title.filter(|t| !t.trim().is_empty())?;
                Some(FeedbackItem {
                    title,
                    snippet: trim_text(post.selftext.as_deref().unwrap_or(""), SNIPPET_MAX_LEN),
                    link: post
                        .permalink
                        .map(|p| format!("https://reddit.com{}", p))
                        .unwrap_or_default(),
                })
            })
            .collect()
    }
}

/// Search text for a book: "<title> <author> book"
pub fn feedback_query(title: &str, author: &str) -> String {
    let subject = format!("{} {}", title.trim(), author.trim());
    format!("{} book", subject.trim())
}

#[async_trait::async_trait]
impl FeedbackProvider for RedditFeedback {
    async fn feedback_for(&self, title: &str, author: &str, limit: u8) -> Vec<FeedbackItem> {
        let query = feedback_query(title, author);

        match self.search(&query, limit).await {
            Ok(mut items) => {
                items.truncate(usize::from(limit));
                tracing::info!(
                    query = %query,
                    results = items.len(),
                    provider = "reddit",
                    "Feedback fetched"
                );
                items
            }
            Err(e) => {
                tracing::debug!(error = %e, query = %query, "Feedback unavailable");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_query() {
        assert_eq!(feedback_query("Emma", "Jane Austen"), "Emma Jane Austen book");
        assert_eq!(feedback_query("Emma", ""), "Emma book");
    }

    #[test]
    fn test_convert_listing() {
        let json = r#"{
            "data": {
                "children": [
                    { "data": { "title": "Just finished Emma", "selftext": "Loved it.", "permalink": "/r/books/comments/1/emma/" } },
                    { "data": { "title": "", "selftext": "no title, skipped" } },
                    { "data": { "title": "Link post" } }
                ]
            }
        }"#;

        let listing: RedditListing = serde_json::from_str(json).unwrap();
        let items = RedditFeedback::convert_listing(listing);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Just finished Emma");
        assert_eq!(items[0].snippet, "Loved it.");
        assert_eq!(items[0].link, "https://reddit.com/r/books/comments/1/emma/");
        assert_eq!(items[1].snippet, "");
        assert_eq!(items[1].link, "");
    }

    #[test]
    fn test_convert_listing_trims_long_bodies() {
        let body = "word ".repeat(200);
        let json = serde_json::json!({
            "data": { "children": [ { "data": { "title": "Long", "selftext": body } } ] }
        });

        let listing: RedditListing = serde_json::from_value(json).unwrap();
        let items = RedditFeedback::convert_listing(listing);

        assert!(items[0].snippet.ends_with("..."));
        assert!(items[0].snippet.chars().count() <= SNIPPET_MAX_LEN + 3);
    }
}
