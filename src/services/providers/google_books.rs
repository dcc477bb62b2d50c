/// Google Books API provider
///
/// API Flow:
/// 1. Search: /volumes?q={query}&maxResults={n} → list of volumes
/// 2. Lookup: /volumes/{id} → one volume, when a book left a later result list
///
/// The API key is optional; without one requests run against the anonymous quota.
use std::collections::HashSet;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client as HttpClient, StatusCode};

use crate::{
    error::{AppError, AppResult},
    models::{ApiVolume, ApiVolumesResponse, BookResult, MAX_RESULTS_LIMIT},
    services::providers::BookProvider,
};

#[derive(Clone)]
pub struct GoogleBooksProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
}

impl GoogleBooksProvider {
    /// Creates a provider whose requests give up after `timeout`
    pub fn new(api_key: Option<String>, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .user_agent(concat!("moodshelf/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Query parameters for a volumes search
    fn query_params(&self, query: &str, max_results: u8) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", query.to_string()),
            (
                "maxResults",
                max_results.clamp(1, MAX_RESULTS_LIMIT).to_string(),
            ),
        ];

        params.extend(self.key_params());
        params
    }

    /// Key parameter, when one is configured
    fn key_params(&self) -> Vec<(&'static str, String)> {
        self.api_key
            .iter()
            .map(|key| ("key", key.clone()))
            .collect()
    }

    fn parse_volume(body: &str) -> AppResult<BookResult> {
        let volume: ApiVolume = serde_json::from_str(body).map_err(|e| {
            tracing::error!(error = %e, "Failed to deserialize Google Books volume");
            AppError::ExternalApi(format!("Failed to parse Google Books volume: {}", e))
        })?;

        if volume.id.trim().is_empty() {
            return Err(AppError::ExternalApi(
                "Google Books volume has no id".to_string(),
            ));
        }

        Ok(BookResult::from(volume))
    }

    /// Parses a volumes response body into books, keeping at most `max_results`
    ///
    /// Volumes without an id cannot be linked to and are dropped, as are repeats
    /// of an id already seen.
    fn parse_volumes(body: &str, max_results: u8) -> AppResult<Vec<BookResult>> {
        let response: ApiVolumesResponse = serde_json::from_str(body).map_err(|e| {
            tracing::error!(error = %e, "Failed to deserialize Google Books response");
            AppError::ExternalApi(format!("Failed to parse Google Books response: {}", e))
        })?;

        let mut seen = HashSet::new();

        Ok(response
            .items
            .into_iter()
            .filter(|volume| !volume.id.trim().is_empty() && seen.insert(volume.id.clone()))
            .take(usize::from(max_results))
            .map(BookResult::from)
            .collect())
    }
}

#[async_trait::async_trait]
impl BookProvider for GoogleBooksProvider {
    async fn search_volumes(&self, query: &str, max_results: u8) -> AppResult<Vec<BookResult>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/volumes", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&self.query_params(query, max_results))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Google Books returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        let books = Self::parse_volumes(&response_text, max_results)?;

        tracing::info!(
            query = %query,
            results = books.len(),
            provider = self.name(),
            "Book search completed"
        );

        Ok(books)
    }

    async fn volume(&self, source_id: &str) -> AppResult<BookResult> {
        if source_id.trim().is_empty() {
            return Err(AppError::InvalidInput("Volume id cannot be empty".to_string()));
        }

        let url = format!(
            "{}/volumes/{}",
            self.api_url,
            utf8_percent_encode(source_id, NON_ALPHANUMERIC)
        );

        let response = self
            .http_client
            .get(&url)
            .query(&self.key_params())
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(AppError::NotFound(format!("Book {} does not exist", source_id)));
            }
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::ExternalApi(format!(
                    "Google Books returned status {}: {}",
                    status, body
                )));
            }
            _ => {}
        }

        let response_text = response.text().await?;
        let book = Self::parse_volume(&response_text)?;

        tracing::info!(
            source_id = %source_id,
            provider = self.name(),
            "Volume lookup completed"
        );

        Ok(book)
    }

    fn name(&self) -> &'static str {
        "google_books"
    }
}
