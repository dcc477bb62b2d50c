/// Decorative imagery from Unsplash
///
/// Purely cosmetic: images illustrate the page but carry no recommendation
/// data. Every failure degrades to `None` and the page falls back to a
/// placeholder.
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client as HttpClient;

use crate::{error::AppResult, models::DecorativeImage};

/// Keywords appended to every image query to keep pictures on-theme
const THEME_KEYWORDS: &str = "book,reading";

/// Hero banner dimensions
pub const HERO_WIDTH: u32 = 1400;
pub const HERO_HEIGHT: u32 = 480;

/// Trait for decorative image sources
#[async_trait::async_trait]
pub trait ImageProvider: Send + Sync {
    /// URL of an image loosely matching `query`, without contacting the provider
    fn image_url(&self, query: &str, width: u32, height: u32) -> String;

    /// Resolves an image for `query`, or `None` if the provider fails in any way
    async fn fetch_image(&self, query: &str, width: u32, height: u32) -> Option<DecorativeImage>;
}

#[derive(Clone)]
pub struct UnsplashImagery {
    http_client: HttpClient,
    base_url: String,
}

impl UnsplashImagery {
    pub fn new(base_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl ImageProvider for UnsplashImagery {
    fn image_url(&self, query: &str, width: u32, height: u32) -> String {
        let query = match query.trim() {
            "" => "book",
            q => q,
        };

        format!(
            "{}/{}x{}/?{},{}",
            self.base_url,
            width,
            height,
            utf8_percent_encode(query, NON_ALPHANUMERIC),
            THEME_KEYWORDS
        )
    }

    async fn fetch_image(&self, query: &str, width: u32, height: u32) -> Option<DecorativeImage> {
        let url = self.image_url(query, width, height);

        match self.http_client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                // Unsplash answers with a redirect to the concrete photo
                let resolved = response.url().to_string();
                tracing::debug!(url = %resolved, "Decorative image resolved");
                Some(DecorativeImage { url: resolved })
            }
            Ok(response) => {
                tracing::debug!(
                    status = %response.status(),
                    url = %url,
                    "Decorative image unavailable"
                );
                None
            }
            Err(e) => {
                tracing::debug!(error = %e, url = %url, "Decorative image fetch failed");
                None
            }
        }
    }
}

/// Text the hero image is keyed on: the mood, the author, or a generic theme
pub fn hero_query(emotion: &str, author: &str) -> String {
    let terms: Vec<&str> = [emotion.trim(), author.trim()]
        .into_iter()
        .filter(|term| !term.is_empty())
        .collect();

    if terms.is_empty() {
        "book reading illustration".to_string()
    } else {
        terms.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_imagery() -> UnsplashImagery {
        UnsplashImagery::new(
            "https://source.unsplash.com/".to_string(),
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn test_image_url_encodes_query() {
        let imagery = create_test_imagery();
        assert_eq!(
            imagery.image_url("happy Jane Austen", 800, 600),
            "https://source.unsplash.com/800x600/?happy%20Jane%20Austen,book,reading"
        );
    }

    #[test]
    fn test_image_url_blank_query_defaults_to_book() {
        let imagery = create_test_imagery();
        assert_eq!(
            imagery.image_url("  ", 120, 160),
            "https://source.unsplash.com/120x160/?book,book,reading"
        );
    }

    #[test]
    fn test_hero_query() {
        assert_eq!(hero_query("happy", ""), "happy");
        assert_eq!(hero_query(" sad ", "Poe"), "sad Poe");
        assert_eq!(hero_query("", ""), "book reading illustration");
    }
}
