use serde::{Deserialize, Serialize};

pub mod emotion;

pub use emotion::{EmotionKeywordMap, EmotionKeywords};

/// Largest page the Google Books volumes endpoint will return
pub const MAX_RESULTS_LIMIT: u8 = 40;

/// Title shown when the provider omits one
pub const UNTITLED: &str = "Untitled";

/// A user's search: a mood and an optional author, both free text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub emotion: String,
    pub author: String,
    pub max_results: u8,
}

impl SearchRequest {
    /// Creates a request with trimmed inputs and `max_results` clamped to `1..=40`
    pub fn new(emotion: impl AsRef<str>, author: impl AsRef<str>, max_results: u8) -> Self {
        Self {
            emotion: emotion.as_ref().trim().to_string(),
            author: author.as_ref().trim().to_string(),
            max_results: max_results.clamp(1, MAX_RESULTS_LIMIT),
        }
    }

    pub fn has_emotion(&self) -> bool {
        !self.emotion.is_empty()
    }

    pub fn has_author(&self) -> bool {
        !self.author.is_empty()
    }
}

/// A single book returned by the search provider, normalized for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookResult {
    /// External identifier from the remote API
    pub source_id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub published_date: Option<String>,
    pub info_link: Option<String>,
}

impl BookResult {
    /// Authors joined for display, e.g. "Terry Pratchett, Neil Gaiman"
    pub fn authors_display(&self) -> String {
        self.authors.join(", ")
    }

    /// Description shortened for a card
    pub fn short_description(&self, max_len: usize) -> String {
        self.description
            .as_deref()
            .map(|d| trim_text(d, max_len))
            .unwrap_or_default()
    }
}

/// A post or article mentioning a book
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackItem {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

/// Cosmetic image resolved from the image provider
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DecorativeImage {
    pub url: String,
}

/// Shortens `text` to at most `max_len` characters, cutting at the last word
/// boundary and appending "..." when anything was removed.
pub fn trim_text(text: &str, max_len: usize) -> String {
    let text = text.trim();
    let cut_at = match text.char_indices().nth(max_len) {
        Some((idx, _)) => idx,
        None => return text.to_string(),
    };

    let cut = &text[..cut_at];
    let cut = match cut.rfind(char::is_whitespace) {
        Some(idx) if idx > 0 => &cut[..idx],
        _ => cut,
    };

    format!("{}...", cut.trim_end())
}

// ============================================================================
// Google Books API Types
// ============================================================================

/// Raw response from GET /volumes
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVolumesResponse {
    #[serde(default)]
    pub items: Vec<ApiVolume>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVolume {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub volume_info: ApiVolumeInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVolumeInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub info_link: Option<String>,
    #[serde(default)]
    pub image_links: Option<ApiImageLinks>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiImageLinks {
    #[serde(default)]
    pub small_thumbnail: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<ApiVolume> for BookResult {
    fn from(volume: ApiVolume) -> Self {
        let info = volume.volume_info;

        let thumbnail_url = info
            .image_links
            .and_then(|links| non_blank(links.thumbnail).or(non_blank(links.small_thumbnail)))
            // Google hands out http:// cover links that browsers block as mixed content
            .map(|url| match url.strip_prefix("http://") {
                Some(rest) => format!("https://{}", rest),
                None => url,
            });

        BookResult {
            source_id: volume.id,
            title: non_blank(info.title).unwrap_or_else(|| UNTITLED.to_string()),
            authors: info.authors,
            thumbnail_url,
            description: non_blank(info.description).or(non_blank(info.subtitle)),
            published_date: non_blank(info.published_date),
            info_link: non_blank(info.info_link),
        }
    }
}

// ============================================================================
// Reddit API Types
// ============================================================================

/// Raw response from GET /search.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedditListing {
    #[serde(default)]
    pub data: RedditListingData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedditListingData {
    #[serde(default)]
    pub children: Vec<RedditChild>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedditChild {
    #[serde(default)]
    pub data: RedditPost,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedditPost {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub selftext: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_trims_and_clamps() {
        let request = SearchRequest::new("  happy ", " Jane Austen ", 99);
        assert_eq!(request.emotion, "happy");
        assert_eq!(request.author, "Jane Austen");
        assert_eq!(request.max_results, MAX_RESULTS_LIMIT);

        let request = SearchRequest::new("", "", 0);
        assert_eq!(request.max_results, 1);
        assert!(!request.has_emotion());
        assert!(!request.has_author());
    }

    #[test]
    fn test_trim_text_short_input_untouched() {
        assert_eq!(trim_text("  A short blurb. ", 180), "A short blurb.");
    }

    #[test]
    fn test_trim_text_cuts_at_word_boundary() {
        let text = "The quick brown fox jumps over the lazy dog";
        assert_eq!(trim_text(text, 12), "The quick...");
    }

    #[test]
    fn test_trim_text_without_spaces() {
        assert_eq!(trim_text("abcdefghij", 4), "abcd...");
    }

    #[test]
    fn test_trim_text_respects_char_boundaries() {
        let text = "été été été été";
        assert_eq!(trim_text(text, 5), "été...");
    }

    #[test]
    fn test_volume_to_book_result_full() {
        let json = r#"{
            "id": "s1gVAAAAYAAJ",
            "volumeInfo": {
                "title": "Pride and Prejudice",
                "authors": ["Jane Austen"],
                "publishedDate": "1813",
                "description": "A classic of manners.",
                "infoLink": "https://books.google.com/books?id=s1gVAAAAYAAJ",
                "imageLinks": {
                    "smallThumbnail": "http://books.google.com/small.jpg",
                    "thumbnail": "http://books.google.com/thumb.jpg"
                }
            }
        }"#;

        let volume: ApiVolume = serde_json::from_str(json).unwrap();
        let book: BookResult = volume.into();
        assert_eq!(book.source_id, "s1gVAAAAYAAJ");
        assert_eq!(book.title, "Pride and Prejudice");
        assert_eq!(book.authors, vec!["Jane Austen".to_string()]);
        assert_eq!(book.published_date, Some("1813".to_string()));
        assert_eq!(
            book.thumbnail_url,
            Some("https://books.google.com/thumb.jpg".to_string())
        );
        assert_eq!(book.description, Some("A classic of manners.".to_string()));
    }

    #[test]
    fn test_volume_to_book_result_missing_fields() {
        let json = r#"{ "id": "abc", "volumeInfo": { "subtitle": "A subtitle" } }"#;

        let volume: ApiVolume = serde_json::from_str(json).unwrap();
        let book: BookResult = volume.into();
        assert_eq!(book.title, UNTITLED);
        assert!(book.authors.is_empty());
        assert_eq!(book.thumbnail_url, None);
        assert_eq!(book.description, Some("A subtitle".to_string()));
        assert_eq!(book.info_link, None);
    }

    #[test]
    fn test_volume_without_volume_info() {
        let volume: ApiVolume = serde_json::from_str(r#"{ "id": "xyz" }"#).unwrap();
        let book: BookResult = volume.into();
        assert_eq!(book.source_id, "xyz");
        assert_eq!(book.title, UNTITLED);
    }

    #[test]
    fn test_small_thumbnail_used_when_thumbnail_missing() {
        let volume = ApiVolume {
            id: "1".to_string(),
            volume_info: ApiVolumeInfo {
                image_links: Some(ApiImageLinks {
                    small_thumbnail: Some("https://img/small.jpg".to_string()),
                    thumbnail: None,
                }),
                ..Default::default()
            },
        };
        let book: BookResult = volume.into();
        assert_eq!(book.thumbnail_url, Some("https://img/small.jpg".to_string()));
    }

    #[test]
    fn test_volumes_response_without_items() {
        let response: ApiVolumesResponse =
            serde_json::from_str(r#"{ "kind": "books#volumes", "totalItems": 0 }"#).unwrap();
        assert!(response.items.is_empty());
    }

    #[test]
    fn test_authors_display_and_short_description() {
        let book = BookResult {
            source_id: "1".to_string(),
            title: "Good Omens".to_string(),
            authors: vec!["Terry Pratchett".to_string(), "Neil Gaiman".to_string()],
            thumbnail_url: None,
            description: Some("An angel and a demon try to stop the apocalypse".to_string()),
            published_date: None,
            info_link: None,
        };
        assert_eq!(book.authors_display(), "Terry Pratchett, Neil Gaiman");
        assert_eq!(book.short_description(15), "An angel and a...");
    }
}
