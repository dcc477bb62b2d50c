//! HTML presentation: view models and askama page templates.
//!
//! Handlers turn search outcomes into one of these pages. Everything dynamic
//! goes through askama's HTML escaping.

use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::{
    error::AppError,
    models::{BookResult, FeedbackItem, SearchRequest},
    services::SearchOutcome,
};

/// Characters of description shown on a result card
pub const CARD_DESCRIPTION_LEN: usize = 180;

/// Where the results area of the search page stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    /// No search submitted yet
    Idle,
    /// The provider answered with at least one book
    Results(Vec<BookResult>),
    /// The provider answered with zero books
    Empty,
    /// The provider could not be used
    Unavailable,
}

impl From<SearchOutcome> for SearchState {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Results(books) if books.is_empty() => SearchState::Empty,
            SearchOutcome::Results(books) => SearchState::Results(books),
            SearchOutcome::Unavailable => SearchState::Unavailable,
        }
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

/// Query string that reproduces a search, e.g. `emotion=happy&author=&max_results=6`
pub fn search_params(request: &SearchRequest) -> String {
    format!(
        "emotion={}&author={}&max_results={}",
        encode(&request.emotion),
        encode(&request.author),
        request.max_results
    )
}

/// Link to the details view of a book within a search
pub fn details_href(source_id: &str, request: &SearchRequest) -> String {
    format!("/books/{}?{}", encode(source_id), search_params(request))
}

/// Link back to the result list of a search
pub fn results_href(request: &SearchRequest) -> String {
    format!("/search?{}", search_params(request))
}

/// One result card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    pub title: String,
    pub authors: String,
    pub published_date: String,
    pub short_description: String,
    pub thumbnail_url: String,
    pub info_link: String,
    pub details_href: String,
}

impl BookCard {
    pub fn new(book: &BookResult, request: &SearchRequest) -> Self {
        Self {
            title: book.title.clone(),
            authors: book.authors_display(),
            published_date: book.published_date.clone().unwrap_or_default(),
            short_description: book.short_description(CARD_DESCRIPTION_LEN),
            thumbnail_url: book.thumbnail_url.clone().unwrap_or_default(),
            info_link: book.info_link.clone().unwrap_or_default(),
            details_href: details_href(&book.source_id, request),
        }
    }

    /// Uses `url` as the cover when the provider had none
    pub fn with_fallback_thumbnail(mut self, url: String) -> Self {
        if self.thumbnail_url.is_empty() {
            self.thumbnail_url = url;
        }
        self
    }
}

/// The search form, optionally followed by results
#[derive(Template)]
#[template(path = "index.html")]
pub struct SearchPage {
    pub hero_image: String,
    pub emotion: String,
    pub author: String,
    pub max_results: u8,
    pub emotions: Vec<String>,
    pub searched: bool,
    pub unavailable: bool,
    pub cards: Vec<BookCard>,
}

impl SearchPage {
    pub fn new(
        request: &SearchRequest,
        state: SearchState,
        emotions: Vec<String>,
        hero_image: Option<String>,
    ) -> Self {
        let (searched, unavailable, cards) = match state {
            SearchState::Idle => (false, false, Vec::new()),
            SearchState::Empty => (true, false, Vec::new()),
            SearchState::Unavailable => (true, true, Vec::new()),
            SearchState::Results(books) => (
                true,
                false,
                books.iter().map(|b| BookCard::new(b, request)).collect(),
            ),
        };

        Self {
            hero_image: hero_image.unwrap_or_default(),
            emotion: request.emotion.clone(),
            author: request.author.clone(),
            max_results: request.max_results,
            emotions,
            searched,
            unavailable,
            cards,
        }
    }
}

/// A single book with its suggestions and reader feedback
#[derive(Template)]
#[template(path = "details.html")]
pub struct DetailsPage {
    pub title: String,
    pub authors: String,
    pub published_date: String,
    pub description: String,
    pub cover_url: String,
    pub info_link: String,
    pub back_href: String,
    pub suggestions: Vec<BookCard>,
    pub feedback: Vec<FeedbackItem>,
}

impl DetailsPage {
    pub fn new(
        book: &BookResult,
        request: &SearchRequest,
        cover_fallback: String,
        suggestions: Vec<BookCard>,
        feedback: Vec<FeedbackItem>,
    ) -> Self {
        Self {
            title: book.title.clone(),
            authors: book.authors_display(),
            published_date: book.published_date.clone().unwrap_or_default(),
            description: book.description.clone().unwrap_or_default(),
            cover_url: book.thumbnail_url.clone().unwrap_or(cover_fallback),
            info_link: book.info_link.clone().unwrap_or_default(),
            back_href: results_href(request),
            suggestions,
            feedback,
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub status: u16,
    pub message: String,
}

/// Error returned by HTML handlers; renders the error page instead of JSON
#[derive(Debug)]
pub struct HtmlError(pub AppError);

impl From<AppError> for HtmlError {
    fn from(err: AppError) -> Self {
        HtmlError(err)
    }
}

impl From<askama::Error> for HtmlError {
    fn from(err: askama::Error) -> Self {
        HtmlError(AppError::Template(err))
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let message = match &self.0 {
            AppError::NotFound(msg) | AppError::InvalidInput(msg) => msg.clone(),
            _ => "Something went wrong while building this page.".to_string(),
        };

        tracing::warn!(error = %self.0, status = %status, "Rendering error page");

        let page = ErrorPage {
            status: status.as_u16(),
            message,
        };

        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(_) => (status, self.0.to_string()).into_response(),
        }
    }
}
