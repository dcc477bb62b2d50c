use std::num::IntErrorKind;

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::middleware::request_id::RequestId;
use crate::models::{BookResult, EmotionKeywords, SearchRequest, MAX_RESULTS_LIMIT};
use crate::services::{
    imagery::{hero_query, HERO_HEIGHT, HERO_WIDTH},
    recommendations::{recommend_around, recommend_next, SUGGESTION_LIMIT},
    search_books, BookSearch, SearchOutcome,
};
use crate::views::{BookCard, DetailsPage, HtmlError, SearchPage, SearchState};

use super::AppState;

/// Feedback items shown on a details page
const FEEDBACK_LIMIT: u8 = 6;

// Request/Response types

/// Search form fields as they arrive in the query string
///
/// Everything is optional text so a blank form field never fails extraction.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub emotion: Option<String>,
    pub author: Option<String>,
    pub max_results: Option<String>,
}

impl SearchParams {
    /// Converts form fields into a request, using `default_max_results` when the
    /// count is missing or not a number
    pub fn into_request(self, default_max_results: u8) -> SearchRequest {
        let max_results = self
            .max_results
            .as_deref()
            .and_then(parse_count)
            .map(|n| n.min(u64::from(MAX_RESULTS_LIMIT)) as u8)
            .unwrap_or(default_max_results);

        SearchRequest::new(
            self.emotion.unwrap_or_default(),
            self.author.unwrap_or_default(),
            max_results,
        )
    }
}

/// Parses a result count, saturating digit strings too long for `u64`
fn parse_count(value: &str) -> Option<u64> {
    match value.trim().parse::<u64>() {
        Ok(n) => Some(n),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(u64::MAX),
        Err(_) => None,
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    Ok,
    Unavailable,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub status: SearchStatus,
    pub count: usize,
    pub books: Vec<BookResult>,
    pub fetched_at: DateTime<Utc>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Search form with nothing submitted yet
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, HtmlError> {
    let request = SearchRequest::new("", "", state.default_max_results);
    let hero = state
        .imagery
        .image_url(&hero_query("", ""), HERO_WIDTH, HERO_HEIGHT);

    let page = SearchPage::new(
        &request,
        SearchState::Idle,
        state.offered_emotions(),
        Some(hero),
    );

    Ok(Html(page.render()?))
}

/// Search form submission: results, empty state, or "search unavailable"
pub async fn search_page(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, HtmlError> {
    let request = params.into_request(state.default_max_results);

    tracing::info!(
        request_id = %request_id,
        emotion = %request.emotion,
        author = %request.author,
        max_results = request.max_results,
        "Processing search request"
    );

    let (search, hero) = search_with_hero(&state, &request).await;

    tracing::info!(
        request_id = %request_id,
        query = %search.query,
        results = search.outcome.books().len(),
        unavailable = search.outcome.is_unavailable(),
        "Search completed"
    );

    let page = SearchPage::new(
        &request,
        SearchState::from(search.outcome),
        state.offered_emotions(),
        Some(hero),
    );

    Ok(Html(page.render()?))
}

/// Runs the book search while resolving the hero image
///
/// The image never holds up the results: if it has not resolved by the time
/// the search finishes, the page gets the unresolved image URL and the browser
/// loads it instead.
async fn search_with_hero(state: &AppState, request: &SearchRequest) -> (BookSearch, String) {
    let image_query = hero_query(&request.emotion, &request.author);

    let search = search_books(state.books.as_ref(), request, &state.keywords);
    let hero = state
        .imagery
        .fetch_image(&image_query, HERO_WIDTH, HERO_HEIGHT);
    tokio::pin!(search, hero);

    let (search, resolved) = tokio::select! {
        biased;
        image = &mut hero => (search.await, image),
        search = &mut search => {
            tracing::debug!("Hero image still pending, leaving it to the browser");
            (search, None)
        }
    };

    let hero_url = match resolved {
        Some(image) => image.url,
        None => state
            .imagery
            .image_url(&image_query, HERO_WIDTH, HERO_HEIGHT),
    };

    (search, hero_url)
}

/// Search page in its "search unavailable" state, used when the details view
/// cannot reach the provider
fn unavailable_page(state: &AppState, request: &SearchRequest) -> Result<Html<String>, HtmlError> {
    let page = SearchPage::new(
        request,
        SearchState::Unavailable,
        state.offered_emotions(),
        None,
    );
    Ok(Html(page.render()?))
}

/// Details view for one book of a search, with suggestions and reader feedback
pub async fn book_details(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(source_id): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, HtmlError> {
    let request = params.into_request(state.default_max_results);

    tracing::info!(
        request_id = %request_id,
        source_id = %source_id,
        "Processing details request"
    );

    let search = search_books(state.books.as_ref(), &request, &state.keywords).await;

    let books = match search.outcome {
        SearchOutcome::Results(books) => books,
        SearchOutcome::Unavailable => return unavailable_page(&state, &request),
    };

    let recommendation = match recommend_next(&books, &source_id, SUGGESTION_LIMIT) {
        Ok(recommendation) => recommendation,
        // Result order is not stable between calls, so the book may have left the list
        Err(AppError::NotFound(_)) => match state.books.volume(&source_id).await {
            Ok(selected) => {
                tracing::info!(
                    request_id = %request_id,
                    source_id = %source_id,
                    "Selected book missing from repeated search, loaded directly"
                );
                recommend_around(selected, &books, SUGGESTION_LIMIT)
            }
            Err(AppError::NotFound(message)) => return Err(AppError::NotFound(message).into()),
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id,
                    source_id = %source_id,
                    error = %e,
                    "Volume lookup unavailable"
                );
                return unavailable_page(&state, &request);
            }
        },
        Err(e) => return Err(e.into()),
    };
    let selected = &recommendation.selected;

    let first_author = selected.authors.first().map(String::as_str).unwrap_or("");
    let feedback = state
        .feedback
        .feedback_for(&selected.title, first_author, FEEDBACK_LIMIT)
        .await;

    let suggestions = recommendation
        .suggestions
        .iter()
        .map(|book| {
            BookCard::new(book, &request)
                .with_fallback_thumbnail(state.imagery.image_url(&book.title, 120, 160))
        })
        .collect();

    let page = DetailsPage::new(
        selected,
        &request,
        state.imagery.image_url(&selected.title, 400, 300),
        suggestions,
        feedback,
    );

    tracing::info!(
        request_id = %request_id,
        source_id = %source_id,
        suggestions = page.suggestions.len(),
        feedback = page.feedback.len(),
        "Details rendered"
    );

    Ok(Html(page.render()?))
}

/// Emotion → keyword table used to build queries
pub async fn list_emotions(State(state): State<AppState>) -> Json<Vec<EmotionKeywords>> {
    Json(state.keywords.entries().to_vec())
}

/// JSON search; a provider failure is reported as 503 with status "unavailable"
pub async fn search_api(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> (StatusCode, Json<SearchResponse>) {
    let request = params.into_request(state.default_max_results);
    let search = search_books(state.books.as_ref(), &request, &state.keywords).await;

    tracing::info!(
        request_id = %request_id,
        query = %search.query,
        results = search.outcome.books().len(),
        "API search completed"
    );

    let (status_code, status, books) = match search.outcome {
        SearchOutcome::Results(books) => (StatusCode::OK, SearchStatus::Ok, books),
        SearchOutcome::Unavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            SearchStatus::Unavailable,
            Vec::new(),
        ),
    };

    (
        status_code,
        Json(SearchResponse {
            query: search.query,
            status,
            count: books.len(),
            books,
            fetched_at: Utc::now(),
        }),
    )
}
