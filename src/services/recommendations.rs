use std::collections::HashSet;

use crate::{
    error::{AppError, AppResult},
    models::BookResult,
};

/// Number of other results shown as "Recommended next"
pub const SUGGESTION_LIMIT: usize = 5;

/// The book a user picked, plus what to read after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub selected: BookResult,
    pub suggestions: Vec<BookResult>,
}

/// Picks `source_id` out of a result list and suggests the remaining results
///
/// Suggestions keep the provider's ordering, skip the selected book and any
/// duplicate of it, and stop at `limit`. Whenever more than one distinct result
/// was returned the suggestion list is non-empty.
pub fn recommend_next(
    books: &[BookResult],
    source_id: &str,
    limit: usize,
) -> AppResult<Recommendation> {
    let selected = books
        .iter()
        .find(|book| book.source_id == source_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Book {} is not in the results", source_id)))?;

    Ok(recommend_around(selected, books, limit))
}

/// Suggests results to read after `selected`, which need not be among `books`
pub fn recommend_around(selected: BookResult, books: &[BookResult], limit: usize) -> Recommendation {
    let suggestions = {
        let mut seen = HashSet::from([selected.source_id.as_str()]);
        books
            .iter()
            .filter(|book| seen.insert(book.source_id.as_str()))
            .take(limit)
            .cloned()
            .collect()
    };

    Recommendation {
        selected,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str) -> BookResult {
        BookResult {
            source_id: id.to_string(),
            title: format!("Book {}", id),
            authors: vec![],
            thumbnail_url: None,
            description: Some(format!("Description of {}", id)),
            published_date: None,
            info_link: None,
        }
    }

    #[test]
    fn test_selected_book_is_excluded_from_suggestions() {
        let books = vec![book("a"), book("b"), book("c")];
        let rec = recommend_next(&books, "b", SUGGESTION_LIMIT).unwrap();

        assert_eq!(rec.selected, book("b"));
        let ids: Vec<&str> = rec.suggestions.iter().map(|b| b.source_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_suggestions_are_limited() {
        let books: Vec<BookResult> = (0..10).map(|i| book(&i.to_string())).collect();
        let rec = recommend_next(&books, "0", SUGGESTION_LIMIT).unwrap();
        assert_eq!(rec.suggestions.len(), SUGGESTION_LIMIT);
        assert_eq!(rec.suggestions[0].source_id, "1");
    }

    #[test]
    fn test_single_result_has_no_suggestions() {
        let rec = recommend_next(&[book("only")], "only", SUGGESTION_LIMIT).unwrap();
        assert!(rec.suggestions.is_empty());
    }

    #[test]
    fn test_repeated_ids_are_suggested_once() {
        let books = vec![book("x"), book("x"), book("y"), book("y"), book("z")];
        let rec = recommend_next(&books, "x", SUGGESTION_LIMIT).unwrap();

        let ids: Vec<&str> = rec.suggestions.iter().map(|b| b.source_id.as_str()).collect();
        assert_eq!(ids, vec!["y", "z"]);
    }

    #[test]
    fn test_recommend_around_book_missing_from_results() {
        let rec = recommend_around(book("a"), &[book("c"), book("b")], SUGGESTION_LIMIT);

        assert_eq!(rec.selected, book("a"));
        let ids: Vec<&str> = rec.suggestions.iter().map(|b| b.source_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[test]
    fn test_unknown_book_is_not_found() {
        let result = recommend_next(&[book("a")], "zzz", SUGGESTION_LIMIT);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
