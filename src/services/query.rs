use crate::models::{EmotionKeywordMap, SearchRequest};

/// Query sent when the user gives neither a mood nor an author
pub const DEFAULT_QUERY: &str = "bestseller";

/// Builds the Google Books `q` parameter for a search request
///
/// Known emotions expand to their mapped keywords; unknown emotions are used
/// verbatim. An author adds an `inauthor:` qualifier, quoted so multi-word names
/// stay a single qualifier. With no inputs at all the deterministic
/// [`DEFAULT_QUERY`] is returned instead of an empty query.
pub fn build_query(request: &SearchRequest, keywords: &EmotionKeywordMap) -> String {
    let mut terms: Vec<String> = Vec::new();

    if request.has_emotion() {
        match keywords.lookup(&request.emotion) {
            Some(mapped) if !mapped.is_empty() => terms.push(mapped.join(" ")),
            _ => terms.push(request.emotion.clone()),
        }
    }

    if request.has_author() {
        // A name made only of quotes adds no qualifier
        let author = request.author.replace('"', "");
        if !author.trim().is_empty() {
            terms.push(format!("inauthor:\"{}\"", author.trim()));
        }
    }

    if terms.is_empty() {
        return DEFAULT_QUERY.to_string();
    }

    terms.join(" ")
}
