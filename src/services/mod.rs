pub mod book_search;
pub mod feedback;
pub mod imagery;
pub mod providers;
pub mod query;
pub mod recommendations;

pub use book_search::{search_books, BookSearch, SearchOutcome};
pub use feedback::{FeedbackProvider, RedditFeedback};
pub use imagery::{ImageProvider, UnsplashImagery};
pub use providers::{BookProvider, GoogleBooksProvider};
