//! Mood-driven book recommendations.
//!
//! A user names a mood and, optionally, an author. The mood is expanded into
//! search keywords through a fixed [`models::EmotionKeywordMap`], sent to Google
//! Books as one query, and the results are rendered as cards with decorative
//! imagery from Unsplash.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod views;
