//! Stories backend integration module.
//!
//! Provides the client for `/api/stories` and the story/article data contract.

pub mod client;
pub mod models;

pub use client::{FetchError, NewsClient};
pub use models::{Article, Story, filter_comparable};
