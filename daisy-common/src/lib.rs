//! # Daisy Common Library
//!
//! Shared code for the Daisy report service including:
//! - Post recency ordering (identifier extraction, date parsing, card ordering)
//! - Blog URL validation
//! - Database schema and queries for blogs, posts and reports
//! - Configuration loading
//! - Timestamp helpers

pub mod blog_url;
pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod recency;
pub mod time;

pub use error::{Error, Result};
pub use recency::{CardContainer, OrderingEngine, PostRecord, SortKey};
