//! News search fetcher.
//!
//! Walks a fixed set of BBC search result pages for a company name and turns
//! each result card into an unannotated [`Article`](newsdigest_core::Article).

pub mod client;
pub mod error;
pub mod parse;

pub use client::{NewsClient, SEARCH_PAGES};
pub use error::ScraperError;
pub use parse::parse_search_page;
