//! News analysis pipeline for newsdigest.
//!
//! Fetches search results for a company, annotates every article with a
//! sentiment label, keywords and a translated audio clip, then aggregates the
//! set into a single [`Report`](newsdigest_core::Report).

pub mod aggregate;
pub mod audio;
pub mod error;
pub mod keywords;
pub mod pipeline;
pub mod report;
pub mod scorer;

pub use audio::{AudioError, AudioGenerator, AudioStore};
pub use error::{AnalysisError, KeywordError};
pub use keywords::KeywordExtractor;
pub use pipeline::Analyzer;
pub use scorer::{analyze_sentiment, polarity};
