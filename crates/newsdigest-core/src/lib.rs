//! Shared data model and configuration for newsdigest.

pub mod app_config;
pub mod config;
pub mod types;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use types::{
    Article, ComparativeInsight, ComparativeSentimentScore, Report, Sentiment, SentimentCounts,
    TopicOverlap,
};

/// Upper bound on articles carried into a report.
pub const MAX_ARTICLES: usize = 15;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
