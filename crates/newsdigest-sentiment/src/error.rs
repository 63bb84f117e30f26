use newsdigest_scraper::ScraperError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No articles found")]
    NoArticlesFound { company: String },

    #[error("news fetch failed: {0}")]
    Scraper(ScraperError),

    #[error("keyword extraction failed: {0}")]
    Keywords(#[from] KeywordError),

    #[error("article {index} has no sentiment; annotate before aggregating")]
    Unannotated { index: usize },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<ScraperError> for AnalysisError {
    fn from(error: ScraperError) -> Self {
        match error {
            ScraperError::NoArticlesFound { company } => AnalysisError::NoArticlesFound { company },
            other => AnalysisError::Scraper(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum KeywordError {
    #[error("TEI embed error: {0}")]
    Tei(String),
}
