//! HTTP client for the news search pages.

use std::ops::RangeInclusive;
use std::time::Duration;

use newsdigest_core::{Article, MAX_ARTICLES};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;

use crate::error::ScraperError;
use crate::parse::parse_search_page;

/// Search result pages queried per company, in order.
pub const SEARCH_PAGES: RangeInclusive<u32> = 0..=5;

/// Fetches search result pages and parses them into articles.
///
/// Pages are fetched one after another. A page that fails is logged and
/// skipped; there are no retries.
#[derive(Debug, Clone)]
pub struct NewsClient {
    client: Client,
    base_url: String,
}

impl NewsClient {
    /// Creates a `NewsClient` against `base_url` (e.g. `https://www.bbc.com`).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of one search result page for `company`.
    #[must_use]
    pub fn search_url(&self, company: &str, page: u32) -> String {
        let encoded = utf8_percent_encode(company, NON_ALPHANUMERIC);
        format!("{}/search?q={encoded}&page={page}", self.base_url)
    }

    /// Fetches and parses a single search result page.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`]: any non-2xx status.
    /// - [`ScraperError::Http`]: network failure or unreadable body.
    pub async fn fetch_search_page(
        &self,
        company: &str,
        page: u32,
    ) -> Result<Vec<Article>, ScraperError> {
        let url = self.search_url(company, page);
        let response = self
            .client
            .get(&url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        Ok(parse_search_page(&body))
    }

    /// Fetches every page in [`SEARCH_PAGES`] and returns at most
    /// [`MAX_ARTICLES`] articles in page order.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::NoArticlesFound`] when no page produced an
    /// article. Individual page failures are logged, never returned.
    pub async fn fetch_news_articles(&self, company: &str) -> Result<Vec<Article>, ScraperError> {
        let mut articles = Vec::new();

        for page in SEARCH_PAGES {
            match self.fetch_search_page(company, page).await {
                Ok(found) => {
                    tracing::debug!(company, page, count = found.len(), "parsed search page");
                    articles.extend(found);
                }
                Err(e) => {
                    tracing::warn!(
                        company,
                        page,
                        url = %self.search_url(company, page),
                        error = %e,
                        "search page fetch failed; skipping"
                    );
                }
            }
        }

        articles.truncate(MAX_ARTICLES);

        if articles.is_empty() {
            return Err(ScraperError::NoArticlesFound {
                company: company.to_string(),
            });
        }

        tracing::info!(company, count = articles.len(), "collected articles");
        Ok(articles)
    }
}
