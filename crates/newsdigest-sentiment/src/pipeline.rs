//! Analysis pipeline orchestration.

use std::time::Duration;

use newsdigest_core::{AppConfig, Article, Report};
use newsdigest_scraper::NewsClient;

use crate::aggregate::{comparative_insights, sentiment_distribution, topic_overlap};
use crate::audio::{AudioGenerator, AudioStore};
use crate::error::AnalysisError;
use crate::keywords::KeywordExtractor;
use crate::report::build_report;
use crate::scorer::analyze_sentiment;

/// Runs fetch, annotate, aggregate and report for one company at a time.
#[derive(Debug, Clone)]
pub struct Analyzer {
    news: NewsClient,
    keywords: KeywordExtractor,
    audio: AudioGenerator,
}

impl Analyzer {
    #[must_use]
    pub fn new(news: NewsClient, keywords: KeywordExtractor, audio: AudioGenerator) -> Self {
        Self {
            news,
            keywords,
            audio,
        }
    }

    /// Wires every collaborator from application config.
    ///
    /// Keyword ranking uses the TEI server at `tei_url`. Without one (only
    /// allowed in development) it falls back to term frequency.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Scraper`] or [`AnalysisError::Http`] if an HTTP
    /// client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, AnalysisError> {
        let news = NewsClient::new(
            &config.search_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .build()?;

        let keywords = match &config.tei_url {
            Some(url) => KeywordExtractor::embedding(client.clone(), url),
            None => {
                tracing::warn!(
                    env = %config.env,
                    "NEWSDIGEST_TEI_URL not set; ranking keywords by term frequency"
                );
                KeywordExtractor::Frequency
            }
        };

        let audio = AudioGenerator::new(
            client,
            &config.translate_url,
            &config.tts_url,
            &config.audio_lang,
            &config.public_base_url,
            AudioStore::new(config.static_dir.clone()),
        );

        Ok(Self::new(news, keywords, audio))
    }

    /// The store generated audio is written to.
    #[must_use]
    pub fn audio_store(&self) -> &AudioStore {
        self.audio.store()
    }

    /// Fills sentiment, keywords and audio for one article.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Keywords`] if keyword ranking fails. Audio
    /// failures only leave `audio_reference` empty.
    pub async fn annotate(&self, article: &mut Article) -> Result<(), AnalysisError> {
        article.sentiment = Some(analyze_sentiment(&article.summary));
        article.keywords = self.keywords.extract(&article.summary).await?;
        article.audio_reference = self.audio.generate(&article.summary).await;
        Ok(())
    }

    /// Full analysis for `company`.
    ///
    /// 1. Fetch up to 15 articles from the search pages.
    /// 2. Annotate each article in order.
    /// 3. Aggregate distribution, pairwise insights and topic overlap.
    /// 4. Assemble the report and verdict.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::NoArticlesFound`]: no search page yielded an article.
    /// - [`AnalysisError::Keywords`]: the embedding server failed.
    pub async fn analyze(&self, company: &str) -> Result<Report, AnalysisError> {
        let mut articles = self.news.fetch_news_articles(company).await?;

        for article in &mut articles {
            self.annotate(article).await?;
        }

        let distribution = sentiment_distribution(&articles)?;
        let insights = comparative_insights(&articles);
        let overlap = topic_overlap(&articles);

        let missing_audio = articles
            .iter()
            .filter(|a| a.audio_reference.is_none())
            .count();
        if missing_audio > 0 {
            tracing::warn!(company, missing_audio, "some articles have no audio");
        }

        let report = build_report(company, articles, distribution, insights, overlap);
        tracing::info!(company, verdict = %report.verdict, "analysis complete");
        Ok(report)
    }
}
