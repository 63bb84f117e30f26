//! Cross-article aggregates: sentiment distribution, pairwise comparisons and
//! topic overlap.

use newsdigest_core::{Article, ComparativeInsight, Sentiment, SentimentCounts, TopicOverlap};

use crate::error::AnalysisError;

/// Counts articles per sentiment label.
///
/// # Errors
///
/// Returns [`AnalysisError::Unannotated`] if any article has no sentiment.
pub fn sentiment_distribution(articles: &[Article]) -> Result<SentimentCounts, AnalysisError> {
    let mut counts = SentimentCounts::default();
    for (index, article) in articles.iter().enumerate() {
        let sentiment = article
            .sentiment
            .ok_or(AnalysisError::Unannotated { index })?;
        counts.increment(sentiment);
    }
    Ok(counts)
}

/// One insight per consecutive pair of articles, numbered from 1.
///
/// Articles without a sentiment are described as `Neutral`.
#[must_use]
pub fn comparative_insights(articles: &[Article]) -> Vec<ComparativeInsight> {
    articles
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let (first, second) = (&pair[0], &pair[1]);
            let first_sentiment = first.sentiment.unwrap_or(Sentiment::Neutral);
            let second_sentiment = second.sentiment.unwrap_or(Sentiment::Neutral);
            ComparativeInsight {
                comparison: format!(
                    "Article {} highlights {}, while Article {} discusses {}.",
                    i + 1,
                    first.title,
                    i + 2,
                    second.title
                ),
                impact: format!(
                    "The first article focuses on {first_sentiment} aspects, while the second \
                     highlights {second_sentiment} aspects."
                ),
            }
        })
        .collect()
}

/// Topic overlap between the first two articles; empty with fewer than two.
#[must_use]
pub fn topic_overlap(articles: &[Article]) -> TopicOverlap {
    let [first, second, ..] = articles else {
        return TopicOverlap::default();
    };
    TopicOverlap {
        common: first.topics.intersection(&second.topics).cloned().collect(),
        unique_to_first: first.topics.difference(&second.topics).cloned().collect(),
        unique_to_second: second.topics.difference(&first.topics).cloned().collect(),
    }
}
