//! Final report assembly.

use newsdigest_core::{
    Article, ComparativeInsight, ComparativeSentimentScore, Report, SentimentCounts, TopicOverlap,
};

/// One-line summary naming the dominant sentiment.
#[must_use]
pub fn verdict(company: &str, counts: &SentimentCounts) -> String {
    format!(
        "{company}'s latest news coverage is mostly {}.",
        counts.dominant()
    )
}

#[must_use]
pub fn build_report(
    company: &str,
    articles: Vec<Article>,
    distribution: SentimentCounts,
    insights: Vec<ComparativeInsight>,
    overlap: TopicOverlap,
) -> Report {
    Report {
        company: company.to_string(),
        articles,
        verdict: verdict(company, &distribution),
        comparative: ComparativeSentimentScore {
            sentiment_distribution: distribution,
            coverage_differences: insights,
            topic_overlap: overlap,
        },
    }
}
