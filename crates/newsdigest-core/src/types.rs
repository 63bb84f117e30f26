//! Report data model.
//!
//! Field names on the wire are fixed by existing API clients, hence the
//! explicit `serde(rename)` on every field.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentiment label assigned to an article summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Fixed enumeration order, also used to break verdict ties.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    /// Map a polarity score to a label: `> 0` positive, `< 0` negative.
    #[must_use]
    pub fn from_polarity(polarity: f32) -> Self {
        if polarity > 0.0 {
            Sentiment::Positive
        } else if polarity < 0.0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One news item. The fetcher fills `title` and `summary`; the annotator
/// fills the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Summary")]
    pub summary: String,
    #[serde(rename = "Sentiment")]
    pub sentiment: Option<Sentiment>,
    /// Never populated; kept so topic overlap has something to compare.
    #[serde(rename = "Topics")]
    pub topics: BTreeSet<String>,
    #[serde(rename = "key_words")]
    pub keywords: Vec<String>,
    /// Retrieval URL of the translated audio, `None` if generation failed.
    #[serde(rename = "Hindi_Audio")]
    pub audio_reference: Option<String>,
}

impl Article {
    #[must_use]
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            ..Self::default()
        }
    }
}

/// Article count per sentiment label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    #[serde(rename = "Positive")]
    pub positive: usize,
    #[serde(rename = "Negative")]
    pub negative: usize,
    #[serde(rename = "Neutral")]
    pub neutral: usize,
}

impl SentimentCounts {
    pub fn increment(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    #[must_use]
    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// The label with the highest count. Ties go to the label that comes
    /// first in [`Sentiment::ALL`].
    #[must_use]
    pub fn dominant(&self) -> Sentiment {
        let mut best = Sentiment::ALL[0];
        for sentiment in Sentiment::ALL {
            if self.get(sentiment) > self.get(best) {
                best = sentiment;
            }
        }
        best
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparativeInsight {
    #[serde(rename = "Comparison")]
    pub comparison: String,
    #[serde(rename = "Impact")]
    pub impact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicOverlap {
    #[serde(rename = "Common Topics")]
    pub common: BTreeSet<String>,
    #[serde(rename = "Unique Topics in Article 1")]
    pub unique_to_first: BTreeSet<String>,
    #[serde(rename = "Unique Topics in Article 2")]
    pub unique_to_second: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparativeSentimentScore {
    #[serde(rename = "Sentiment Distribution")]
    pub sentiment_distribution: SentimentCounts,
    #[serde(rename = "Coverage Differences")]
    pub coverage_differences: Vec<ComparativeInsight>,
    #[serde(rename = "Topic Overlap")]
    pub topic_overlap: TopicOverlap,
}

/// Aggregated analysis returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Articles")]
    pub articles: Vec<Article>,
    #[serde(rename = "Comparative Sentiment Score")]
    pub comparative: ComparativeSentimentScore,
    #[serde(rename = "Final Sentiment Analysis")]
    pub verdict: String,
}
