//! Keyphrase extraction.
//!
//! Candidates are the unigrams and bigrams of a summary after stop-word
//! removal. With a TEI server configured they are ranked by embedding
//! similarity to the whole summary; otherwise by how often they occur.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::KeywordError;

/// Keyphrases returned per summary.
pub const TOP_N: usize = 3;

/// TEI's default `--max-client-batch-size`.
const MAX_INPUTS_PER_REQUEST: usize = 32;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid token regex"));

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "an",
    "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "been",
    "before", "beforehand", "behind", "being", "below", "beside", "besides", "between", "beyond",
    "both", "but", "by", "can", "cannot", "could", "did", "do", "does", "done", "down", "due",
    "during", "each", "either", "else", "elsewhere", "enough", "etc", "even", "ever", "every",
    "everyone", "everything", "everywhere", "except", "few", "first", "for", "former",
    "formerly", "from", "further", "get", "give", "go", "had", "has", "hasnt", "have", "he",
    "hence", "her", "here", "hereafter", "hereby", "herein", "hers", "herself", "him",
    "himself", "his", "how", "however", "ie", "if", "in", "inc", "indeed", "into", "is", "it",
    "its", "itself", "just", "keep", "last", "latter", "least", "less", "ltd", "made", "many",
    "may", "me", "meanwhile", "might", "more", "moreover", "most", "mostly", "much", "must",
    "my", "myself", "namely", "neither", "never", "nevertheless", "next", "no", "nobody",
    "none", "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once",
    "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours", "ourselves",
    "out", "over", "own", "per", "perhaps", "please", "put", "rather", "re", "same", "see",
    "seem", "seemed", "seeming", "seems", "several", "she", "should", "since", "so", "some",
    "somehow", "someone", "something", "sometime", "sometimes", "somewhere", "still", "such",
    "than", "that", "the", "their", "them", "themselves", "then", "thence", "there",
    "thereafter", "thereby", "therefore", "therein", "thereupon", "these", "they", "this",
    "those", "though", "through", "throughout", "thru", "thus", "to", "together", "too",
    "toward", "towards", "two", "under", "until", "up", "upon", "us", "very", "via", "was",
    "we", "well", "were", "what", "whatever", "when", "whence", "whenever", "where",
    "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever", "whether",
    "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why", "will",
    "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Ranks keyphrase candidates for a summary.
#[derive(Debug, Clone)]
pub enum KeywordExtractor {
    /// Term-frequency ranking; the development fallback when no embedding
    /// server is configured.
    Frequency,
    /// Cosine similarity between candidate and summary embeddings.
    Embedding(EmbeddingRanker),
}

impl KeywordExtractor {
    /// Builds an extractor that ranks by embeddings served at `tei_url`.
    #[must_use]
    pub fn embedding(client: reqwest::Client, tei_url: &str) -> Self {
        KeywordExtractor::Embedding(EmbeddingRanker::new(client, tei_url))
    }

    /// Up to [`TOP_N`] keyphrases of `text`, most relevant first.
    ///
    /// Ties keep alphabetical candidate order. Text without any candidate
    /// yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`KeywordError::Tei`] when the embedding server fails.
    pub async fn extract(&self, text: &str) -> Result<Vec<String>, KeywordError> {
        let tokens = tokenize(text);
        let candidates = candidates(&tokens);
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let scores = match self {
            KeywordExtractor::Frequency => frequency_scores(&tokens, &candidates),
            KeywordExtractor::Embedding(ranker) => ranker.similarities(text, &candidates).await?,
        };

        Ok(top_ranked(candidates, &scores))
    }
}

/// Scores candidates against a TEI (Text Embeddings Inference) `/embed`
/// endpoint.
#[derive(Debug, Clone)]
pub struct EmbeddingRanker {
    client: reqwest::Client,
    embed_url: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [&'a str],
}

impl EmbeddingRanker {
    fn new(client: reqwest::Client, tei_url: &str) -> Self {
        Self {
            client,
            embed_url: format!("{}/embed", tei_url.trim_end_matches('/')),
        }
    }

    /// Similarity of each candidate to the whole text, in candidate order.
    ///
    /// The text is embedded together with the candidates; inputs are split
    /// into requests of at most [`MAX_INPUTS_PER_REQUEST`].
    async fn similarities(
        &self,
        text: &str,
        candidates: &[String],
    ) -> Result<Vec<f32>, KeywordError> {
        let mut inputs: Vec<&str> = Vec::with_capacity(candidates.len() + 1);
        inputs.push(text);
        inputs.extend(candidates.iter().map(String::as_str));

        let mut vectors: Vec<Vec<f32>> = Vec::with_capacity(inputs.len());
        for batch in inputs.chunks(MAX_INPUTS_PER_REQUEST) {
            vectors.extend(self.embed_batch(batch).await?);
        }

        let Some((document, rest)) = vectors.split_first() else {
            return Err(KeywordError::Tei("no embedding for the summary".to_string()));
        };
        Ok(rest
            .iter()
            .map(|candidate| cosine_similarity(document, candidate))
            .collect())
    }

    async fn embed_batch(&self, batch: &[&str]) -> Result<Vec<Vec<f32>>, KeywordError> {
        let response = self
            .client
            .post(&self.embed_url)
            .json(&EmbedRequest { inputs: batch })
            .send()
            .await
            .map_err(|e| KeywordError::Tei(format!("embed request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(KeywordError::Tei(format!(
                "embedding server returned status {status}"
            )));
        }

        let vectors: Vec<Vec<f32>> = response
            .json()
            .await
            .map_err(|e| KeywordError::Tei(format!("unreadable embed response: {e}")))?;
        if vectors.len() != batch.len() {
            return Err(KeywordError::Tei(format!(
                "expected {} embeddings, got {}",
                batch.len(),
                vectors.len()
            )));
        }
        Ok(vectors)
    }
}

/// Cosine similarity of two vectors; `0.0` when either has zero norm or the
/// lengths differ.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Lowercased tokens of two or more word characters, stop words removed.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .filter(|token| !STOP_WORDS.contains(&token.as_str()))
        .collect()
}

/// Distinct unigrams and bigrams in alphabetical order.
pub(crate) fn candidates(tokens: &[String]) -> Vec<String> {
    let mut set: BTreeSet<String> = tokens.iter().cloned().collect();
    for pair in tokens.windows(2) {
        set.insert(format!("{} {}", pair[0], pair[1]));
    }
    set.into_iter().collect()
}

#[allow(clippy::cast_precision_loss)]
fn frequency_scores(tokens: &[String], candidates: &[String]) -> Vec<f32> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_default() += 1;
    }
    for pair in tokens.windows(2) {
        *counts.entry(format!("{} {}", pair[0], pair[1])).or_default() += 1;
    }
    candidates
        .iter()
        .map(|c| counts.get(c).copied().unwrap_or(0) as f32)
        .collect()
}

fn top_ranked(candidates: Vec<String>, scores: &[f32]) -> Vec<String> {
    let mut ranked: Vec<(String, f32)> = candidates.into_iter().zip(scores.iter().copied()).collect();
    // Stable sort keeps candidate order among equal scores.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
        .into_iter()
        .take(TOP_N)
        .map(|(phrase, _)| phrase)
        .collect()
}
