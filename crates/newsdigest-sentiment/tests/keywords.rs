//! Embedding-ranked keyword extraction against a mocked TEI server.

use newsdigest_sentiment::{KeywordError, KeywordExtractor};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Answers every embed request with one unit vector per input.
struct UnitEmbeddings;

impl Respond for UnitEmbeddings {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: serde_json::Value = serde_json::from_slice(&request.body).expect("json body");
        let count = body["inputs"].as_array().map_or(0, Vec::len);
        ResponseTemplate::new(200).set_body_json(vec![vec![1.0_f32, 0.0]; count])
    }
}

#[tokio::test]
async fn ranks_candidates_by_similarity_to_document() {
    let server = MockServer::start().await;
    // Document first, then candidates in alphabetical order.
    Mock::given(method("POST"))
        .and(path("/embed"))
        .and(body_json(serde_json::json!({
            "inputs": [
                "Acme profits soared",
                "acme",
                "acme profits",
                "profits",
                "profits soared",
                "soared"
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            [1.0, 0.0],
            [0.0, 1.0],
            [1.0, 1.0],
            [1.0, 0.1],
            [1.0, 0.0],
            [0.2, 1.0]
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let extractor = KeywordExtractor::embedding(reqwest::Client::new(), &server.uri());
    let keywords = extractor
        .extract("Acme profits soared")
        .await
        .expect("keywords");

    assert_eq!(keywords, vec!["profits soared", "profits", "acme profits"]);
}

#[tokio::test]
async fn mismatched_embedding_count_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([[1.0, 0.0]])))
        .mount(&server)
        .await;

    let extractor = KeywordExtractor::embedding(reqwest::Client::new(), &server.uri());
    let err = extractor.extract("Acme profits soared").await.unwrap_err();
    assert!(matches!(err, KeywordError::Tei(_)));
}

#[tokio::test]
async fn stop_word_text_skips_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let extractor = KeywordExtractor::embedding(reqwest::Client::new(), &server.uri());
    let keywords = extractor.extract("it is what it is").await.expect("keywords");
    assert!(keywords.is_empty());
}

#[tokio::test]
async fn long_summaries_are_embedded_in_several_requests() {
    let server = MockServer::start().await;
    // 20 words give 20 unigrams and 19 bigrams; with the summary that is 40
    // inputs, sent as 32 then 8.
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(UnitEmbeddings)
        .expect(2)
        .mount(&server)
        .await;

    let text = "alpha bravo charlie delta echo foxtrot golf hotel india juliet \
                kilo lima mike november oscar papa quebec romeo sierra tango";
    let extractor = KeywordExtractor::embedding(reqwest::Client::new(), &server.uri());
    let keywords = extractor.extract(text).await.expect("keywords");

    // Equal similarities keep alphabetical order.
    assert_eq!(keywords, vec!["alpha", "alpha bravo", "bravo"]);
}
