//! End-to-end pipeline tests against a mocked Gemini API

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use askdocs::config::GeminiConfig;
use askdocs::ingestion::{DocumentLoader, IngestPipeline, TextChunker};
use askdocs::pipeline::{RagChain, EMPTY_QUESTION_REPLY};
use askdocs::providers::{GeminiEmbedder, GeminiLlm};
use askdocs::retrieval::Retriever;
use askdocs::storage::VectorStore;

const DIMENSIONS: usize = 8;

fn gemini_config(base_url: String) -> GeminiConfig {
    GeminiConfig {
        base_url,
        dimensions: DIMENSIONS,
        ..GeminiConfig::default()
    }
}

fn unit_vector() -> Vec<f32> {
    let mut v = vec![0.0f32; DIMENSIONS];
    v[0] = 1.0;
    v
}

#[tokio::test]
async fn test_ingest_then_answer_round_trip() {
    let server = MockServer::start().await;

    // Ingestion embeds chunks in batch
    Mock::given(method("POST"))
        .and(path("/v1beta/models/text-embedding-004:batchEmbedContents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embeddings": [{ "values": unit_vector() }]
        })))
        .mount(&server)
        .await;

    // The query is embedded one at a time
    Mock::given(method("POST"))
        .and(path("/v1beta/models/text-embedding-004:embedContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embedding": { "values": unit_vector() }
        })))
        .mount(&server)
        .await;

    // Generation sees the retrieved context inside the prompt
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(body_string_contains("The capital of Freedonia is Example City."))
        .and(body_string_contains("What is the capital of Freedonia?"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "The capital is Example City." }] } }
            ]
        })))
        .mount(&server)
        .await;

    let config = gemini_config(server.uri());
    let api_key = "test-key".to_string();

    let data_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        data_dir.path().join("freedonia.txt"),
        "The capital of Freedonia is Example City.",
    )
    .unwrap();

    let persist_dir = tempfile::tempdir().unwrap();

    // Offline ingestion run
    {
        let store = Arc::new(
            VectorStore::open(persist_dir.path(), &config.embed_model, DIMENSIONS).unwrap(),
        );
        let pipeline = IngestPipeline::new(
            DocumentLoader::new(data_dir.path()),
            TextChunker::new(800, 120),
            Arc::new(GeminiEmbedder::new(&config, api_key.clone())),
            store,
        );
        assert_eq!(pipeline.run().await.unwrap(), 1);
    }

    // Separate query process: reopen the store from disk
    let store = Arc::new(
        VectorStore::open(persist_dir.path(), &config.embed_model, DIMENSIONS).unwrap(),
    );
    let retriever = Retriever::new(
        Arc::new(GeminiEmbedder::new(&config, api_key.clone())),
        store,
        4,
    );
    let chain = RagChain::new(retriever, Arc::new(GeminiLlm::new(&config, api_key)));

    let answer = chain
        .answer("What is the capital of Freedonia?")
        .await
        .unwrap();
    assert!(answer.contains("Example City"));
}

#[tokio::test]
async fn test_empty_question_makes_no_network_calls() {
    let server = MockServer::start().await;

    // Any request against the mock API would fail the expectation
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let config = gemini_config(server.uri());
    let persist_dir = tempfile::tempdir().unwrap();
    let store = Arc::new(
        VectorStore::open(persist_dir.path(), &config.embed_model, DIMENSIONS).unwrap(),
    );

    let retriever = Retriever::new(
        Arc::new(GeminiEmbedder::new(&config, "test-key".to_string())),
        store,
        4,
    );
    let chain = RagChain::new(
        retriever,
        Arc::new(GeminiLlm::new(&config, "test-key".to_string())),
    );

    assert_eq!(chain.answer("").await.unwrap(), EMPTY_QUESTION_REPLY);
    assert_eq!(chain.answer("   \n ").await.unwrap(), EMPTY_QUESTION_REPLY);

    // Dropping the server verifies the zero-call expectation
}
