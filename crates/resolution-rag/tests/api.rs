//! HTTP API tests driving the router in-process

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::ServiceExt;

use resolution_rag::config::RagConfig;
use resolution_rag::providers::LlmProvider;
use resolution_rag::server::{build_router, state::AppState};
use resolution_rag::testing::{CountingEmbedder, EchoLlm, FailingLlm, UnconfiguredLlm, ECHO_PREFIX};

const CORPUS: &[&str] = &[
    r#"{"texto_completo": "Se designa a Juan Perez como Director.", "titulo": "RM-001", "tipo": "Resolución"}"#,
    r#"{"texto_completo": "Se aprueba el plan anual de fiscalización ambiental.", "titulo": "RM-002", "tipo": "Resolución"}"#,
    r#"{"texto_completo": "Se acepta la renuncia del Jefe de la Oficina de Abastecimiento."}"#,
];

fn write_jsonl(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

fn app_with(file: &NamedTempFile, llm: Arc<dyn LlmProvider>) -> Router {
    let mut config = RagConfig::default();
    config.data.path = file.path().to_path_buf();
    let state = AppState::from_parts(config, Arc::new(CountingEmbedder::new(256)), llm);
    build_router(state)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_query(app: &Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/query")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_and_page() {
    let file = write_jsonl(CORPUS);
    let app = app_with(&file, Arc::new(EchoLlm::default()));

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    let page = String::from_utf8(body).unwrap();
    assert!(page.contains("Consultar"));
    assert!(page.contains("Limpiar Pregunta"));
    // Blocked status survives a finished submission
    assert!(page.contains("submit.disabled = statusBlocked"));

    let (status, info) = get_json(&app, "/api/info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["name"], "resolution-rag");
}

#[tokio::test]
async fn test_query_returns_answer_and_sources() {
    let file = write_jsonl(CORPUS);
    let app = app_with(&file, Arc::new(EchoLlm::default()));

    let (status, body) = post_query(&app, json!({"question": "¿Quién fue designado Director?"})).await;

    assert_eq!(status, StatusCode::OK);
    let answer = body["answer"].as_str().unwrap();
    assert!(answer.starts_with(ECHO_PREFIX));
    assert!(answer.contains("Juan Perez"));

    assert_eq!(body["chunks_retrieved"], 3);
    let top = &body["sources"][0];
    assert_eq!(top["title"], "RM-001");
    assert_eq!(top["doc_type"], "Resolución");
    assert_eq!(top["content"], "Se designa a Juan Perez como Director.");

    // Defaults for a record without title or type
    let untitled = body["sources"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["content"].as_str().unwrap().contains("renuncia"))
        .unwrap();
    assert_eq!(untitled["title"], "Sin título disponible");
    assert_eq!(untitled["doc_type"], "Documento");
}

#[tokio::test]
async fn test_top_k_bounds_sources() {
    let file = write_jsonl(CORPUS);
    let app = app_with(&file, Arc::new(EchoLlm::default()));

    let (_, body) = post_query(&app, json!({"question": "resolución", "top_k": 2})).await;
    assert_eq!(body["sources"].as_array().unwrap().len(), 2);

    let (_, body) = post_query(&app, json!({"question": "resolución", "top_k": 40})).await;
    assert_eq!(body["sources"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_blank_question_rejected() {
    let file = write_jsonl(CORPUS);
    let app = app_with(&file, Arc::new(EchoLlm::default()));

    let (status, body) = post_query(&app, json!({"question": "   "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request");
}

#[tokio::test]
async fn test_malformed_body_uses_error_shape() {
    let file = write_jsonl(CORPUS);
    let app = app_with(&file, Arc::new(EchoLlm::default()));

    for (content_type, body) in [
        ("application/json", "{not json"),
        ("application/json", r#"{"top_k": 3}"#),
        ("text/plain", r#"{"question": "¿Quién?"}"#),
    ] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/query")
                    .header("content-type", content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error["error"]["type"], "invalid_request");
        assert!(!error["error"]["message"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_missing_file_reports_unavailable() {
    let file = write_jsonl(CORPUS);
    let mut config = RagConfig::default();
    config.data.path = file.path().with_extension("missing");
    let app = build_router(AppState::from_parts(
        config,
        Arc::new(CountingEmbedder::new(64)),
        Arc::new(EchoLlm::default()),
    ));

    let (status, body) = get_json(&app, "/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["index"]["state"], "unavailable");
    assert!(body["index"]["message"].as_str().unwrap().contains("file not found"));

    let (status, body) = post_query(&app, json!({"question": "¿Quién?"})).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["type"], "index_unavailable");

    // Process keeps serving
    let (status, _) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_empty_corpus_reports_unavailable() {
    let file = write_jsonl(&["", "  "]);
    let llm = Arc::new(EchoLlm::default());
    let app = app_with(&file, llm.clone());

    let (_, body) = get_json(&app, "/api/status").await;
    assert_eq!(body["index"]["state"], "unavailable");
    assert!(body["index"]["message"]
        .as_str()
        .unwrap()
        .contains("no documents with text"));

    let (status, _) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = post_query(&app, json!({"question": "¿Quién fue designado Director?"})).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["type"], "index_unavailable");
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn test_malformed_line_reports_line_number() {
    let file = write_jsonl(&[CORPUS[0], "{not json"]);
    let app = app_with(&file, Arc::new(EchoLlm::default()));

    let (_, body) = get_json(&app, "/api/status").await;
    assert_eq!(body["index"]["state"], "unavailable");
    assert!(body["index"]["message"].as_str().unwrap().contains("line 2"));
}

#[tokio::test]
async fn test_missing_credential_makes_no_call() {
    let file = write_jsonl(CORPUS);
    let llm = Arc::new(UnconfiguredLlm::default());
    let app = app_with(&file, llm.clone());

    let (_, status_body) = get_json(&app, "/api/status").await;
    assert_eq!(status_body["index"]["state"], "ready");
    assert_eq!(status_body["generation"]["state"], "missing_credential");
    assert!(status_body["generation"]["message"]
        .as_str()
        .unwrap()
        .contains("GEMINI_API_KEY"));

    let (status, body) = post_query(&app, json!({"question": "¿Quién fue designado Director?"})).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["type"], "configuration_error");
    assert_eq!(llm.calls(), 0);

    let (status, _) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_generation_failure_is_per_query() {
    let file = write_jsonl(CORPUS);
    let llm = Arc::new(FailingLlm::default());
    let app = app_with(&file, llm.clone());

    let (status, body) = post_query(&app, json!({"question": "¿Quién?"})).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["type"], "generation_error");

    // Index survives; the next attempt reaches the model again
    let (status, _) = post_query(&app, json!({"question": "¿Quién?"})).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(llm.calls(), 2);

    let (_, status_body) = get_json(&app, "/api/status").await;
    assert_eq!(status_body["index"]["state"], "ready");
    assert_eq!(status_body["index"]["chunks"], 3);
    assert_eq!(status_body["index"]["documents"], 3);
}

#[tokio::test]
async fn test_ready_after_index_build() {
    let file = write_jsonl(CORPUS);
    let app = app_with(&file, Arc::new(EchoLlm::default()));

    let (status, _) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    get_json(&app, "/api/status").await;

    let (status, _) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
}
