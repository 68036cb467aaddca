//! Endpoint contract tests, driving the router in-process.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use faunad::config::Config;
use faunad::server::{app, AppState};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Upstreams that refuse connections immediately, for tests that only care
/// about the HTTP contract.
fn unreachable_config() -> Config {
    Config {
        api_key: None,
        knowledge_query_url: "http://127.0.0.1:1/knowledge/query".to_string(),
        knowledge_chat_url: "http://127.0.0.1:1/knowledge/chat".to_string(),
        completion_url: "http://127.0.0.1:1/responses".to_string(),
        cat_api_url: "http://127.0.0.1:1/cats".to_string(),
        dog_api_url: "http://127.0.0.1:1/dogs".to_string(),
        media_api_url: "http://127.0.0.1:1/media".to_string(),
        ..Config::default()
    }
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_animal_missing_name_is_400() {
    let app = app(AppState::new(unreachable_config()));
    let response = app.oneshot(post("/animal", json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_animal_blank_name_is_400() {
    let app = app(AppState::new(unreachable_config()));
    let response = app
        .oneshot(post("/animal", json!({ "name": "   " })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_animal_is_200_with_complete_record_despite_outage() {
    let app = app(AppState::new(unreachable_config()));
    let response = app
        .oneshot(post("/animal", json!({ "name": "tigre" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let record = body_json(response).await;
    assert_eq!(record["name"], "Tigre");
    assert_eq!(record["species"], "Panthera tigris");
    assert_eq!(record["source"], "Mock Database");
    for field in ["name", "species", "size", "weight", "description"] {
        assert!(
            !record[field].as_str().unwrap().is_empty(),
            "field {} must be non-empty",
            field
        );
    }
    assert!(record["image"]["url"]
        .as_str()
        .unwrap()
        .starts_with("data:image/svg+xml;base64,"));
}

#[tokio::test]
async fn test_animal_mock_mode_stays_fully_offline() {
    let server = MockServer::start();
    let any_upstream = server.mock(|when, then| {
        when.method(GET).path("/cats");
        then.status(200);
    });

    let config = Config {
        mock_mode: true,
        api_key: Some("gsk_test".to_string()),
        cat_api_url: server.url("/cats"),
        ..unreachable_config()
    };
    let app = app(AppState::new(config));
    let response = app
        .oneshot(post("/animal", json!({ "name": "chat" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let record = body_json(response).await;
    assert_eq!(record["source"], "Mock Database");
    assert!(record["image"]["url"]
        .as_str()
        .unwrap()
        .starts_with("data:image/svg+xml;base64,"));
    any_upstream.assert_hits(0);
}

#[tokio::test]
async fn test_ai_missing_prompt_is_400() {
    let app = app(AppState::new(unreachable_config()));
    let response = app.oneshot(post("/ai", json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ai_upstream_failure_is_500() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/responses");
        then.status(503).body("upstream on fire");
    });

    let config = Config {
        api_key: Some("gsk_test".to_string()),
        completion_url: server.url("/responses"),
        ..unreachable_config()
    };
    let app = app(AppState::new(config));
    let response = app
        .oneshot(post("/ai", json!({ "prompt": "Bonjour" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("upstream on fire"));
}

#[tokio::test]
async fn test_ai_extracts_text_from_fragment_payload() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/responses");
        then.status(200).json_body(json!({
            "output": [{ "content": [{ "type": "output_text", "text": "Réponse rapide." }] }]
        }));
    });

    let config = Config {
        api_key: Some("gsk_test".to_string()),
        completion_url: server.url("/responses"),
        ..unreachable_config()
    };
    let app = app(AppState::new(config));
    let response = app
        .oneshot(post("/ai", json!({ "prompt": "Bonjour" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let answer = body_json(response).await;
    assert_eq!(answer["text"], "Réponse rapide.");
    assert!(answer["raw"]["output"].is_array());
}

#[tokio::test]
async fn test_ai_mock_mode_masks_the_outage() {
    let config = Config {
        mock_mode: true,
        ..unreachable_config()
    };
    let app = app(AppState::new(config));
    let response = app
        .oneshot(post("/ai", json!({ "prompt": "Bonjour" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let answer = body_json(response).await;
    assert_eq!(answer["raw"]["mock"], true);
    assert!(answer["text"].as_str().unwrap().contains("modèles rapides"));
}

#[tokio::test]
async fn test_query_missing_field_is_400() {
    let app = app(AppState::new(unreachable_config()));
    let response = app.oneshot(post("/query", json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_query_passes_the_upstream_payload_through() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/knowledge/query")
            .header("authorization", "Bearer gsk_test")
            .json_body(json!({ "query": "articles récents" }));
        then.status(200)
            .json_body(json!({ "results": [{ "_id": "a1", "title": "Article" }] }));
    });

    let config = Config {
        api_key: Some("gsk_test".to_string()),
        knowledge_query_url: server.url("/knowledge/query"),
        ..unreachable_config()
    };
    let app = app(AppState::new(config));
    let response = app
        .oneshot(post("/query", json!({ "query": "articles récents" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let payload = body_json(response).await;
    assert_eq!(payload["results"][0]["_id"], "a1");
}

#[tokio::test]
async fn test_query_mock_mode_returns_sample() {
    let config = Config {
        mock_mode: true,
        ..unreachable_config()
    };
    let app = app(AppState::new(config));
    let response = app
        .oneshot(post("/query", json!({ "query": "n'importe quoi" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let payload = body_json(response).await;
    assert_eq!(payload["mock"], true);
    assert!(payload["results"].is_array());
}

#[tokio::test]
async fn test_health_reports_version_and_uptime() {
    let app = app(AppState::new(unreachable_config()));
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health = body_json(response).await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["version"], env!("CARGO_PKG_VERSION"));
    assert!(health["uptime_seconds"].is_u64());
}
