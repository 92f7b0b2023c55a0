// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use gemini_cache::config::GeminiConfig;
use gemini_cache::{CacheError, GeminiCache};
use mockito::{Matcher, ServerGuard};
use serde_json::json;

fn registry_at(base_url: String) -> GeminiCache {
    let mut config = GeminiConfig::default();
    config.configure(|c| {
        c.api_key = Some("test-key".to_string());
        c.api_base_url = base_url;
    });
    GeminiCache::new(config).unwrap()
}

fn registry(server: &ServerGuard) -> GeminiCache {
    registry_at(server.url())
}

fn assert_api_error(error: CacheError, expected_status: u16, expected_message: &str) {
    match error {
        CacheError::Api { status, message } => {
            assert_eq!(status, Some(expected_status));
            assert!(
                message.contains(expected_message),
                "message {:?} should contain {:?}",
                message,
                expected_message
            );
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[test]
fn test_error_display_messages() {
    let errors = vec![
        CacheError::Configuration("missing key".to_string()),
        CacheError::Conflict("docs".to_string()),
        CacheError::Api {
            status: Some(500),
            message: "Internal".to_string(),
        },
        CacheError::Generation {
            status: None,
            body: "Request failed".to_string(),
        },
        CacheError::NotFound("cachedContents/abc".to_string()),
        CacheError::Html("bad selector".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_conflict_error() {
    let error = CacheError::Conflict("docs".to_string());
    assert_eq!(format!("{}", error), "Cache name already exists: 'docs'");
}

#[test]
fn test_generation_error() {
    let error = CacheError::Generation {
        status: Some(429),
        body: "quota".to_string(),
    };
    assert_eq!(format!("{}", error), "Content generation failed (429): quota");
    assert_eq!(error.status(), Some(429));
}

#[tokio::test]
async fn test_list_non_200() {
    let mut server = mockito::Server::new_async().await;
    let _list = server
        .mock("GET", "/v1beta/cachedContents")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{"error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}}"#)
        .create_async()
        .await;

    let error = registry(&server).list().await.unwrap_err();
    assert_api_error(error, 403, "API key not valid");
}

#[tokio::test]
async fn test_create_non_200() {
    let mut server = mockito::Server::new_async().await;
    let _list = server
        .mock("GET", "/v1beta/cachedContents")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    let _create = server
        .mock("POST", "/v1beta/cachedContents")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"error": {"code": 400, "message": "Cached content is too small"}}"#)
        .create_async()
        .await;

    let error = registry(&server)
        .create_from_text("tiny", "tiny", Default::default())
        .await
        .unwrap_err();
    assert_api_error(error, 400, "Cached content is too small");
}

#[tokio::test]
async fn test_update_non_200_raw_body() {
    let mut server = mockito::Server::new_async().await;
    let _update = server
        .mock("PATCH", "/v1beta/cachedContents/gone")
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let error = registry(&server)
        .update("cachedContents/gone", &json!({"ttl": "60s"}))
        .await
        .unwrap_err();
    assert_api_error(error, 502, "Bad Gateway");
}

#[tokio::test]
async fn test_delete_non_200() {
    let mut server = mockito::Server::new_async().await;
    let _delete = server
        .mock("DELETE", "/v1beta/cachedContents/gone")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"error": {"code": 404, "message": "Not found"}}"#)
        .create_async()
        .await;

    let error = registry(&server).delete("cachedContents/gone").await.unwrap_err();
    assert_api_error(error, 404, "Not found");
}

#[tokio::test]
async fn test_network_error_hides_key() {
    // Nothing listens on port 1
    let cache = registry_at("http://127.0.0.1:1".to_string());

    match cache.list().await {
        Err(CacheError::Api { status, message }) => {
            assert_eq!(status, None);
            assert!(message.starts_with("Network error:"));
            assert!(!message.contains("test-key"));
        }
        other => panic!("expected network error, got {:?}", other),
    }
}
