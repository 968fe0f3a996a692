//! HTTP-level tests for the Google image provider against a mock server

use mockito::Matcher;
use picpro_images::ImagePayload;
use picpro_providers::{ApiKey, GoogleImageProvider, ImageGenerator, ProviderError, HEADSHOT_INSTRUCTION};
use serde_json::json;

const ENDPOINT: &str = "/gemini-2.5-flash-image:generateContent";

fn selfie() -> ImagePayload {
    ImagePayload::new(vec![0xff, 0xd8, 0xff, 0xe0, 0x01, 0x02], "image/jpeg").unwrap()
}

fn provider(base_url: String) -> GoogleImageProvider {
    GoogleImageProvider::with_base_url(ApiKey::new("test-key").unwrap(), base_url)
}

#[tokio::test]
async fn test_generate_success_returns_png_payload() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", ENDPOINT)
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "contents": [{
                "role": "user",
                "parts": [
                    {"inlineData": {"mimeType": "image/jpeg", "data": "/9j/4AEC"}},
                    {"text": HEADSHOT_INSTRUCTION}
                ]
            }]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "candidates": [{
                    "content": {"role": "model", "parts": [
                        {"text": "Here you go"},
                        {"inlineData": {"mimeType": "image/png", "data": "iVBORw=="}}
                    ]},
                    "finishReason": "STOP"
                }]
            }"#,
        )
        .create_async()
        .await;

    let generated = provider(server.url()).generate(&selfie()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(generated.media_type(), "image/png");
    assert_eq!(generated.bytes(), &[0x89, 0x50, 0x4e, 0x47]);
}

#[tokio::test]
async fn test_generate_without_image_part() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", ENDPOINT)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates": [{"content": {"parts": [{"text": "Sorry"}]}}]}"#)
        .create_async()
        .await;

    let result = provider(server.url()).generate(&selfie()).await;
    assert!(matches!(result, Err(ProviderError::NoImageProduced(_))));
}

#[tokio::test]
async fn test_generate_blocked_prompt() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", ENDPOINT)
        .with_status(200)
        .with_body(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
        .create_async()
        .await;

    match provider(server.url()).generate(&selfie()).await {
        Err(ProviderError::NoImageProduced(reason)) => assert_eq!(reason, "SAFETY"),
        other => panic!("Expected NoImageProduced, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_auth_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", ENDPOINT)
        .with_status(403)
        .with_body(r#"{"error": {"message": "API key not valid"}}"#)
        .create_async()
        .await;

    let result = provider(server.url()).generate(&selfie()).await;
    assert_eq!(result.unwrap_err(), ProviderError::AuthError);
}

#[tokio::test]
async fn test_generate_rate_limited_uses_retry_after() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", ENDPOINT)
        .with_status(429)
        .with_header("retry-after", "17")
        .create_async()
        .await;

    let result = provider(server.url()).generate(&selfie()).await;
    assert_eq!(result.unwrap_err(), ProviderError::RateLimited(17));
}

#[tokio::test]
async fn test_generate_server_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", ENDPOINT)
        .with_status(500)
        .create_async()
        .await;

    let result = provider(server.url()).generate(&selfie()).await;
    assert!(matches!(result, Err(ProviderError::ServiceError { status: 500, .. })));
}

#[tokio::test]
async fn test_generate_malformed_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", ENDPOINT)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let result = provider(server.url()).generate(&selfie()).await;
    assert!(matches!(result, Err(ProviderError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_generate_network_error() {
    // Nothing listens on port 9 of localhost
    let result = provider("http://127.0.0.1:9".to_string()).generate(&selfie()).await;
    assert!(matches!(result, Err(ProviderError::NetworkError(_))));
}
