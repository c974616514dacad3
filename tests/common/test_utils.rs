use super::mocks::MockVisionClient;
use axum::{
    Router,
    body::Body,
    http::{Request, header},
};
use pantry_receipt::{
    config::{Config, FailureFormat, LlmConfig},
    receipt::ReceiptAnalyzer,
    server::{self, handlers::AppState},
};
use std::{sync::Arc, time::Duration};

pub const BOUNDARY: &str = "X-PANTRY-TEST-BOUNDARY";

/// A few bytes that start like a JPEG; nothing decodes them locally.
pub const FAKE_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

pub const MILK_REPLY: &str = "```json\n[{\"item\": \"Milk\", \"shelf_life_days\": 7, \"category\": \"Dairy\", \"quantity\": 1}]\n```";

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        llm: LlmConfig {
            api_key: "test-api-key".to_string(),
            model: "gemini-test".to_string(),
            timeout_secs: 5,
            ..LlmConfig::default()
        },
        ..Config::default()
    }
}

pub fn create_state(mock: &MockVisionClient, failure_format: FailureFormat) -> AppState {
    create_state_with_timeout(mock, failure_format, Duration::from_secs(5))
}

pub fn create_state_with_timeout(
    mock: &MockVisionClient,
    failure_format: FailureFormat,
    timeout: Duration,
) -> AppState {
    AppState {
        analyzer: Arc::new(ReceiptAnalyzer::new(Arc::new(mock.clone()), timeout)),
        failure_format,
    }
}

/// Full application, with CORS and tracing layers, backed by `mock`.
pub fn create_test_app(mock: &MockVisionClient) -> Router {
    let config = create_test_config();
    server::app(create_state(mock, config.llm.failure_format), &config).unwrap()
}

/// Encodes one multipart field; `content_type` of `None` omits the header.
pub fn multipart_body(
    field_name: &str,
    file_name: &str,
    content_type: Option<&str>,
    data: &[u8],
) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field_name, file_name
        )
        .as_bytes(),
    );
    if let Some(content_type) = content_type {
        body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn image_upload(content_type: &str, data: &[u8]) -> Request<Body> {
    upload_request(multipart_body("file", "receipt.jpg", Some(content_type), data))
}
