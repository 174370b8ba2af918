/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for issuu-adapter tests

use issuu_adapter::{ClientConfig, Credentials, IssuuClient};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const API_KEY: &str = "test-api-key";
pub const SECRET_KEY: &str = "test-secret";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> IssuuClient {
    let config = ClientConfig {
        endpoint: server.uri(),
        ..ClientConfig::default()
    };
    IssuuClient::with_config(Credentials::new(API_KEY, SECRET_KEY), config).expect("client init")
}

/// Successful envelope in the shape the API returns
pub fn ok_envelope(payload: Value) -> Value {
    json!({
        "rsp": {
            "stat": "ok",
            "_content": {"result": {"_content": payload}}
        }
    })
}

/// Failed envelope with an API error code
#[allow(dead_code)]
pub fn fail_envelope(code: &str, message: &str) -> Value {
    json!({
        "rsp": {
            "stat": "fail",
            "_content": {"error": {"code": code, "message": message}}
        }
    })
}
