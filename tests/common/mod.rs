#![allow(dead_code)]

use acertpix_mcp::app::App;
use acertpix_mcp::config::{ApiSettings, Settings};
use acertpix_mcp::mcp::server::McpServer;
use acertpix_mcp::products::ProductLine;
use acertpix_mcp::services::api_client::ApiClient;
use acertpix_mcp::services::credentials::Credentials;
use acertpix_mcp::services::logger::{LogLevel, Logger};
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub const CLIENT_ID: &str = "acertpix-test-client";
pub const CLIENT_SECRET: &str = "acertpix-test-secret";
pub const TOKEN: &str = "tok-integration-1";

pub fn quiet_logger() -> Logger {
    Logger::new("test").with_level(LogLevel::Error)
}

pub fn api_settings(base_url: &str) -> ApiSettings {
    ApiSettings::new(base_url).with_credentials(Credentials::new(CLIENT_ID, CLIENT_SECRET))
}

pub fn client(base_url: &str) -> ApiClient {
    ApiClient::new(quiet_logger(), api_settings(base_url)).expect("client")
}

pub fn settings(base_url: &str, inbound_api_key: Option<&str>) -> Settings {
    Settings {
        api: api_settings(base_url),
        product: None,
        inbound_api_key: inbound_api_key.map(str::to_string),
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

pub fn server(base_url: &str, product: ProductLine, inbound_api_key: Option<&str>) -> McpServer {
    let app = App::initialize(&settings(base_url, inbound_api_key), product).expect("app");
    McpServer::new(Arc::new(app))
}

/// Token endpoint that must be hit exactly `times` times with the configured
/// credentials.
pub async fn mount_token(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path("/OAuth2/Token"))
        .and(body_json(serde_json::json!({
            "Scope": "api",
            "GrantType": "client_credentials",
            "ClientId": CLIENT_ID,
            "ClientSecret": CLIENT_SECRET,
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"access_token": TOKEN, "expires_in": 3600})),
        )
        .expect(times)
        .mount(server)
        .await;
}

pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}

pub fn temp_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("acertpix-{}-{}", label, uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    dir
}
