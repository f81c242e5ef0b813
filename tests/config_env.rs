mod common;
use common::ENV_LOCK;

use acertpix_mcp::config::Settings;
use acertpix_mcp::products::ProductLine;

const KEYS: &[&str] = &[
    "ACERTPIX_API_URL",
    "ACERTPIX_CLIENT_ID",
    "ACERTPIX_CLIENT_SECRET",
    "ACERTPIX_API_SSL_VERIFY",
    "ACERTPIX_TIMEOUT_MS",
    "ACERTPIX_PRODUCT",
    "MCP_API_KEY",
];

fn restore_env(saved: Vec<(&str, Option<String>)>) {
    for (key, previous) in saved {
        match previous {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

#[tokio::test]
async fn settings_are_read_from_the_process_environment() {
    let _guard = ENV_LOCK.lock().await;
    let saved: Vec<(&str, Option<String>)> =
        KEYS.iter().map(|k| (*k, std::env::var(k).ok())).collect();

    std::env::set_var("ACERTPIX_API_URL", "https://api.acertpix.test/");
    std::env::set_var("ACERTPIX_CLIENT_ID", "id-1");
    std::env::set_var("ACERTPIX_CLIENT_SECRET", "secret-1");
    std::env::set_var("ACERTPIX_API_SSL_VERIFY", "false");
    std::env::set_var("ACERTPIX_TIMEOUT_MS", "45000");
    std::env::set_var("ACERTPIX_PRODUCT", "facematch");
    std::env::set_var("MCP_API_KEY", "inbound");

    let settings = Settings::from_env();
    restore_env(saved);

    let settings = settings.expect("settings");
    assert_eq!(settings.api.base_url, "https://api.acertpix.test");
    assert_eq!(settings.api.credentials.unwrap().client_secret(), "secret-1");
    assert!(!settings.api.ssl_verify);
    assert_eq!(settings.api.timeout_ms, 45_000);
    assert_eq!(settings.product, Some(ProductLine::Facematch));
    assert_eq!(settings.inbound_api_key.as_deref(), Some("inbound"));
}

#[tokio::test]
async fn invalid_base_url_is_a_startup_error() {
    let _guard = ENV_LOCK.lock().await;
    let saved: Vec<(&str, Option<String>)> =
        KEYS.iter().map(|k| (*k, std::env::var(k).ok())).collect();

    std::env::set_var("ACERTPIX_API_URL", "not a url");
    let result = Settings::from_env();
    restore_env(saved);

    let err = result.unwrap_err();
    assert!(err.message.contains("ACERTPIX_API_URL"));
}
