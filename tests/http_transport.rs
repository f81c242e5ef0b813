mod common;
use common::{mount_token, request_count, server};

use acertpix_mcp::errors::ToolErrorKind;
use acertpix_mcp::mcp::http::{router, run_http};
use acertpix_mcp::products::ProductLine;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn rpc_request(api_key: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        builder = builder.header("api-key", key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn consultar(id: u64) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": "consultar-analise", "arguments": {"chave": "K"}},
    })
}

#[tokio::test]
async fn health_reports_the_served_line() {
    let app = router(Arc::new(server("http://127.0.0.1:1", ProductLine::Analise, Some("k"))));
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body, json!({"status": "ok", "server": "acertpix-api-analise"}));
}

#[tokio::test]
async fn missing_api_key_is_rejected_without_upstream_traffic() {
    let upstream = MockServer::start().await;
    let app = router(Arc::new(server(&upstream.uri(), ProductLine::Analise, Some("k-1"))));

    let response = app.oneshot(rpc_request(None, consultar(1))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], -32600);
    assert_eq!(body["error"]["message"], "Invalid MCP Server Token Access");
    assert_eq!(request_count(&upstream).await, 0);
}

#[tokio::test]
async fn valid_api_key_reaches_the_pipeline() {
    let upstream = MockServer::start().await;
    mount_token(&upstream, 1).await;
    Mock::given(method("GET"))
        .and(path("/Analises/Consultar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Status": "Em analise"})))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = router(Arc::new(server(&upstream.uri(), ProductLine::Analise, Some("k-1"))));
    let response = app
        .oneshot(rpc_request(Some("k-1"), consultar(2)))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["id"], 2);
    assert_eq!(body["result"]["isError"], false);
}

#[tokio::test]
async fn notifications_are_acknowledged_without_body() {
    let app = router(Arc::new(server("http://127.0.0.1:1", ProductLine::Ocr, None)));
    let response = app
        .oneshot(rpc_request(
            None,
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn http_transport_refuses_to_start_without_an_inbound_key() {
    let upstream = MockServer::start().await;
    let addr = "127.0.0.1:0".parse().unwrap();
    let err = run_http(Arc::new(server(&upstream.uri(), ProductLine::Score, None)), addr)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ToolErrorKind::Configuration);
    assert!(err.message.contains("MCP_API_KEY"));
    assert_eq!(request_count(&upstream).await, 0);
}
