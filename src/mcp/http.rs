use crate::constants::mcp::API_KEY_HEADER;
use crate::errors::ToolError;
use crate::mcp::server::McpServer;
use crate::services::security::CallerContext;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;

/// Routes: `POST /mcp` carries one JSON-RPC message, `GET /health` answers
/// liveness probes.
pub fn router(server: Arc<McpServer>) -> Router {
    Router::new()
        .route("/mcp", post(handle_mcp))
        .route("/health", get(handle_health))
        .with_state(server)
}

async fn handle_health(State(server): State<Arc<McpServer>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "server": server.app().product.server_name(),
    }))
}

async fn handle_mcp(
    State(server): State<Arc<McpServer>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let caller = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|key| CallerContext::with_api_key(key))
        .unwrap_or_default();
    match server.handle_message(&body, &caller).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Serves the router until the listener fails. Refuses to start without an
/// inbound key: remote callers are always authenticated.
pub async fn run_http(server: Arc<McpServer>, addr: SocketAddr) -> Result<(), ToolError> {
    if !server.app().tool_executor.requires_api_key() {
        return Err(
            ToolError::configuration("MCP_API_KEY must be set for the HTTP transport")
                .with_hint("Set MCP_API_KEY or use --transport stdio"),
        );
    }
    let logger = server.app().logger.child("http");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    logger.info(
        "Serving over HTTP",
        Some(&serde_json::json!({"addr": addr.to_string()})),
    );
    axum::serve(listener, router(server)).await?;
    Ok(())
}
