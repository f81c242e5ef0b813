use crate::app::App;
use crate::constants::mcp::{PROTOCOL_VERSION, SERVER_VERSION};
use crate::errors::{ErrorCode, McpError, ToolError, ToolErrorKind};
use crate::mcp::catalog::list_tools;
use crate::mcp::envelope::build_call_result;
use crate::mcp::protocol::{JsonRpcRequest, JsonRpcResponse};
use crate::services::security::CallerContext;
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};

fn map_tool_error(tool: &str, error: &ToolError) -> McpError {
    // Rejected callers learn nothing beyond the fixed message.
    if error.kind == ToolErrorKind::Denied {
        return McpError::new(ErrorCode::InvalidRequest, error.message.clone());
    }
    let mut lines = vec![
        "AcertpixError".to_string(),
        format!("tool: {}", tool),
        format!("kind: {:?}", error.kind).to_lowercase(),
        format!("code: {}", error.code()),
        format!("message: {}", error.message),
    ];
    if let Some(hint) = &error.hint {
        lines.push(format!("hint: {}", hint));
    }
    let message = lines.join("\n");

    match error.kind {
        ToolErrorKind::InvalidParams => McpError::new(ErrorCode::InvalidParams, message),
        _ => McpError::new(ErrorCode::InternalError, message),
    }
}

pub struct McpServer {
    app: Arc<App>,
}

impl McpServer {
    pub fn new(app: Arc<App>) -> Self {
        Self { app }
    }

    pub fn app(&self) -> &Arc<App> {
        &self.app
    }

    fn handle_initialize(&self) -> Value {
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "serverInfo": {
                "name": self.app.product.server_name(),
                "version": SERVER_VERSION,
            },
            "capabilities": {"tools": {"listChanged": false}},
        })
    }

    fn handle_tools_list(&self) -> Value {
        serde_json::json!({ "tools": list_tools(self.app.product) })
    }

    async fn handle_tools_call(
        &self,
        name: &str,
        raw_args: Value,
        caller: &CallerContext,
    ) -> Result<Value, McpError> {
        let args = if raw_args.is_null() {
            Value::Object(Default::default())
        } else {
            raw_args
        };
        let (envelope, meta) = self
            .app
            .tool_executor
            .execute(name, args, caller)
            .await
            .map_err(|err| map_tool_error(name, &err))?;
        Ok(build_call_result(&envelope, Some(&meta)))
    }

    async fn dispatch(&self, request: JsonRpcRequest, caller: &CallerContext) -> Option<JsonRpcResponse> {
        match request.method.as_str() {
            "notifications/initialized" => request
                .id
                .map(|id| JsonRpcResponse::success(id, serde_json::json!({}))),
            _ if request.method.starts_with("notifications/") && request.is_notification() => None,
            "initialize" => request
                .id
                .map(|id| JsonRpcResponse::success(id, self.handle_initialize())),
            "ping" => request
                .id
                .map(|id| JsonRpcResponse::success(id, serde_json::json!({}))),
            "tools/list" => request
                .id
                .map(|id| JsonRpcResponse::success(id, self.handle_tools_list())),
            "tools/call" => {
                let id = request.id?;
                let params = request.params.as_object().cloned().unwrap_or_default();
                let name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");
                if name.is_empty() {
                    return Some(JsonRpcResponse::failure(
                        id,
                        McpError::invalid_params("Missing tool name"),
                    ));
                }
                let args = params.get("arguments").cloned().unwrap_or(Value::Null);
                Some(match self.handle_tools_call(name, args, caller).await {
                    Ok(result) => JsonRpcResponse::success(id, result),
                    Err(err) => JsonRpcResponse::failure(id, err),
                })
            }
            _ => request.id.map(|id| {
                JsonRpcResponse::failure(id, McpError::from_code(ErrorCode::MethodNotFound))
            }),
        }
    }

    /// Handles one raw JSON-RPC message. `None` means nothing is sent back
    /// (notifications).
    pub async fn handle_message(&self, raw: &str, caller: &CallerContext) -> Option<JsonRpcResponse> {
        let parsed: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(_) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    McpError::from_code(ErrorCode::ParseError),
                ))
            }
        };
        let request: JsonRpcRequest = match serde_json::from_value(parsed) {
            Ok(req) => req,
            Err(_) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    McpError::from_code(ErrorCode::InvalidRequest),
                ))
            }
        };
        self.dispatch(request, caller).await
    }

    /// Newline-delimited JSON-RPC over stdin/stdout. Local callers carry no
    /// inbound key.
    pub async fn run_stdio(&self) -> Result<(), ToolError> {
        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();
        let mut reader = BufReader::new(stdin).lines();
        let mut writer = BufWriter::new(stdout);
        let caller = CallerContext::anonymous();
        self.app.logger.info(
            "Serving over stdio",
            Some(&serde_json::json!({"server": self.app.product.server_name()})),
        );

        while let Some(line) = reader
            .next_line()
            .await
            .map_err(|err| ToolError::internal(err.to_string()))?
        {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(response) = self.handle_message(trimmed, &caller).await {
                let payload = serde_json::to_string(&response).unwrap_or_default();
                writer.write_all(payload.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        Ok(())
    }
}
