use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::ToolError;
use crate::mcp::catalog::validate_tool_args;
use crate::mcp::envelope::{CallMeta, ResultEnvelope};
use crate::services::logger::Logger;
use crate::services::security::{CallerContext, InboundAuth};

use serde_json::Value;

#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn handle(&self, args: Value) -> Result<ResultEnvelope, ToolError>;
}

#[derive(Clone)]
pub struct ToolExecutor {
    logger: Logger,
    auth: InboundAuth,
    handlers: Arc<HashMap<String, Arc<dyn ToolHandler>>>,
}

impl ToolExecutor {
    pub fn new(
        logger: Logger,
        auth: InboundAuth,
        handlers: HashMap<String, Arc<dyn ToolHandler>>,
    ) -> Self {
        Self {
            logger: logger.child("executor"),
            auth,
            handlers: Arc::new(handlers),
        }
    }

    pub fn requires_api_key(&self) -> bool {
        self.auth.is_enabled()
    }

    pub fn has_tool(&self, tool: &str) -> bool {
        self.handlers.contains_key(tool)
    }

    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Authorizes the caller, resolves the handler, checks the arguments
    /// against the tool schema and runs it. Errors here are dispatch
    /// failures; upstream failures arrive as error envelopes.
    pub async fn execute(
        &self,
        tool: &str,
        args: Value,
        caller: &CallerContext,
    ) -> Result<(ResultEnvelope, CallMeta), ToolError> {
        let started_at = chrono::Utc::now().timestamp_millis();
        if let Err(err) = self.auth.authorize(caller) {
            self.logger.warn(
                "Rejected tool call",
                Some(&serde_json::json!({"tool": tool, "reason": err.message})),
            );
            return Err(err);
        }

        let Some(handler) = self.handlers.get(tool) else {
            return Err(ToolError::invalid_params(format!("Unknown tool: {}", tool))
                .with_hint(format!("Available tools: {}", self.tool_names().join(", "))));
        };
        validate_tool_args(tool, &args)?;

        let trace_id = uuid::Uuid::new_v4().to_string();
        self.logger.debug(
            "Dispatching tool call",
            Some(&serde_json::json!({"tool": tool, "trace_id": trace_id, "args": args})),
        );

        let envelope = handler.handle(args).await?;
        let meta = CallMeta {
            trace_id,
            duration_ms: chrono::Utc::now().timestamp_millis() - started_at,
        };
        self.logger.info(
            "Tool call finished",
            Some(&serde_json::json!({
                "tool": tool,
                "status": if envelope.is_error() { "error" } else { "success" },
                "trace_id": meta.trace_id,
                "duration_ms": meta.duration_ms,
            })),
        );
        Ok((envelope, meta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ToolErrorKind;
    use crate::services::logger::LogLevel;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Echo {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ToolHandler for Echo {
        async fn handle(&self, args: Value) -> Result<ResultEnvelope, ToolError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ResultEnvelope::success("echo", args))
        }
    }

    fn executor(auth: InboundAuth) -> (ToolExecutor, Arc<Echo>) {
        let echo = Arc::new(Echo {
            calls: AtomicUsize::new(0),
        });
        let mut handlers: HashMap<String, Arc<dyn ToolHandler>> = HashMap::new();
        handlers.insert("echo".to_string(), echo.clone());
        let logger = Logger::new("test").with_level(LogLevel::Error);
        (ToolExecutor::new(logger, auth, handlers), echo)
    }

    #[tokio::test]
    async fn dispatches_to_registered_handler() {
        let (exec, echo) = executor(InboundAuth::disabled());
        let (envelope, meta) = exec
            .execute("echo", serde_json::json!({"a": 1}), &CallerContext::anonymous())
            .await
            .expect("dispatch");
        assert_eq!(envelope.resultado(), Some(&serde_json::json!({"a": 1})));
        assert!(!meta.trace_id.is_empty());
        assert_eq!(echo.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_tool_lists_available_names() {
        let (exec, _) = executor(InboundAuth::disabled());
        let err = exec
            .execute("nope", Value::Null, &CallerContext::anonymous())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ToolErrorKind::InvalidParams);
        assert!(err.hint.unwrap().contains("echo"));
    }

    #[tokio::test]
    async fn unauthorized_callers_never_reach_handlers() {
        let (exec, echo) = executor(InboundAuth::new(Some("secret-key")));
        let err = exec
            .execute("echo", Value::Null, &CallerContext::with_api_key("wrong"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ToolErrorKind::Denied);
        assert_eq!(echo.calls.load(Ordering::SeqCst), 0);
        assert!(exec
            .execute("echo", Value::Null, &CallerContext::with_api_key("secret-key"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn schema_failures_never_reach_handlers() {
        let echo = Arc::new(Echo {
            calls: AtomicUsize::new(0),
        });
        let mut handlers: HashMap<String, Arc<dyn ToolHandler>> = HashMap::new();
        handlers.insert("consultar-ocr".to_string(), echo.clone());
        let exec = ToolExecutor::new(
            Logger::new("test").with_level(LogLevel::Error),
            InboundAuth::disabled(),
            handlers,
        );
        let err = exec
            .execute("consultar-ocr", serde_json::json!({}), &CallerContext::anonymous())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ToolErrorKind::InvalidParams);
        assert!(err.message.contains("missing required field 'chave'"));
        assert_eq!(echo.calls.load(Ordering::SeqCst), 0);
    }
}
