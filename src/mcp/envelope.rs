use serde::Serialize;
use serde_json::Value;

/// Outcome of one tool invocation once it has reached the I/O stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResultEnvelope {
    Success {
        operation: String,
        resultado: Value,
    },
    Error {
        operation: String,
        message: String,
        url: String,
    },
}

impl ResultEnvelope {
    pub fn success(operation: impl Into<String>, resultado: Value) -> Self {
        Self::Success {
            operation: operation.into(),
            resultado,
        }
    }

    pub fn error(
        operation: impl Into<String>,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::Error {
            operation: operation.into(),
            message: message.into(),
            url: url.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn operation(&self) -> &str {
        match self {
            Self::Success { operation, .. } | Self::Error { operation, .. } => operation,
        }
    }

    pub fn resultado(&self) -> Option<&Value> {
        match self {
            Self::Success { resultado, .. } => Some(resultado),
            Self::Error { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Error { message, .. } => Some(message),
            Self::Success { .. } => None,
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| {
            serde_json::json!({"status": "error", "operation": self.operation()})
        })
    }
}

/// Per-call metadata attached next to the envelope in the tool result text.
#[derive(Debug, Clone, Serialize)]
pub struct CallMeta {
    pub trace_id: String,
    pub duration_ms: i64,
}

/// Renders an envelope as an MCP `tools/call` result.
pub fn build_call_result(envelope: &ResultEnvelope, meta: Option<&CallMeta>) -> Value {
    let mut body = envelope.to_value();
    if let (Some(meta), Value::Object(map)) = (meta, &mut body) {
        map.insert("trace_id".to_string(), Value::String(meta.trace_id.clone()));
        map.insert("duration_ms".to_string(), Value::from(meta.duration_ms));
    }
    let text = serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string());
    serde_json::json!({
        "content": [{"type": "text", "text": text}],
        "isError": envelope.is_error(),
    })
}
