use serde::{Serialize, Serializer};

/// JSON-RPC 2.0 error codes used by the tool host protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    ParseError = -32700,
    InvalidRequest = -32600,
    MethodNotFound = -32601,
    InvalidParams = -32602,
    InternalError = -32603,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn default_message(self) -> &'static str {
        match self {
            ErrorCode::ParseError => "Parse error",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::MethodNotFound => "Method not found",
            ErrorCode::InvalidParams => "Invalid params",
            ErrorCode::InternalError => "Internal error",
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.as_i32())
    }
}

/// Protocol-level failure, sent back as the `error` member of a response.
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[error("[{}] {message}", .code.as_i32())]
pub struct McpError {
    pub code: ErrorCode,
    pub message: String,
}

impl McpError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidParams, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_the_numeric_code() {
        let err = McpError::invalid_params("Invalid arguments for consultar-ocr");
        assert_eq!(err.to_string(), "[-32602] Invalid arguments for consultar-ocr");
    }

    #[test]
    fn from_code_uses_the_standard_message() {
        let err = McpError::from_code(ErrorCode::MethodNotFound);
        assert_eq!(err.message, "Method not found");
        assert_eq!(err.code.as_i32(), -32601);
    }
}
