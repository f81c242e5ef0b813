use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::errors::ToolError;

pub const INVALID_TOKEN_MESSAGE: &str = "Invalid MCP Server Token Access";

/// Per-request caller identity, handed explicitly from the transport to
/// dispatch.
#[derive(Debug, Clone, Default)]
pub struct CallerContext {
    pub api_key: Option<String>,
}

impl CallerContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
        }
    }
}

/// Inbound key check. Disabled when no key is configured.
#[derive(Clone)]
pub struct InboundAuth {
    expected_digest: Option<[u8; 32]>,
}

impl InboundAuth {
    pub fn new(expected: Option<&str>) -> Self {
        Self {
            expected_digest: expected
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(digest),
        }
    }

    pub fn disabled() -> Self {
        Self {
            expected_digest: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.expected_digest.is_some()
    }

    pub fn authorize(&self, caller: &CallerContext) -> Result<(), ToolError> {
        let Some(expected) = self.expected_digest.as_ref() else {
            return Ok(());
        };
        let provided = caller
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ToolError::denied(INVALID_TOKEN_MESSAGE))?;
        // Hashing first keeps the comparison length independent.
        if bool::from(digest(provided)[..].ct_eq(&expected[..])) {
            Ok(())
        } else {
            Err(ToolError::denied(INVALID_TOKEN_MESSAGE))
        }
    }
}

impl std::fmt::Debug for InboundAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InboundAuth")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ToolErrorKind;

    #[test]
    fn disabled_auth_accepts_everyone() {
        let auth = InboundAuth::new(None);
        assert!(!auth.is_enabled());
        assert!(auth.authorize(&CallerContext::anonymous()).is_ok());
        assert!(InboundAuth::new(Some("   ")).authorize(&CallerContext::anonymous()).is_ok());
    }

    #[test]
    fn matching_key_is_accepted() {
        let auth = InboundAuth::new(Some("k-123"));
        assert!(auth.authorize(&CallerContext::with_api_key("k-123")).is_ok());
    }

    #[test]
    fn wrong_or_missing_key_is_denied() {
        let auth = InboundAuth::new(Some("k-123"));
        for caller in [
            CallerContext::anonymous(),
            CallerContext::with_api_key("k-12"),
            CallerContext::with_api_key(""),
        ] {
            let err = auth.authorize(&caller).unwrap_err();
            assert_eq!(err.kind, ToolErrorKind::Denied);
            assert_eq!(err.message, INVALID_TOKEN_MESSAGE);
        }
    }

    #[test]
    fn debug_does_not_leak_the_digest() {
        let rendered = format!("{:?}", InboundAuth::new(Some("k-123")));
        assert_eq!(rendered, "InboundAuth { enabled: true }");
    }
}
