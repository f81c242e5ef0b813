use thiserror::Error;

/// Everything that can go wrong once an invocation leaves the process.
///
/// These never cross the tool boundary as errors: the pipeline renders them
/// into an error envelope. The variants exist so logs and tests can tell the
/// failure stages apart.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("network error while connecting to {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("network timeout while waiting for {url}: {source}")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}: {body}")]
    UpstreamStatus {
        url: String,
        status: u16,
        body: String,
    },

    #[error("invalid response from {url}: {reason}")]
    ResponseParse { url: String, reason: String },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl UpstreamError {
    /// Transport failure; deadline overruns get their own variant.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url, source }
        } else {
            Self::Network { url, source }
        }
    }

    pub fn parse(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ResponseParse {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UpstreamStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn stage(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::Timeout { .. } => "timeout",
            Self::UpstreamStatus { .. } => "upstream_status",
            Self::ResponseParse { .. } => "response_parse",
            Self::Configuration(_) => "configuration",
            Self::Io { .. } => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_carries_url_and_body() {
        let err = UpstreamError::UpstreamStatus {
            url: "https://api.example/OAuth2/Token".to_string(),
            status: 401,
            body: "{\"error\":\"invalid_client\"}".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("HTTP 401"));
        assert!(text.contains("https://api.example/OAuth2/Token"));
        assert!(text.contains("invalid_client"));
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.stage(), "upstream_status");
    }

    #[test]
    fn configuration_error_has_no_status() {
        let err = UpstreamError::Configuration("missing ACERTPIX_CLIENT_ID".to_string());
        assert_eq!(err.status_code(), None);
        assert_eq!(err.stage(), "configuration");
        assert!(err.to_string().starts_with("configuration error"));
    }
}
