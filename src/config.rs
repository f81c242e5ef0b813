use crate::constants::network::{
    DEFAULT_API_BASE_URL, DEFAULT_HTTP_HOST, DEFAULT_HTTP_PORT, TIMEOUT_API_REQUEST_MS,
};
use crate::constants::protocols::ALLOWED_HTTP;
use crate::errors::ToolError;
use crate::products::ProductLine;
use crate::services::credentials::Credentials;
use crate::utils::feature_flags::parse_flag;

/// Upstream connection settings shared by every product line.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub credentials: Option<Credentials>,
    pub ssl_verify: bool,
    pub timeout_ms: u64,
}

impl ApiSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: None,
            ssl_verify: true,
            timeout_ms: TIMEOUT_API_REQUEST_MS,
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub product: Option<ProductLine>,
    pub inbound_api_key: Option<String>,
    pub host: String,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Result<Self, ToolError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable source so tests never need
    /// to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ToolError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let base_url = normalize_base_url(
            get("ACERTPIX_API_URL")
                .as_deref()
                .unwrap_or(DEFAULT_API_BASE_URL),
        )?;

        let credentials = match (get("ACERTPIX_CLIENT_ID"), get("ACERTPIX_CLIENT_SECRET")) {
            (Some(id), Some(secret)) => Some(Credentials::new(id, secret)),
            _ => None,
        };

        let timeout_ms = match get("ACERTPIX_TIMEOUT_MS") {
            None => TIMEOUT_API_REQUEST_MS,
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| {
                    ToolError::configuration(format!(
                        "ACERTPIX_TIMEOUT_MS must be a positive integer, got '{}'",
                        raw
                    ))
                })?,
        };

        let product = get("ACERTPIX_PRODUCT")
            .map(|raw| raw.parse::<ProductLine>())
            .transpose()
            .map_err(ToolError::configuration)?;

        let port = match get("PORT") {
            None => DEFAULT_HTTP_PORT,
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                ToolError::configuration(format!("PORT must be a valid port number, got '{}'", raw))
            })?,
        };

        Ok(Self {
            api: ApiSettings {
                base_url,
                credentials,
                ssl_verify: parse_flag(get("ACERTPIX_API_SSL_VERIFY").as_deref(), true),
                timeout_ms,
            },
            product,
            inbound_api_key: get("MCP_API_KEY"),
            host: get("HOST").unwrap_or_else(|| DEFAULT_HTTP_HOST.to_string()),
            port,
        })
    }
}

/// Validates the scheme and strips trailing slashes so that paths can be
/// appended verbatim.
pub fn normalize_base_url(raw: &str) -> Result<String, ToolError> {
    let parsed = url::Url::parse(raw.trim()).map_err(|err| {
        ToolError::configuration(format!("ACERTPIX_API_URL is not a valid URL: {}", err))
    })?;
    if !ALLOWED_HTTP.contains(&parsed.scheme()) {
        return Err(ToolError::configuration(format!(
            "ACERTPIX_API_URL must use http or https, got '{}'",
            parsed.scheme()
        ))
        .with_hint("Example: https://devapi.plataformaacertpix.com.br"));
    }
    Ok(raw.trim().trim_end_matches('/').to_string())
}
