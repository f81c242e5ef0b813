pub mod network {
    pub const DEFAULT_API_BASE_URL: &str = "https://devapi.plataformaacertpix.com.br";
    pub const TIMEOUT_API_REQUEST_MS: u64 = 30_000;
    pub const TIMEOUT_SCORE_SUBMIT_MS: u64 = 60_000;
    pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
    pub const DEFAULT_HTTP_PORT: u16 = 8000;
}

pub mod oauth {
    pub const TOKEN_PATH: &str = "/OAuth2/Token";
    pub const SCOPE: &str = "api";
    pub const GRANT_TYPE: &str = "client_credentials";
    pub const TOKEN_FIELD: &str = "access_token";
}

pub mod limits {
    pub const ERROR_BODY_PREVIEW_BYTES: usize = 2 * 1024;
    pub const LOG_STRING_MAX_BYTES: usize = 512;
    pub const BASE64_LOG_THRESHOLD: usize = 256;
}

pub mod protocols {
    pub const ALLOWED_HTTP: &[&str] = &["http", "https"];
}

pub mod mcp {
    pub const PROTOCOL_VERSION: &str = "2025-06-18";
    pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const API_KEY_HEADER: &str = "api-key";
}
