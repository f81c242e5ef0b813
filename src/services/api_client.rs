use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use url::Url;

use crate::config::ApiSettings;
use crate::constants::limits::ERROR_BODY_PREVIEW_BYTES;
use crate::constants::oauth::{GRANT_TYPE, SCOPE, TOKEN_FIELD, TOKEN_PATH};
use crate::errors::UpstreamError;
use crate::mcp::envelope::ResultEnvelope;
use crate::products::{Action, FieldKind, FieldTarget, OperationKind, OperationSpec};
use crate::services::attachments::encode_attachment;
use crate::services::credentials::{AccessToken, Credentials};
use crate::services::logger::Logger;
use crate::utils::fs_atomic::atomic_write_bytes;
use crate::utils::redact::redact_text;
use crate::utils::user_paths::resolve_user_path;

/// Authenticated gateway to the Acertpix API.
///
/// Holds no tokens: every `run` performs its own token exchange followed by
/// exactly one upstream call. Only the connection pool is shared.
pub struct ApiClient {
    logger: Logger,
    http: Client,
    settings: ApiSettings,
}

impl ApiClient {
    pub fn new(logger: Logger, settings: ApiSettings) -> Result<Self, UpstreamError> {
        let mut builder = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("acertpix-mcp/", env!("CARGO_PKG_VERSION")));
        if !settings.ssl_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder.build().map_err(|err| {
            UpstreamError::Configuration(format!("failed to build HTTP client: {}", err))
        })?;
        Ok(Self {
            logger: logger.child("api"),
            http,
            settings,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.settings.base_url
    }

    fn token_url(&self) -> String {
        format!("{}{}", self.base_url().trim_end_matches('/'), TOKEN_PATH)
    }

    fn request_timeout(&self, spec: Option<&OperationSpec>) -> Duration {
        let default_ms = self.settings.timeout_ms;
        Duration::from_millis(spec.map_or(default_ms, |s| s.effective_timeout_ms(default_ms)))
    }

    /// Exchanges client credentials for a bearer token.
    pub async fn acquire_token(
        &self,
        credentials: &Credentials,
    ) -> Result<AccessToken, UpstreamError> {
        let url = self.token_url();
        let payload = serde_json::json!({
            "Scope": SCOPE,
            "GrantType": GRANT_TYPE,
            "ClientId": credentials.client_id(),
            "ClientSecret": credentials.client_secret(),
        });
        self.logger.debug(
            "Requesting access token",
            Some(&serde_json::json!({"url": url, "client_id": credentials.client_id()})),
        );

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(&payload)
            .timeout(self.request_timeout(None))
            .send()
            .await
            .map_err(|err| UpstreamError::network(&url, err))?;
        let status = response.status();
        self.logger.info(
            "Token endpoint responded",
            Some(&serde_json::json!({"status": status.as_u16()})),
        );
        if is_failure(status) {
            return Err(status_error(&url, status, response).await);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| UpstreamError::parse(&url, format!("token response is not JSON: {}", err)))?;
        body.get(TOKEN_FIELD)
            .and_then(Value::as_str)
            .filter(|token| !token.trim().is_empty())
            .map(AccessToken::new)
            .ok_or_else(|| {
                UpstreamError::parse(
                    &url,
                    format!("token response has no '{}' field", TOKEN_FIELD),
                )
            })
    }

    /// Performs the upstream call for an already validated invocation.
    /// Never fails: every outcome is rendered into an envelope.
    pub async fn invoke(
        &self,
        kind: OperationKind,
        token: &AccessToken,
        args: &Value,
    ) -> ResultEnvelope {
        let spec = kind.spec();
        match self.execute(spec, token, args).await {
            Ok(resultado) => ResultEnvelope::success(spec.name, resultado),
            Err(err) => self.failure(spec, &err),
        }
    }

    /// Full per-call pipeline: credentials, token exchange, upstream call.
    pub async fn run(&self, kind: OperationKind, args: &Value) -> ResultEnvelope {
        let spec = kind.spec();
        let outcome = match spec.action {
            Action::IssueToken => self.issue_token(args).await,
            _ => self.authenticated(spec, args).await,
        };
        match outcome {
            Ok(resultado) => {
                self.logger.info(
                    "Operation succeeded",
                    Some(&serde_json::json!({"operation": spec.name})),
                );
                ResultEnvelope::success(spec.name, resultado)
            }
            Err(err) => self.failure(spec, &err),
        }
    }

    async fn authenticated(
        &self,
        spec: &OperationSpec,
        args: &Value,
    ) -> Result<Value, UpstreamError> {
        let credentials = self.settings.credentials.as_ref().ok_or_else(|| {
            UpstreamError::Configuration(
                "ACERTPIX_CLIENT_ID and ACERTPIX_CLIENT_SECRET must be set".to_string(),
            )
        })?;
        let token = self.acquire_token(credentials).await?;
        self.execute(spec, &token, args).await
    }

    async fn issue_token(&self, args: &Value) -> Result<Value, UpstreamError> {
        let (Some(client_id), Some(client_secret)) =
            (arg_text(args, "client_id"), arg_text(args, "client_secret"))
        else {
            return Err(UpstreamError::Configuration(
                "client_id and client_secret are required".to_string(),
            ));
        };
        let token = self
            .acquire_token(&Credentials::new(client_id, client_secret))
            .await?;
        Ok(token_payload(token.expose()))
    }

    async fn execute(
        &self,
        spec: &OperationSpec,
        token: &AccessToken,
        args: &Value,
    ) -> Result<Value, UpstreamError> {
        if spec.action == Action::IssueToken {
            return Ok(token_payload(token.expose()));
        }

        let url = self.endpoint_url(spec, args)?;
        let (method, accept) = match spec.action {
            Action::Submit => (Method::POST, "application/json"),
            Action::DownloadPdf { .. } => (Method::GET, "application/pdf"),
            _ => (Method::GET, "application/json"),
        };
        self.logger.info(
            "Calling upstream",
            Some(&serde_json::json!({
                "operation": spec.name,
                "method": method.as_str(),
                "url": url.as_str(),
            })),
        );

        let mut request = self
            .http
            .request(method, url.clone())
            .bearer_auth(token.expose())
            .header(ACCEPT, accept)
            .timeout(self.request_timeout(Some(spec)));
        if spec.action == Action::Submit {
            let body = self.build_body(spec, args).await;
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|err| UpstreamError::network(url.as_str(), err))?;
        let status = response.status();
        self.logger.info(
            "Upstream responded",
            Some(&serde_json::json!({"operation": spec.name, "status": status.as_u16()})),
        );
        if is_failure(status) {
            return Err(status_error(url.as_str(), status, response).await);
        }

        match spec.action {
            Action::DownloadPdf { file_name } => {
                self.save_document(spec, file_name, args, url.as_str(), response)
                    .await
            }
            _ => read_payload(url.as_str(), response).await,
        }
    }

    pub(crate) fn endpoint_url(
        &self,
        spec: &OperationSpec,
        args: &Value,
    ) -> Result<Url, UpstreamError> {
        let base = self.base_url().trim_end_matches('/');
        let mut url = Url::parse(base).map_err(|err| {
            UpstreamError::Configuration(format!("invalid base URL '{}': {}", base, err))
        })?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                UpstreamError::Configuration(format!("base URL '{}' cannot carry a path", base))
            })?;
            segments.pop_if_empty();
            for segment in spec.path.split('/').filter(|s| !s.is_empty()) {
                match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Some(name) => {
                        segments.push(&arg_text(args, name).unwrap_or_default());
                    }
                    None => {
                        segments.push(segment);
                    }
                }
            }
        }

        let query: Vec<(&str, String)> = spec
            .fields
            .iter()
            .filter(|f| {
                matches!(
                    f.target,
                    FieldTarget::Query | FieldTarget::Template { also_query: true }
                )
            })
            .filter_map(|f| arg_text(args, f.name).map(|value| (f.wire, value)))
            .collect();
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Absent optional fields are sent as empty strings.
    pub(crate) async fn build_body(&self, spec: &OperationSpec, args: &Value) -> Value {
        let mut body = Map::new();
        for field in spec.fields.iter().filter(|f| f.target == FieldTarget::Body) {
            let value = match field.kind {
                FieldKind::Attachment => match arg_text(args, field.name) {
                    Some(path) => Value::String(encode_attachment(&path, &self.logger).await),
                    None => Value::String(String::new()),
                },
                FieldKind::Integer => args
                    .get(field.name)
                    .filter(|v| v.is_i64() || v.is_u64())
                    .cloned()
                    .unwrap_or(Value::Null),
                FieldKind::Text | FieldKind::Directory => {
                    Value::String(arg_text(args, field.name).unwrap_or_default())
                }
            };
            body.insert(field.wire.to_string(), value);
        }
        Value::Object(body)
    }

    async fn save_document(
        &self,
        spec: &OperationSpec,
        file_name: &str,
        args: &Value,
        url: &str,
        response: Response,
    ) -> Result<Value, UpstreamError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|err| UpstreamError::network(url, err))?;

        let directory = spec
            .fields
            .iter()
            .find(|f| f.kind == FieldKind::Directory)
            .and_then(|f| arg_text(args, f.name))
            .ok_or_else(|| UpstreamError::Io {
                path: String::new(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "no target directory given",
                ),
            })?;
        let mut name = file_name.to_string();
        for field in spec.fields {
            let placeholder = format!("{{{}}}", field.name);
            if name.contains(&placeholder) {
                name = name.replace(&placeholder, &arg_text(args, field.name).unwrap_or_default());
            }
        }
        let target = resolve_user_path(directory.trim()).join(name);
        let target_display = target.display().to_string();

        atomic_write_bytes(&target, &bytes)
            .await
            .map_err(|source| UpstreamError::Io {
                path: target_display.clone(),
                source,
            })?;
        self.logger.info(
            "Document saved",
            Some(&serde_json::json!({"path": target_display, "bytes": bytes.len()})),
        );

        Ok(serde_json::json!({
            "arquivo": target_display,
            "bytes": bytes.len(),
            "sha256": hex::encode(Sha256::digest(&bytes)),
        }))
    }

    fn failure(&self, spec: &OperationSpec, err: &UpstreamError) -> ResultEnvelope {
        self.logger.error(
            "Operation failed",
            Some(&serde_json::json!({
                "operation": spec.name,
                "stage": err.stage(),
                "status": err.status_code(),
                "error": err.to_string(),
            })),
        );
        ResultEnvelope::error(
            spec.name,
            format!("{}: {}", spec.name, err),
            self.base_url(),
        )
    }
}

fn token_payload(token: &str) -> Value {
    let mut map = Map::new();
    map.insert(TOKEN_FIELD.to_string(), Value::String(token.to_string()));
    Value::Object(map)
}

fn is_failure(status: StatusCode) -> bool {
    status.is_client_error() || status.is_server_error()
}

/// Reads at most the preview window of an error body; the rest is never
/// buffered.
async fn status_error(url: &str, status: StatusCode, mut response: Response) -> UpstreamError {
    let mut preview: Vec<u8> = Vec::new();
    while preview.len() < ERROR_BODY_PREVIEW_BYTES {
        match response.chunk().await {
            Ok(Some(chunk)) => preview.extend_from_slice(&chunk),
            _ => break,
        }
    }
    let body = String::from_utf8_lossy(&preview);
    UpstreamError::UpstreamStatus {
        url: url.to_string(),
        status: status.as_u16(),
        body: redact_text(&body, ERROR_BODY_PREVIEW_BYTES),
    }
}

/// JSON when the body parses, raw text otherwise, `null` when empty.
async fn read_payload(url: &str, response: Response) -> Result<Value, UpstreamError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|err| UpstreamError::network(url, err))?;
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned())))
}

/// Non-blank argument as sent by the caller; whitespace only decides
/// blankness.
fn arg_text(args: &Value, name: &str) -> Option<String> {
    match args.get(name)? {
        Value::String(text) => (!text.trim().is_empty()).then(|| text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
