use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::services::logger::Logger;
use crate::utils::user_paths::resolve_user_path;

/// Reads a local file and returns its content as standard base64.
///
/// Unreadable files yield an empty string and a warning: the upstream API
/// reports a missing image better than we can, and the call still goes out.
pub async fn encode_attachment(raw_path: &str, logger: &Logger) -> String {
    let path = resolve_user_path(raw_path.trim());
    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            logger.debug(
                "Attachment encoded",
                Some(&serde_json::json!({"path": path.display().to_string(), "bytes": bytes.len()})),
            );
            STANDARD.encode(bytes)
        }
        Err(err) => {
            logger.warn(
                "Attachment could not be read, sending empty content",
                Some(&serde_json::json!({
                    "path": path.display().to_string(),
                    "error": err.to_string(),
                })),
            );
            String::new()
        }
    }
}
