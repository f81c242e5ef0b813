pub mod api_client;
pub mod attachments;
pub mod credentials;
pub mod logger;
pub mod security;
pub mod tool_executor;
pub mod validation;
