use crate::errors::ToolError;
use crate::mcp::envelope::ResultEnvelope;
use crate::products::{FieldKind, OperationKind};
use crate::services::api_client::ApiClient;
use crate::services::logger::Logger;
use crate::services::validation::Validation;
use serde_json::Value;
use std::sync::Arc;

/// Tool handler for one Acertpix operation.
#[derive(Clone)]
pub struct OperationManager {
    kind: OperationKind,
    logger: Logger,
    validation: Validation,
    client: Arc<ApiClient>,
}

impl OperationManager {
    pub fn new(
        kind: OperationKind,
        logger: Logger,
        validation: Validation,
        client: Arc<ApiClient>,
    ) -> Self {
        Self {
            kind,
            logger: logger.child(kind.name()),
            validation,
            client,
        }
    }

    /// Checks what the schema cannot: required strings must carry content.
    /// Runs before any file or network I/O.
    pub fn check_args(&self, args: &Value) -> Result<(), ToolError> {
        let spec = self.kind.spec();
        let obj = self.validation.ensure_object(args)?;
        for field in spec.fields {
            let value = obj.get(field.name);
            match (field.kind, field.required) {
                (FieldKind::Integer, true) => {
                    let value = value.ok_or_else(|| missing(spec.name, field.name))?;
                    self.validation.ensure_integer(value, field.name)?;
                }
                (FieldKind::Integer, false) => {
                    if let Some(value) = value.filter(|v| !v.is_null()) {
                        self.validation.ensure_integer(value, field.name)?;
                    }
                }
                (_, true) => {
                    let value = value.ok_or_else(|| missing(spec.name, field.name))?;
                    self.validation.ensure_string(value, field.name, true)?;
                }
                (_, false) => {
                    self.validation
                        .ensure_optional_string(value, field.name, true)?;
                }
            }
        }
        Ok(())
    }

    pub async fn handle_operation(&self, args: Value) -> Result<ResultEnvelope, ToolError> {
        self.check_args(&args)?;
        Ok(self.client.run(self.kind, &args).await)
    }
}

fn missing(tool: &str, field: &str) -> ToolError {
    ToolError::invalid_params(format!("{}: field '{}' is required", tool, field))
}

#[async_trait::async_trait]
impl crate::services::tool_executor::ToolHandler for OperationManager {
    async fn handle(&self, args: Value) -> Result<ResultEnvelope, ToolError> {
        self.logger.debug("handle_operation", Some(&args));
        self.handle_operation(args).await
    }
}
