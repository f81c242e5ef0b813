use crate::errors::ToolError;
use serde_json::{Map, Value};

#[derive(Clone, Default)]
pub struct Validation;

impl Validation {
    pub fn new() -> Self {
        Self
    }

    pub fn ensure_object<'a>(&self, value: &'a Value) -> Result<&'a Map<String, Value>, ToolError> {
        value
            .as_object()
            .ok_or_else(|| ToolError::invalid_params("Arguments must be an object"))
    }

    pub fn ensure_string(
        &self,
        value: &Value,
        label: &str,
        trim: bool,
    ) -> Result<String, ToolError> {
        let text = value.as_str().ok_or_else(|| {
            ToolError::invalid_params(format!("{} must be a non-empty string", label))
        })?;
        let normalized = text.trim();
        if normalized.is_empty() {
            return Err(ToolError::invalid_params(format!(
                "{} must be a non-empty string",
                label
            )));
        }
        Ok(if trim {
            normalized.to_string()
        } else {
            text.to_string()
        })
    }

    pub fn ensure_optional_string(
        &self,
        value: Option<&Value>,
        label: &str,
        trim: bool,
    ) -> Result<Option<String>, ToolError> {
        match value {
            None => Ok(None),
            Some(val) if val.is_null() => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(val) => self.ensure_string(val, label, trim).map(Some),
        }
    }

    pub fn ensure_integer(&self, value: &Value, label: &str) -> Result<i64, ToolError> {
        value
            .as_i64()
            .ok_or_else(|| ToolError::invalid_params(format!("{} must be an integer", label)))
    }
}
