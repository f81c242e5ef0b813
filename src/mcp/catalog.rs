use crate::errors::ToolError;
use crate::products::{FieldKind, OperationKind, ProductLine};
use jsonschema::JSONSchema;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

static TOOL_VALIDATORS: Lazy<HashMap<OperationKind, JSONSchema>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for kind in OperationKind::ALL {
        if let Ok(schema) = JSONSchema::compile(&input_schema_for(kind)) {
            map.insert(kind, schema);
        }
    }
    map
});

/// JSON schema derived from the operation's field table.
pub fn input_schema_for(kind: OperationKind) -> Value {
    let spec = kind.spec();
    let mut properties = Map::new();
    for field in spec.fields {
        let mut prop = Map::new();
        prop.insert("type".to_string(), Value::from(field.json_type()));
        let description = match field.kind {
            FieldKind::Attachment => format!("{} (local file path, sent as base64)", field.description),
            FieldKind::Directory => format!("{} (local directory)", field.description),
            _ => field.description.to_string(),
        };
        prop.insert("description".to_string(), Value::String(description));
        properties.insert(field.name.to_string(), Value::Object(prop));
    }
    let required: Vec<Value> = spec
        .required_fields()
        .map(|f| Value::from(f.name))
        .collect();
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

pub fn tool_def(kind: OperationKind) -> ToolDef {
    let spec = kind.spec();
    ToolDef {
        name: spec.name.to_string(),
        description: spec.description.to_string(),
        input_schema: input_schema_for(kind),
    }
}

pub fn list_tools(product: ProductLine) -> Vec<ToolDef> {
    product.operations().into_iter().map(tool_def).collect()
}

pub fn validate_tool_args(tool_name: &str, args: &Value) -> Result<(), ToolError> {
    let Some(kind) = OperationKind::from_name(tool_name) else {
        return Ok(());
    };
    let Some(schema) = TOOL_VALIDATORS.get(&kind) else {
        return Ok(());
    };
    if let Err(errors) = schema.validate(args) {
        let message = format_schema_errors(tool_name, errors);
        return Err(ToolError::invalid_params(message));
    }
    Ok(())
}

fn format_schema_errors(tool_name: &str, errors: jsonschema::ErrorIterator) -> String {
    let mut lines = vec![format!("Invalid arguments for {}", tool_name)];
    for err in errors.take(10) {
        let instance_path = if err.instance_path.to_string().is_empty() {
            "(root)".to_string()
        } else {
            err.instance_path.to_string()
        };
        let line = match &err.kind {
            jsonschema::error::ValidationErrorKind::Required { property } => {
                let prop = property
                    .as_str()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| property.to_string());
                format!("{}: missing required field '{}'", instance_path, prop)
            }
            jsonschema::error::ValidationErrorKind::Type { kind } => {
                format!("{}: expected {}", instance_path, format_type_kind(kind))
            }
            _ => format!("{}: {}", instance_path, err),
        };
        lines.push(format!("- {}", line));
    }
    lines.join("\n")
}

fn format_type_kind(kind: &jsonschema::error::TypeKind) -> String {
    match kind {
        jsonschema::error::TypeKind::Single(primitive) => primitive.to_string(),
        jsonschema::error::TypeKind::Multiple(types) => {
            let list: Vec<String> = (*types).into_iter().map(|t| t.to_string()).collect();
            if list.is_empty() {
                "unknown".to_string()
            } else {
                list.join(" | ")
            }
        }
    }
}
