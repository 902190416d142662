use super::declare::FormalParam;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Argument schema of a tool: a JSON object schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: IndexMap<String, PropertyDescriptor>,
    pub required: Vec<String>,
}

impl Default for ArgumentSchema {
    fn default() -> Self {
        Self { schema_type: "object".to_string(), properties: IndexMap::new(), required: Vec::new() }
    }
}

impl ArgumentSchema {
    pub fn is_required(&self, name: &str) -> bool { self.required.iter().any(|r| r == name) }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"type": "object"}))
    }
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub description: Option<String>,
    pub format: Option<String>,
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Builds the argument schema from a method's formal parameters.
///
/// Only parameters carrying property metadata are included, in declaration
/// order. A parameter is required unless its metadata says otherwise.
pub fn generate_schema(params: &[FormalParam]) -> ArgumentSchema {
    let mut schema = ArgumentSchema::default();
    for formal in params {
        let Some(property) = formal.param.property.as_ref() else { continue };
        let name = if property.name.is_empty() { formal.param.ident.clone() } else { property.name.clone() };
        let descriptor = PropertyDescriptor {
            schema_type: formal.kind.schema_type().to_string(),
            description: non_empty(&property.description),
            format: non_empty(&property.format),
        };
        if property.required && !schema.is_required(&name) {
            schema.required.push(name.clone());
        }
        schema.properties.insert(name, descriptor);
    }
    schema
}
