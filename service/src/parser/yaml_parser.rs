//! YAML parser for schema documents

use biolink_toolkit_core::{
    error::{Result, ToolkitError},
    types::SchemaDefinition,
};

use super::SchemaParser;

/// `YAML` parser implementation
#[derive(Default)]
pub struct YamlParser;

impl YamlParser {
    /// Create a new `YAML` parser
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SchemaParser for YamlParser {
    fn parse_str(&self, content: &str) -> Result<SchemaDefinition> {
        let mut schema: SchemaDefinition = serde_yaml::from_str(content).map_err(|e| {
            ToolkitError::parse_at(
                format!("YAML parsing error: {e}"),
                e.location().map_or_else(
                    || "unknown location".to_string(),
                    |l| format!("line {}, column {}", l.line(), l.column()),
                ),
            )
        })?;
        fill_element_names(&mut schema);
        Ok(schema)
    }
}

/// Element maps are keyed by name; definitions may omit the `name` field
pub(crate) fn fill_element_names(schema: &mut SchemaDefinition) {
    for (key, class) in &mut schema.classes {
        if class.name.is_empty() {
            class.name.clone_from(key);
        }
    }
    for (key, slot) in &mut schema.slots {
        if slot.name.is_empty() {
            slot.name.clone_from(key);
        }
    }
    for (key, type_def) in &mut schema.types {
        if type_def.name.is_empty() {
            type_def.name.clone_from(key);
        }
    }
    for (key, enum_def) in &mut schema.enums {
        if enum_def.name.is_empty() {
            enum_def.name.clone_from(key);
        }
    }
}
