//! JSON parser for schema documents

use biolink_toolkit_core::{
    error::{Result, ToolkitError},
    types::SchemaDefinition,
};

use super::SchemaParser;
use super::yaml_parser::fill_element_names;

/// `JSON` parser implementation
#[derive(Default)]
pub struct JsonParser;

impl JsonParser {
    /// Create a new `JSON` parser
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SchemaParser for JsonParser {
    fn parse_str(&self, content: &str) -> Result<SchemaDefinition> {
        let mut schema: SchemaDefinition = serde_json::from_str(content).map_err(|e| {
            ToolkitError::parse_at(
                format!("JSON parsing error: {e}"),
                format!("line {}, column {}", e.line(), e.column()),
            )
        })?;
        fill_element_names(&mut schema);
        Ok(schema)
    }
}
