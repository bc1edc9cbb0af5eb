//! Schema provider: parsing schema documents from YAML and JSON
//!
//! The index consumes a fully merged [`SchemaDefinition`]; this module is
//! the thin provider that produces one from files on disk.

use biolink_toolkit_core::{
    error::{Result, ToolkitError},
    types::SchemaDefinition,
};
use std::path::Path;

pub mod import_resolver;
pub mod json_parser;
pub mod schema_loader;
pub mod yaml_parser;

pub use import_resolver::ImportResolver;
pub use json_parser::JsonParser;
pub use schema_loader::SchemaLoader;
pub use yaml_parser::YamlParser;

/// Trait for schema parsers
pub trait SchemaParser: Send + Sync {
    /// Parse schema from string content
    ///
    /// # Errors
    ///
    /// Returns a `ToolkitError` if parsing fails
    fn parse_str(&self, content: &str) -> Result<SchemaDefinition>;

    /// Parse schema from file
    ///
    /// # Errors
    ///
    /// Returns a `ToolkitError` if:
    /// - File cannot be read
    /// - Parsing fails
    fn parse_file(&self, path: &Path) -> Result<SchemaDefinition> {
        let content = std::fs::read_to_string(path)?;

        self.parse_str(&content).map_err(|e| match e {
            ToolkitError::ParseError { message, location } => ToolkitError::ParseError {
                message: format!("{message} in file {}", path.display()),
                location,
            },
            other => other,
        })
    }
}

/// Main parser that delegates to format-specific parsers
#[derive(Default)]
pub struct Parser {
    yaml: YamlParser,
    json: JsonParser,
}

impl Parser {
    /// Create a new parser
    #[must_use]
    pub const fn new() -> Self {
        Self {
            yaml: YamlParser::new(),
            json: JsonParser::new(),
        }
    }

    /// Parse schema from file, detecting format from extension
    ///
    /// # Errors
    ///
    /// Returns a `ToolkitError` if:
    /// - File has no extension
    /// - File format is not supported
    /// - Parsing fails
    pub fn parse_file(&self, path: &Path) -> Result<SchemaDefinition> {
        let extension = format_of(path)?;
        match extension {
            "yaml" | "yml" => self.yaml.parse_file(path),
            "json" => self.json.parse_file(path),
            _ => Err(ToolkitError::parse(format!(
                "Unsupported file format: {extension}"
            ))),
        }
    }

    /// Parse schema from string with specified format
    ///
    /// # Errors
    ///
    /// Returns a `ToolkitError` if:
    /// - Format is not supported
    /// - Parsing fails
    pub fn parse_str(&self, content: &str, format: &str) -> Result<SchemaDefinition> {
        match format {
            "yaml" | "yml" => self.yaml.parse_str(content),
            "json" => self.json.parse_str(content),
            _ => Err(ToolkitError::parse(format!("Unsupported format: {format}"))),
        }
    }
}

/// Format name taken from a file extension
pub(crate) fn format_of(path: &Path) -> Result<&str> {
    path.extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ToolkitError::parse(format!("No file extension found: {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_format() -> anyhow::Result<()> {
        let parser = Parser::new();
        let from_yaml = parser.parse_str("id: x\nname: test\n", "yml")?;
        let from_json = parser.parse_str(r#"{"id": "x", "name": "test"}"#, "json")?;
        assert_eq!(from_yaml, from_json);

        let err = parser.parse_str("", "ttl").unwrap_err();
        assert!(err.to_string().contains("Unsupported format: ttl"));
        Ok(())
    }

    #[test]
    fn test_missing_extension() {
        let err = Parser::new().parse_file(Path::new("schema")).unwrap_err();
        assert!(matches!(err, ToolkitError::ParseError { .. }));
    }
}
