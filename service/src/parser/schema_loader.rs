//! Schema loader for loading schemas from files

use biolink_toolkit_core::{
    error::{Result, ToolkitError},
    types::SchemaDefinition,
};
use std::path::{Path, PathBuf};
use tokio::fs;

use super::{ImportResolver, Parser, format_of};

/// Loader for schema documents on disk
#[derive(Default)]
pub struct SchemaLoader {
    parser: Parser,
    search_paths: Vec<PathBuf>,
}

impl SchemaLoader {
    /// Create a new schema loader
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Search these directories for imports, after the schema's own directory
    #[must_use]
    pub fn with_search_paths(mut self, search_paths: Vec<PathBuf>) -> Self {
        self.search_paths = search_paths;
        self
    }

    /// Load a schema from a file path and merge its imports
    ///
    /// # Errors
    ///
    /// Returns a `ToolkitError` if the file cannot be read or parsed, or if
    /// import resolution fails.
    pub async fn load_file(&self, path: impl AsRef<Path>) -> Result<SchemaDefinition> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).await.map_err(|e| {
            ToolkitError::IoError(std::io::Error::new(
                e.kind(),
                format!("Failed to read {}: {e}", path.display()),
            ))
        })?;

        let schema = self.parser.parse_str(&content, format_of(path)?)?;

        let mut resolver = ImportResolver::with_search_paths(Vec::new());
        if let Some(parent) = path.parent() {
            resolver.add_search_path(parent);
        }
        for search_path in &self.search_paths {
            resolver.add_search_path(search_path.clone());
        }

        tracing::debug!(
            path = %path.display(),
            imports = schema.imports.len(),
            "resolving schema imports"
        );

        tokio::task::spawn_blocking(move || resolver.resolve_imports(&schema))
            .await
            .map_err(|e| ToolkitError::import("imports", format!("import task failed: {e}")))?
    }
}
