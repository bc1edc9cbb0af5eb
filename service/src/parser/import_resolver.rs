//! Import resolution for schema documents

use biolink_toolkit_core::{
    error::{Result, ToolkitError},
    types::SchemaDefinition,
};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::Parser;

const DEFAULT_MAX_DEPTH: usize = 10;

/// Import resolver for handling schema imports
#[derive(Debug, Clone)]
pub struct ImportResolver {
    /// Cache of parsed imports, keyed by file path
    cache: Arc<RwLock<HashMap<PathBuf, SchemaDefinition>>>,
    /// Search paths for imports
    search_paths: Vec<PathBuf>,
    /// Maximum import depth to prevent infinite recursion
    max_depth: usize,
}

impl Default for ImportResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportResolver {
    /// Create a new import resolver searching the working directory
    #[must_use]
    pub fn new() -> Self {
        Self::with_search_paths(vec![PathBuf::from(".")])
    }

    /// Create with specific search paths
    #[must_use]
    pub fn with_search_paths(search_paths: Vec<PathBuf>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            search_paths,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Add a search path, keeping earlier paths first
    pub fn add_search_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.search_paths.contains(&path) {
            self.search_paths.push(path);
        }
    }

    /// Limit how deep imports may nest
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Resolve all imports in a schema, returning a merged schema
    ///
    /// Imported elements keep their own `from_schema`, or receive the id of
    /// the schema that defined them. Every schema is merged at most once; an
    /// import that leads back to an already merged schema, the root
    /// included, is skipped.
    ///
    /// # Errors
    ///
    /// Returns a `ToolkitError` if:
    /// - An import cannot be found or parsed
    /// - Maximum import depth is exceeded
    /// - An imported element is already defined
    pub fn resolve_imports(&self, schema: &SchemaDefinition) -> Result<SchemaDefinition> {
        let mut merged = schema.clone();
        let mut visited: HashSet<String> = [&schema.name, &schema.id]
            .into_iter()
            .filter(|key| !key.is_empty())
            .cloned()
            .collect();
        self.resolve_recursive(&mut merged, &schema.imports, None, &mut visited, 0)?;
        Ok(merged)
    }

    fn resolve_recursive(
        &self,
        target: &mut SchemaDefinition,
        imports: &[String],
        importer_dir: Option<&Path>,
        visited: &mut HashSet<String>,
        depth: usize,
    ) -> Result<()> {
        if imports.is_empty() {
            return Ok(());
        }
        if depth > self.max_depth {
            return Err(ToolkitError::import(
                "imports",
                format!("Maximum import depth ({}) exceeded", self.max_depth),
            ));
        }

        for import in imports {
            if !visited.insert(import.clone()) {
                continue;
            }

            let (path, imported) = self.load_import(import, importer_dir)?;
            if !imported.id.is_empty() && !visited.insert(imported.id.clone()) {
                tracing::debug!(import = %import, id = %imported.id, "schema already merged");
                continue;
            }
            tracing::debug!(import = %import, id = %imported.id, "merging imported schema");

            Self::merge_schema(target, &imported)?;
            self.resolve_recursive(target, &imported.imports, path.parent(), visited, depth + 1)?;
        }

        Ok(())
    }

    fn load_import(
        &self,
        import: &str,
        importer_dir: Option<&Path>,
    ) -> Result<(PathBuf, SchemaDefinition)> {
        let path = self.find_import_file(import, importer_dir)?;
        if let Some(schema) = self.cache.read().get(&path) {
            return Ok((path, schema.clone()));
        }

        let schema = Parser::new().parse_file(&path)?;
        self.cache.write().insert(path.clone(), schema.clone());
        Ok((path, schema))
    }

    /// Find the file for an import; `prefix:name` imports use the local part
    ///
    /// The importing file's directory is searched before the configured
    /// search paths.
    fn find_import_file(&self, import: &str, importer_dir: Option<&Path>) -> Result<PathBuf> {
        let local = import.rsplit_once(':').map_or(import, |(_, local)| local);
        let extensions = ["yaml", "yml", "json"];

        let search_paths = importer_dir
            .into_iter()
            .chain(self.search_paths.iter().map(PathBuf::as_path));

        for search_path in search_paths {
            for ext in &extensions {
                let path = search_path.join(format!("{local}.{ext}"));
                if path.exists() {
                    return Ok(path);
                }
            }

            let path = search_path.join(local);
            if Path::new(local).extension().is_some() && path.exists() {
                return Ok(path);
            }
        }

        Err(ToolkitError::import(
            import,
            format!(
                "Import file not found in search paths: {:?}",
                self.search_paths
            ),
        ))
    }

    /// Merge an imported schema into the current schema
    fn merge_schema(target: &mut SchemaDefinition, source: &SchemaDefinition) -> Result<()> {
        let origin = (!source.id.is_empty()).then(|| source.id.clone());

        for (prefix, expansion) in &source.prefixes {
            target
                .prefixes
                .entry(prefix.clone())
                .or_insert_with(|| expansion.clone());
        }

        if target.default_range.is_none() {
            target.default_range.clone_from(&source.default_range);
        }

        for (name, class) in &source.classes {
            if target.classes.contains_key(name) {
                return Err(duplicate(target, "Class", name));
            }
            let mut class = class.clone();
            if class.from_schema.is_none() {
                class.from_schema.clone_from(&origin);
            }
            target.classes.insert(name.clone(), class);
        }

        for (name, slot) in &source.slots {
            if target.slots.contains_key(name) {
                return Err(duplicate(target, "Slot", name));
            }
            let mut slot = slot.clone();
            if slot.from_schema.is_none() {
                slot.from_schema.clone_from(&origin);
            }
            target.slots.insert(name.clone(), slot);
        }

        for (name, type_def) in &source.types {
            if target.types.contains_key(name) {
                return Err(duplicate(target, "Type", name));
            }
            let mut type_def = type_def.clone();
            if type_def.from_schema.is_none() {
                type_def.from_schema.clone_from(&origin);
            }
            target.types.insert(name.clone(), type_def);
        }

        for (name, enum_def) in &source.enums {
            if target.enums.contains_key(name) {
                return Err(duplicate(target, "Enum", name));
            }
            let mut enum_def = enum_def.clone();
            if enum_def.from_schema.is_none() {
                enum_def.from_schema.clone_from(&origin);
            }
            target.enums.insert(name.clone(), enum_def);
        }

        Ok(())
    }
}

fn duplicate(target: &SchemaDefinition, kind: &str, name: &str) -> ToolkitError {
    ToolkitError::import(&target.name, format!("{kind} '{name}' already defined"))
}
