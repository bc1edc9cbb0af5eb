//! Configuration types for the toolkit
//!
//! Everything schema-specific that the index needs but the schema itself
//! does not state lives here: which classes and slots act as hierarchy
//! roots, display prefixes, extra aliases and the implicit broad domains of
//! generic slots.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, ToolkitError};

/// Main configuration for the toolkit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Display naming configuration
    pub naming: NamingConfig,

    /// Hierarchy root sentinels
    pub roots: HierarchyRoots,

    /// Extra aliases (alias -> canonical name) on top of schema-declared ones
    pub aliases: IndexMap<String, String>,

    /// Classes implicitly added to the domain of generic slots
    pub implicit_domains: IndexMap<String, Vec<String>>,

    /// Domain used by slots whose hierarchy declares none
    pub default_domain: Option<String>,

    /// Value type reported for slots whose range is a class
    pub reference_value_type: Option<String>,

    /// Index construction options
    pub index: IndexConfig,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            naming: NamingConfig::default(),
            roots: HierarchyRoots::default(),
            aliases: IndexMap::new(),
            implicit_domains: IndexMap::new(),
            default_domain: None,
            reference_value_type: Some("uriorcurie".to_string()),
            index: IndexConfig::default(),
        }
    }
}

/// Display naming configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NamingConfig {
    /// Prefix for elements of the model itself
    pub prefix: String,

    /// Prefix for types imported from a metamodel type library
    pub type_prefix: String,

    /// Schema ids whose types are rendered with `type_prefix`
    pub metatype_schemas: Vec<String>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            prefix: "biolink".to_string(),
            type_prefix: "metatype".to_string(),
            metatype_schemas: vec!["https://w3id.org/linkml/types".to_string()],
        }
    }
}

/// Hierarchy root sentinels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HierarchyRoots {
    /// Class every class descends from
    pub root_class: Option<String>,

    /// Class whose descendants are categories
    pub category_root: Option<String>,

    /// Class whose descendants are associations
    pub association_root: Option<String>,

    /// Slot every predicate descends from
    pub root_predicate: Option<String>,
}

impl Default for HierarchyRoots {
    fn default() -> Self {
        Self {
            root_class: Some("entity".to_string()),
            category_root: Some("named thing".to_string()),
            association_root: Some("association".to_string()),
            root_predicate: Some("related to".to_string()),
        }
    }
}

impl HierarchyRoots {
    /// Roots with no sentinel configured
    #[must_use]
    pub const fn none() -> Self {
        Self {
            root_class: None,
            category_root: None,
            association_root: None,
            root_predicate: None,
        }
    }
}

/// Index construction options
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IndexConfig {
    /// Compute every descendant set at build time instead of on first use
    pub eager_descendants: bool,
}

impl ToolkitConfig {
    /// Parse a configuration from `YAML`
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::ConfigError` if the document is not a valid
    /// configuration.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| ToolkitError::config(format!("Invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::IoError` if the file cannot be read and
    /// `ToolkitError::ConfigError` if it is not a valid configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading toolkit configuration");
        Self::from_yaml_str(&content)
    }

    /// Check values that serde cannot check
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::ConfigError` naming the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.naming.prefix.trim().is_empty() {
            return Err(ToolkitError::config("naming.prefix must not be empty"));
        }
        if self.naming.type_prefix.trim().is_empty() {
            return Err(ToolkitError::config("naming.type_prefix must not be empty"));
        }
        if self.naming.prefix.contains(':') || self.naming.type_prefix.contains(':') {
            return Err(ToolkitError::config("prefixes must not contain ':'"));
        }
        for (alias, target) in &self.aliases {
            if alias.trim().is_empty() || target.trim().is_empty() {
                return Err(ToolkitError::config(format!(
                    "alias entry '{alias}' -> '{target}' is empty"
                )));
            }
        }
        for (slot, classes) in &self.implicit_domains {
            if classes.is_empty() {
                return Err(ToolkitError::config(format!(
                    "implicit_domains entry '{slot}' lists no classes"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ToolkitConfig::default();
        assert_eq!(config.naming.prefix, "biolink");
        assert_eq!(config.roots.category_root.as_deref(), Some("named thing"));
        assert_eq!(config.reference_value_type.as_deref(), Some("uriorcurie"));
        assert!(!config.index.eager_descendants);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() -> anyhow::Result<()> {
        let yaml = r"
naming:
  prefix: ex
aliases:
  locus: gene
implicit_domains:
  category: [entity]
index:
  eager_descendants: true
";
        let config = ToolkitConfig::from_yaml_str(yaml)?;
        assert_eq!(config.naming.prefix, "ex");
        assert_eq!(config.naming.type_prefix, "metatype");
        assert_eq!(config.aliases["locus"], "gene");
        assert_eq!(config.implicit_domains["category"], vec!["entity"]);
        assert!(config.index.eager_descendants);
        assert_eq!(config.roots, HierarchyRoots::default());
        Ok(())
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = ToolkitConfig::from_yaml_str("naming:\n  prefix: 'a:b'\n").unwrap_err();
        assert!(matches!(err, ToolkitError::ConfigError(_)));

        let err = ToolkitConfig::from_yaml_str("implicit_domains:\n  category: []\n").unwrap_err();
        assert!(err.to_string().contains("category"));
    }

    #[test]
    fn test_from_file() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "roots:\n  root_class: thing\n  root_predicate: null")?;
        let config = ToolkitConfig::from_file(file.path())?;
        assert_eq!(config.roots.root_class.as_deref(), Some("thing"));
        assert_eq!(config.roots.root_predicate, None);
        // Unmentioned roots keep their defaults
        assert_eq!(config.roots.association_root.as_deref(), Some("association"));
        Ok(())
    }
}
