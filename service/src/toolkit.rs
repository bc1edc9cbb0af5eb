//! # Toolkit
//!
//! Query facade over a [`SchemaIndex`].
//!
//! Every operation takes a raw name (any case, underscores or spaces, an
//! alias, or a formatted `biolink:` name), resolves it, runs the query and
//! optionally formats the result:
//!
//! ```text
//! "Gene_Or_Gene_Product" ─► resolve ─► ElementId ─► closure / domain-range
//!                                                         │
//!                        Vec<String> ◄─ format (optional) ◄┘
//! ```
//!
//! Collection queries never fail: an unknown name, or a name of the wrong
//! kind for the query, yields an empty result (logged at `debug`). Use
//! [`Toolkit::index`] for the `Result` forms.
//!
//! ```rust,no_run
//! use biolink_toolkit::Toolkit;
//! use biolink_toolkit_core::ToolkitConfig;
//!
//! # async fn example() -> biolink_toolkit_core::Result<()> {
//! let toolkit = Toolkit::load("biolink-model.yaml", ToolkitConfig::default()).await?;
//!
//! let ancestors = toolkit.get_ancestors("gene", false, true);
//! assert!(ancestors.contains(&"biolink:NamedThing".to_string()));
//! # Ok(())
//! # }
//! ```

use biolink_toolkit_core::{
    config::ToolkitConfig,
    error::{Result, ToolkitError},
    name::ElementName,
    types::{Element, ElementKind, SchemaDefinition},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::index::{ElementId, SchemaIndex};
use crate::parser::{ImportResolver, Parser, SchemaLoader};

/// Cheaply cloneable handle to a built schema index
///
/// Shares one immutable index; clones can be sent to other threads.
#[repr(transparent)]
#[derive(Debug, Clone)]
pub struct Toolkit {
    inner: Arc<SchemaIndex>,
}

impl Toolkit {
    /// Build a toolkit over an already loaded schema
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::SchemaDefects` or `ToolkitError::ConfigError`
    /// if the index cannot be built.
    pub fn new(schema: &SchemaDefinition, config: ToolkitConfig) -> Result<Self> {
        SchemaIndex::build(schema, config).map(Self::from_index)
    }

    /// Wrap an existing index
    #[must_use]
    pub fn from_index(index: SchemaIndex) -> Self {
        Self {
            inner: Arc::new(index),
        }
    }

    /// Load a schema file with its imports and build the index
    ///
    /// # Errors
    ///
    /// Returns a `ToolkitError` if the file cannot be read, parsed or have its
    /// imports resolved, or if the index cannot be built.
    pub async fn load(path: impl AsRef<Path>, config: ToolkitConfig) -> Result<Self> {
        let schema = SchemaLoader::new().load_file(path).await?;
        tokio::task::spawn_blocking(move || Self::new(&schema, config))
            .await
            .map_err(|e| ToolkitError::IoError(std::io::Error::other(e)))?
    }

    /// Blocking variant of [`Toolkit::load`]
    ///
    /// # Errors
    ///
    /// Same as [`Toolkit::load`].
    pub fn from_file(path: impl AsRef<Path>, config: ToolkitConfig) -> Result<Self> {
        let path = path.as_ref();
        let schema = Parser::new().parse_file(path)?;
        let search_paths = path
            .parent()
            .map(Path::to_path_buf)
            .into_iter()
            .collect::<Vec<PathBuf>>();
        let schema = ImportResolver::with_search_paths(search_paths).resolve_imports(&schema)?;
        Self::new(&schema, config)
    }

    /// The underlying index
    #[must_use]
    pub fn index(&self) -> &SchemaIndex {
        &self.inner
    }

    /// Canonical name for any accepted spelling of an element
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<ElementName> {
        self.inner.resolve(name).map(|id| self.inner.name(id).clone())
    }

    /// Display form of an element's name
    #[must_use]
    pub fn format_name(&self, name: &str) -> Option<String> {
        self.inner.resolve(name).map(|id| self.inner.display_name(id))
    }

    /// Element record, if the name resolves
    #[must_use]
    pub fn get_element(&self, name: &str) -> Option<Element> {
        self.inner
            .resolve(name)
            .map(|id| self.inner.element(id).clone())
    }

    /// Every element: classes, slots, types, then enums
    #[must_use]
    pub fn get_all_elements(&self, formatted: bool) -> Vec<String> {
        self.render(self.inner.all_elements(), formatted)
    }

    /// Every class
    #[must_use]
    pub fn get_all_classes(&self, formatted: bool) -> Vec<String> {
        self.render(self.inner.all_of_kind(ElementKind::Class), formatted)
    }

    /// Every slot
    #[must_use]
    pub fn get_all_slots(&self, formatted: bool) -> Vec<String> {
        self.render(self.inner.all_of_kind(ElementKind::Slot), formatted)
    }

    /// Every type
    #[must_use]
    pub fn get_all_types(&self, formatted: bool) -> Vec<String> {
        self.render(self.inner.all_of_kind(ElementKind::Type), formatted)
    }

    /// Classes under the root class that are not associations
    #[must_use]
    pub fn get_all_entities(&self, formatted: bool) -> Vec<String> {
        self.render(self.inner.entities().iter().copied(), formatted)
    }

    /// Classes under the association root
    #[must_use]
    pub fn get_all_associations(&self, formatted: bool) -> Vec<String> {
        self.render(self.inner.associations().iter().copied(), formatted)
    }

    /// Non-predicate slots with an entity domain
    #[must_use]
    pub fn get_all_node_properties(&self, formatted: bool) -> Vec<String> {
        self.render(self.inner.node_properties().iter().copied(), formatted)
    }

    /// Non-predicate slots with an association domain
    #[must_use]
    pub fn get_all_edge_properties(&self, formatted: bool) -> Vec<String> {
        self.render(self.inner.edge_properties().iter().copied(), formatted)
    }

    /// Every predicate slot
    #[must_use]
    pub fn get_all_predicates(&self, formatted: bool) -> Vec<String> {
        self.render(self.inner.predicates().iter().copied(), formatted)
    }

    /// Whether the name is a class under the category root
    #[must_use]
    pub fn is_category(&self, name: &str) -> bool {
        self.inner
            .resolve(name)
            .is_some_and(|id| self.inner.is_category(id))
    }

    /// Whether the name is a predicate slot
    #[must_use]
    pub fn is_predicate(&self, name: &str) -> bool {
        self.inner
            .resolve(name)
            .is_some_and(|id| self.inner.is_predicate(id))
    }

    /// Ancestors nearest first; `reflexive` puts the element itself first
    #[must_use]
    pub fn get_ancestors(&self, name: &str, reflexive: bool, formatted: bool) -> Vec<String> {
        self.query("ancestors", name, formatted, |index, id| {
            Ok(index.ancestors(id, reflexive))
        })
    }

    /// Descendants nearest first; `reflexive` puts the element itself first
    #[must_use]
    pub fn get_descendants(&self, name: &str, reflexive: bool, formatted: bool) -> Vec<String> {
        self.query("descendants", name, formatted, |index, id| {
            Ok(index.descendants(id, reflexive))
        })
    }

    /// Direct parents: is-a, then mixins
    #[must_use]
    pub fn get_parent(&self, name: &str, formatted: bool) -> Vec<String> {
        self.query("parent", name, formatted, |index, id| {
            Ok(index.parents(id).to_vec())
        })
    }

    /// Direct children
    #[must_use]
    pub fn get_children(&self, name: &str, formatted: bool) -> Vec<String> {
        self.query("children", name, formatted, |index, id| {
            Ok(index.children(id).to_vec())
        })
    }

    /// Elements declaring any kind of mapping to an external identifier
    ///
    /// The identifier must match exactly, including case.
    #[must_use]
    pub fn get_all_elements_by_mapping(&self, identifier: &str, formatted: bool) -> Vec<String> {
        self.render(
            self.inner.elements_for_mapping(identifier).iter().copied(),
            formatted,
        )
    }

    /// Classes a slot applies to, after inheritance along the slot hierarchy
    ///
    /// With `include_ancestors`, every ancestor of those classes is added.
    #[must_use]
    pub fn get_slot_domain(
        &self,
        slot: &str,
        include_ancestors: bool,
        formatted: bool,
    ) -> Vec<String> {
        self.query("slot_domain", slot, formatted, |index, id| {
            index.slot_domain(id, include_ancestors)
        })
    }

    /// Range of a slot, falling back to the schema default range
    #[must_use]
    pub fn get_slot_range(&self, slot: &str, include_ancestors: bool, formatted: bool) -> Vec<String> {
        self.query("slot_range", slot, formatted, |index, id| {
            index.slot_range(id, include_ancestors)
        })
    }

    /// Slots whose domain is the class, or one of its ancestors when
    /// `check_ancestors` is set
    #[must_use]
    pub fn get_all_slots_with_class_domain(
        &self,
        class: &str,
        check_ancestors: bool,
        formatted: bool,
    ) -> Vec<String> {
        self.query("slots_with_class_domain", class, formatted, |index, id| {
            index.slots_with_class_domain(id, check_ancestors)
        })
    }

    /// Slots whose range is the class, or one of its ancestors
    #[must_use]
    pub fn get_all_slots_with_class_range(
        &self,
        class: &str,
        check_ancestors: bool,
        formatted: bool,
    ) -> Vec<String> {
        self.query("slots_with_class_range", class, formatted, |index, id| {
            index.slots_with_class_range(id, check_ancestors)
        })
    }

    /// Predicate slots among [`Toolkit::get_all_slots_with_class_domain`]
    #[must_use]
    pub fn get_all_predicates_with_class_domain(
        &self,
        class: &str,
        check_ancestors: bool,
        formatted: bool,
    ) -> Vec<String> {
        self.query("predicates_with_class_domain", class, formatted, |index, id| {
            index.predicates_with_class_domain(id, check_ancestors)
        })
    }

    /// Predicate slots among [`Toolkit::get_all_slots_with_class_range`]
    #[must_use]
    pub fn get_all_predicates_with_class_range(
        &self,
        class: &str,
        check_ancestors: bool,
        formatted: bool,
    ) -> Vec<String> {
        self.query("predicates_with_class_range", class, formatted, |index, id| {
            index.predicates_with_class_range(id, check_ancestors)
        })
    }

    /// Non-predicate slots among [`Toolkit::get_all_slots_with_class_domain`]
    #[must_use]
    pub fn get_all_properties_with_class_domain(
        &self,
        class: &str,
        check_ancestors: bool,
        formatted: bool,
    ) -> Vec<String> {
        self.query("properties_with_class_domain", class, formatted, |index, id| {
            index.properties_with_class_domain(id, check_ancestors)
        })
    }

    /// Non-predicate slots among [`Toolkit::get_all_slots_with_class_range`]
    #[must_use]
    pub fn get_all_properties_with_class_range(
        &self,
        class: &str,
        check_ancestors: bool,
        formatted: bool,
    ) -> Vec<String> {
        self.query("properties_with_class_range", class, formatted, |index, id| {
            index.properties_with_class_range(id, check_ancestors)
        })
    }

    /// Primitive type of a slot's values
    ///
    /// `None` when the slot is unknown, is not a slot, or has no value type.
    #[must_use]
    pub fn get_value_type_for_slot(&self, slot: &str, formatted: bool) -> Option<String> {
        self.query("value_type_for_slot", slot, formatted, |index, id| {
            index.value_type_for_slot(id).map(|value| vec![value])
        })
        .pop()
    }

    /// Range of a slot as used by a class, after `slot_usage` overrides
    #[must_use]
    pub fn get_slot_range_in_class(
        &self,
        class: &str,
        slot: &str,
        include_ancestors: bool,
        formatted: bool,
    ) -> Vec<String> {
        self.query("slot_range_in_class", class, formatted, |index, class_id| {
            let slot_id = index.lookup(slot)?;
            index.slot_range_in_class(class_id, slot_id, include_ancestors)
        })
    }

    fn query<F>(&self, operation: &'static str, name: &str, formatted: bool, run: F) -> Vec<String>
    where
        F: FnOnce(&SchemaIndex, ElementId) -> Result<Vec<ElementId>>,
    {
        let result = self
            .inner
            .lookup(name)
            .and_then(|id| run(&self.inner, id));
        match result {
            Ok(ids) => self.render(ids, formatted),
            Err(error) => {
                tracing::debug!(operation, name, %error, "query returned no results");
                Vec::new()
            }
        }
    }

    fn render(&self, ids: impl IntoIterator<Item = ElementId>, formatted: bool) -> Vec<String> {
        ids.into_iter()
            .map(|id| {
                if formatted {
                    self.inner.display_name(id)
                } else {
                    self.inner.name(id).to_string()
                }
            })
            .collect()
    }
}
