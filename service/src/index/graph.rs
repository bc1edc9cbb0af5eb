//! Schema graph: every element under its canonical name, plus parent and
//! child adjacency over is-a and mixin edges

use biolink_toolkit_core::{
    config::ToolkitConfig,
    error::{Result, SchemaDefect, ToolkitError},
    name::{ElementName, fold_key},
    types::{Element, ElementKind, SchemaDefinition},
};
use std::collections::HashMap;

use super::validate;

/// Opaque handle of an element inside one built index
///
/// Handles follow declaration order (classes, slots, types, enums), so
/// sorting by handle gives a deterministic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    /// Position of the element in declaration order
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The loaded model with derived adjacency, immutable once built
#[derive(Debug)]
pub struct SchemaGraph {
    names: Vec<ElementName>,
    elements: Vec<Element>,
    by_name: HashMap<ElementName, ElementId>,
    parents: Vec<Vec<ElementId>>,
    children: Vec<Vec<ElementId>>,
    default_range: Option<ElementId>,
}

impl SchemaGraph {
    /// Build the graph and run every build-time check
    ///
    /// All defects are collected and reported together.
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::SchemaDefects` for name collisions, dangling or
    /// wrongly typed references, cycles, and configuration entries naming
    /// elements the schema does not define.
    pub fn build(schema: &SchemaDefinition, config: &ToolkitConfig) -> Result<Self> {
        let mut defects = Vec::new();
        let mut graph = Self::collect(schema, &mut defects);

        graph.link_parents(&mut defects);

        if let Some(range) = &schema.default_range {
            match graph.id(range) {
                Some(id) => graph.default_range = Some(id),
                None => defects.push(SchemaDefect::DanglingReference {
                    element: schema.name.clone(),
                    field: "default_range",
                    target: range.clone(),
                }),
            }
        }

        defects.extend(validate::name_collisions(&graph));
        defects.extend(validate::reference_defects(&graph));
        defects.extend(validate::cycles(&graph));
        defects.extend(validate::config_defects(&graph, config));

        if defects.is_empty() {
            Ok(graph)
        } else {
            for defect in &defects {
                tracing::error!(%defect, "schema defect");
            }
            Err(ToolkitError::SchemaDefects(defects))
        }
    }

    fn collect(schema: &SchemaDefinition, defects: &mut Vec<SchemaDefect>) -> Self {
        let elements = schema
            .classes
            .iter()
            .map(|(key, def)| {
                let mut def = def.clone();
                def.name.clone_from(key);
                Element::Class(def)
            })
            .chain(schema.slots.iter().map(|(key, def)| {
                let mut def = def.clone();
                def.name.clone_from(key);
                Element::Slot(def)
            }))
            .chain(schema.types.iter().map(|(key, def)| {
                let mut def = def.clone();
                def.name.clone_from(key);
                Element::Type(def)
            }))
            .chain(schema.enums.iter().map(|(key, def)| {
                let mut def = def.clone();
                def.name.clone_from(key);
                Element::Enum(def)
            }));

        let mut graph = Self {
            names: Vec::new(),
            elements: Vec::new(),
            by_name: HashMap::new(),
            parents: Vec::new(),
            children: Vec::new(),
            default_range: None,
        };

        for element in elements {
            let name = ElementName::new(element.name());
            if let Some(existing) = graph.by_name.get(&name) {
                let first = &graph.elements[existing.0];
                defects.push(SchemaDefect::NameCollision {
                    first: format!("{} {}", first.kind(), first.name()),
                    second: format!("{} {}", element.kind(), element.name()),
                    key: name.to_string(),
                });
                continue;
            }
            let id = ElementId(graph.elements.len());
            graph.by_name.insert(name.clone(), id);
            graph.names.push(name);
            graph.elements.push(element);
        }

        graph.parents = vec![Vec::new(); graph.elements.len()];
        graph.children = vec![Vec::new(); graph.elements.len()];
        graph
    }

    fn link_parents(&mut self, defects: &mut Vec<SchemaDefect>) {
        for index in 0..self.elements.len() {
            let element = &self.elements[index];
            let kind = element.kind();
            let mut parents = Vec::new();

            for (position, parent) in element.parent_names().enumerate() {
                let field = if position == 0 && has_is_a(element) {
                    "is_a"
                } else {
                    "mixins"
                };
                let Some(parent_id) = self.id(parent) else {
                    defects.push(SchemaDefect::DanglingReference {
                        element: element.name().to_string(),
                        field,
                        target: parent.to_string(),
                    });
                    continue;
                };
                if self.elements[parent_id.0].kind() != kind {
                    defects.push(SchemaDefect::WrongKindReference {
                        element: element.name().to_string(),
                        field,
                        target: parent.to_string(),
                        expected: kind.label(),
                    });
                    continue;
                }
                if !parents.contains(&parent_id) {
                    parents.push(parent_id);
                }
            }

            for parent in &parents {
                self.children[parent.0].push(ElementId(index));
            }
            self.parents[index] = parents;
        }
    }

    /// Number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the schema defines no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All handles in declaration order
    pub fn ids(&self) -> impl ExactSizeIterator<Item = ElementId> + use<> {
        (0..self.elements.len()).map(ElementId)
    }

    /// Handle of an element by exact canonical name
    #[must_use]
    pub fn id(&self, name: &str) -> Option<ElementId> {
        self.by_name.get(name).copied()
    }

    /// Handle of an element by canonical name, falling back to the folded key
    ///
    /// Used for names written in configuration, before the resolver exists.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<ElementId> {
        self.id(name).or_else(|| {
            let key = fold_key(name);
            self.ids().find(|id| self.names[id.0].folded_key() == key)
        })
    }

    /// Canonical name of an element
    #[must_use]
    pub fn name(&self, id: ElementId) -> &ElementName {
        &self.names[id.0]
    }

    /// Element record
    #[must_use]
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    /// Kind tag of an element
    #[must_use]
    pub fn kind(&self, id: ElementId) -> ElementKind {
        self.elements[id.0].kind()
    }

    /// Direct parents: is-a first, then mixins
    #[must_use]
    pub fn parents(&self, id: ElementId) -> &[ElementId] {
        &self.parents[id.0]
    }

    /// Direct children in declaration order
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.children[id.0]
    }

    /// Range used by slots whose hierarchy declares none
    #[must_use]
    pub const fn default_range(&self) -> Option<ElementId> {
        self.default_range
    }

    /// Handles of every element of one kind, in declaration order
    pub fn ids_of_kind(&self, kind: ElementKind) -> impl Iterator<Item = ElementId> + '_ {
        self.ids().filter(move |id| self.kind(*id) == kind)
    }
}

fn has_is_a(element: &Element) -> bool {
    match element {
        Element::Class(c) => c.is_a.is_some(),
        Element::Slot(s) => s.is_a.is_some(),
        Element::Type(_) | Element::Enum(_) => false,
    }
}
