//! Reverse index from external identifiers to elements

use std::collections::HashMap;

use super::graph::{ElementId, SchemaGraph};

/// External identifier (CURIE or URI) to the elements that map to it
#[derive(Debug, Default)]
pub struct MappingIndex {
    by_identifier: HashMap<String, Vec<ElementId>>,
}

impl MappingIndex {
    /// Invert every mapping field of every element
    #[must_use]
    pub fn build(graph: &SchemaGraph) -> Self {
        let mut by_identifier: HashMap<String, Vec<ElementId>> = HashMap::new();

        for id in graph.ids() {
            for identifier in graph.element(id).mappings().iter() {
                let elements = by_identifier.entry(identifier.to_string()).or_default();
                if !elements.contains(&id) {
                    elements.push(id);
                }
            }
        }

        Self { by_identifier }
    }

    /// Elements mapped to `identifier`, in declaration order
    ///
    /// Matching is exact and case-sensitive.
    #[must_use]
    pub fn elements_for(&self, identifier: &str) -> &[ElementId] {
        self.by_identifier
            .get(identifier)
            .map_or(&[], Vec::as_slice)
    }

    /// Number of distinct identifiers
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_identifier.len()
    }

    /// Whether no element declares a mapping
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_identifier.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biolink_toolkit_core::config::{HierarchyRoots, ToolkitConfig};
    use biolink_toolkit_core::types::{ClassDefinition, Mappings, SchemaDefinition, SlotDefinition};

    #[test]
    fn test_reverse_lookup() {
        let mut schema = SchemaDefinition::default();
        schema.classes.insert(
            "gene".into(),
            ClassDefinition {
                mappings: Mappings {
                    exact_mappings: vec!["SO:0000704".into(), "SIO:010035".into()],
                    ..Default::default()
                },
                ..Default::default()
            },
        );
        schema.slots.insert(
            "related to".into(),
            SlotDefinition {
                mappings: Mappings {
                    exact_mappings: vec!["skos:relatedMatch".into()],
                    broad_mappings: vec!["owl:topObjectProperty".into()],
                    ..Default::default()
                },
                ..Default::default()
            },
        );
        schema.slots.insert(
            "interacts with".into(),
            SlotDefinition {
                mappings: Mappings {
                    narrow_mappings: vec!["owl:topObjectProperty".into()],
                    ..Default::default()
                },
                ..Default::default()
            },
        );
        let config = ToolkitConfig {
            roots: HierarchyRoots::none(),
            reference_value_type: None,
            ..Default::default()
        };
        let graph = SchemaGraph::build(&schema, &config).expect("valid schema");
        let index = MappingIndex::build(&graph);

        let gene = graph.id("gene").expect("gene");
        assert_eq!(index.elements_for("SO:0000704"), &[gene]);
        assert!(index.elements_for("so:0000704").is_empty());
        assert!(index.elements_for("SO:9999999").is_empty());
        assert_eq!(index.elements_for("owl:topObjectProperty").len(), 2);
        assert_eq!(index.len(), 4);
    }
}
