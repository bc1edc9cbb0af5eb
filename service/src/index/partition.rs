//! Static partitions of the element set, computed once at build

use biolink_toolkit_core::{config::ToolkitConfig, types::ElementKind};
use std::collections::HashSet;

use super::closure::ClosureEngine;
use super::domain_range::DomainRangeResolver;
use super::graph::{ElementId, SchemaGraph};

/// Entities, associations, properties and predicates of one schema
#[derive(Debug)]
pub struct Partitions {
    entities: Vec<ElementId>,
    associations: Vec<ElementId>,
    node_properties: Vec<ElementId>,
    edge_properties: Vec<ElementId>,
    predicates: Vec<ElementId>,
    predicate_marker: Vec<bool>,
    category_root: Option<ElementId>,
}

impl Partitions {
    /// Compute every partition; all lists are in declaration order
    #[must_use]
    pub fn build(
        graph: &SchemaGraph,
        closure: &ClosureEngine,
        domain_range: &DomainRangeResolver,
        config: &ToolkitConfig,
    ) -> Self {
        let roots = &config.roots;
        let root = |name: Option<&String>| name.and_then(|n| graph.find(n));
        let root_class = root(roots.root_class.as_ref());
        let association_root = root(roots.association_root.as_ref());
        let root_predicate = root(roots.root_predicate.as_ref());

        let under = |ancestor: Option<ElementId>, id: ElementId| {
            ancestor.is_some_and(|a| closure.descends_from(id, a))
        };

        let associations: Vec<ElementId> = graph
            .ids_of_kind(ElementKind::Class)
            .filter(|id| under(association_root, *id))
            .collect();
        let association_set: HashSet<ElementId> = associations.iter().copied().collect();

        let entities: Vec<ElementId> = graph
            .ids_of_kind(ElementKind::Class)
            .filter(|id| root_class.is_none_or(|r| closure.descends_from(*id, r)))
            .filter(|id| !association_set.contains(id))
            .collect();
        let entity_set: HashSet<ElementId> = entities.iter().copied().collect();

        // A `relational_role: PREDICATE` slot holds a predicate; it is not one.
        let mut predicate_marker = vec![false; graph.len()];
        for slot in graph.ids_of_kind(ElementKind::Slot) {
            predicate_marker[slot.index()] = under(root_predicate, slot);
        }
        let predicates: Vec<ElementId> = graph
            .ids_of_kind(ElementKind::Slot)
            .filter(|id| predicate_marker[id.index()])
            .collect();

        let properties_over = |classes: &HashSet<ElementId>| -> Vec<ElementId> {
            graph
                .ids_of_kind(ElementKind::Slot)
                .filter(|id| !predicate_marker[id.index()])
                .filter(|id| {
                    domain_range
                        .direct_domain(*id)
                        .iter()
                        .any(|class| classes.contains(class))
                })
                .collect()
        };
        let node_properties = properties_over(&entity_set);
        let edge_properties = properties_over(&association_set);

        let category_root = root(roots.category_root.as_ref());

        if root_class.is_some() {
            let orphans: Vec<&str> = graph
                .ids_of_kind(ElementKind::Class)
                .filter(|id| !graph.element(*id).is_mixin() && !under(root_class, *id))
                .map(|id| graph.name(id).as_str())
                .collect();
            if !orphans.is_empty() {
                tracing::warn!(
                    count = orphans.len(),
                    classes = ?orphans,
                    "classes outside the root class hierarchy"
                );
            }
        }

        Self {
            entities,
            associations,
            node_properties,
            edge_properties,
            predicates,
            predicate_marker,
            category_root,
        }
    }

    /// Classes under the root class, excluding associations
    #[must_use]
    pub fn entities(&self) -> &[ElementId] {
        &self.entities
    }

    /// Classes under the association root
    #[must_use]
    pub fn associations(&self) -> &[ElementId] {
        &self.associations
    }

    /// Non-predicate slots whose domain includes an entity
    #[must_use]
    pub fn node_properties(&self) -> &[ElementId] {
        &self.node_properties
    }

    /// Non-predicate slots whose domain includes an association
    #[must_use]
    pub fn edge_properties(&self) -> &[ElementId] {
        &self.edge_properties
    }

    /// Slots carrying the predicate marker
    #[must_use]
    pub fn predicates(&self) -> &[ElementId] {
        &self.predicates
    }

    /// Whether the element is a predicate slot
    #[must_use]
    pub fn is_predicate(&self, id: ElementId) -> bool {
        self.predicate_marker[id.index()]
    }

    /// Whether the element is a class under the category root
    #[must_use]
    pub fn is_category(&self, graph: &SchemaGraph, closure: &ClosureEngine, id: ElementId) -> bool {
        graph.kind(id) == ElementKind::Class
            && self
                .category_root
                .is_some_and(|root| closure.descends_from(id, root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biolink_toolkit_core::types::{
        ClassDefinition, RelationalRole, SchemaDefinition, SlotDefinition, TypeDefinition,
    };
    use pretty_assertions::assert_eq;

    fn class(is_a: Option<&str>) -> ClassDefinition {
        ClassDefinition {
            is_a: is_a.map(ToString::to_string),
            ..Default::default()
        }
    }

    fn slot(is_a: Option<&str>, domain: Option<&str>) -> SlotDefinition {
        SlotDefinition {
            is_a: is_a.map(ToString::to_string),
            domain: domain.map(ToString::to_string),
            ..Default::default()
        }
    }

    fn build() -> (SchemaGraph, ClosureEngine, Partitions) {
        let mut schema = SchemaDefinition::default();
        schema.classes.insert("entity".into(), class(None));
        schema.classes.insert("named thing".into(), class(Some("entity")));
        schema.classes.insert("gene".into(), class(Some("named thing")));
        schema.classes.insert("association".into(), class(Some("entity")));
        schema
            .classes
            .insert("gene to gene association".into(), class(Some("association")));
        schema.classes.insert(
            "thing with taxon".into(),
            ClassDefinition {
                mixin: Some(true),
                ..Default::default()
            },
        );

        schema.slots.insert("related to".into(), slot(None, Some("named thing")));
        schema
            .slots
            .insert("interacts with".into(), slot(Some("related to"), None));
        schema.slots.insert(
            "predicate".into(),
            SlotDefinition {
                relational_role: Some(RelationalRole::Predicate),
                ..slot(None, Some("association"))
            },
        );
        schema.slots.insert("name".into(), slot(None, Some("named thing")));
        schema
            .slots
            .insert("frequency qualifier".into(), slot(None, Some("association")));
        schema.types.insert("uriorcurie".into(), TypeDefinition::default());

        let config = ToolkitConfig::default();
        let graph = SchemaGraph::build(&schema, &config).expect("valid schema");
        let closure = ClosureEngine::build(&graph);
        let domain_range = DomainRangeResolver::build(&graph, &closure, &config);
        let partitions = Partitions::build(&graph, &closure, &domain_range, &config);
        (graph, closure, partitions)
    }

    fn names<'g>(graph: &'g SchemaGraph, ids: &[ElementId]) -> Vec<&'g str> {
        ids.iter().map(|id| graph.name(*id).as_str()).collect()
    }

    #[test]
    fn test_entities_exclude_associations() {
        let (graph, _, partitions) = build();
        assert_eq!(
            names(&graph, partitions.entities()),
            vec!["entity", "named thing", "gene"]
        );
        assert_eq!(
            names(&graph, partitions.associations()),
            vec!["association", "gene to gene association"]
        );
    }

    #[test]
    fn test_predicates_and_properties() {
        let (graph, _, partitions) = build();
        assert_eq!(
            names(&graph, partitions.predicates()),
            vec!["related to", "interacts with"]
        );
        assert_eq!(names(&graph, partitions.node_properties()), vec!["name"]);
        assert_eq!(
            names(&graph, partitions.edge_properties()),
            vec!["predicate", "frequency qualifier"]
        );
    }

    #[test]
    fn test_is_category() {
        let (graph, closure, partitions) = build();
        let id = |name: &str| graph.id(name).expect(name);

        assert!(partitions.is_category(&graph, &closure, id("gene")));
        assert!(partitions.is_category(&graph, &closure, id("named thing")));
        assert!(!partitions.is_category(&graph, &closure, id("entity")));
        assert!(!partitions.is_category(&graph, &closure, id("association")));
        assert!(!partitions.is_category(&graph, &closure, id("related to")));
        assert!(partitions.is_predicate(id("interacts with")));
        assert!(!partitions.is_predicate(id("name")));
        assert!(!partitions.is_predicate(id("predicate")));
    }
}
