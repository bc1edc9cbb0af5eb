//! Property tests for ancestor and descendant closures over random DAGs

use biolink_toolkit::index::{ElementId, SchemaIndex};
use biolink_toolkit_core::{ClassDefinition, HierarchyRoots, SchemaDefinition, ToolkitConfig};
use proptest::prelude::*;
use proptest::sample::Index;
use std::collections::HashSet;

/// Each class picks its parents among classes declared before it
fn dag() -> impl Strategy<Value = SchemaDefinition> {
    prop::collection::vec(prop::collection::vec(any::<Index>(), 0..3), 1..24).prop_map(
        |picks| {
            let mut schema = SchemaDefinition {
                id: "https://example.org/dag".into(),
                name: "dag".into(),
                ..Default::default()
            };
            for (i, parents) in picks.into_iter().enumerate() {
                let mut parents = if i == 0 {
                    Vec::new()
                } else {
                    parents.iter().map(|p| format!("class {}", p.index(i))).collect()
                };
                let is_a = (!parents.is_empty()).then(|| parents.remove(0));
                let name = format!("class {i}");
                schema.classes.insert(
                    name.clone(),
                    ClassDefinition {
                        name,
                        is_a,
                        mixins: parents,
                        ..Default::default()
                    },
                );
            }
            schema
        },
    )
}

fn index(schema: &SchemaDefinition) -> SchemaIndex {
    let config = ToolkitConfig {
        roots: HierarchyRoots::none(),
        reference_value_type: None,
        ..Default::default()
    };
    SchemaIndex::build(schema, config).expect("acyclic schema builds")
}

proptest! {
    #[test]
    fn prop_reflexive_adds_only_self(schema in dag()) {
        let index = index(&schema);
        for id in index.all_elements() {
            let with_self = index.ancestors(id, true);
            let without = index.ancestors(id, false);
            prop_assert_eq!(with_self[0], id);
            prop_assert_eq!(&with_self[1..], without.as_slice());
            prop_assert!(!without.contains(&id));

            let below = index.descendants(id, false);
            let below_with_self = index.descendants(id, true);
            prop_assert_eq!(below_with_self[0], id);
            prop_assert_eq!(&below_with_self[1..], below.as_slice());
        }
    }

    #[test]
    fn prop_ancestors_and_descendants_are_inverse(schema in dag()) {
        let index = index(&schema);
        let all = index.all_elements();
        for &a in &all {
            let below: HashSet<ElementId> = index.descendants(a, false).into_iter().collect();
            for &e in &all {
                prop_assert_eq!(index.ancestors(e, false).contains(&a), below.contains(&e));
            }
        }
    }

    #[test]
    fn prop_closures_are_sets_containing_parents(schema in dag()) {
        let index = index(&schema);
        for id in index.all_elements() {
            let ancestors = index.ancestors(id, false);
            let unique: HashSet<ElementId> = ancestors.iter().copied().collect();
            prop_assert_eq!(unique.len(), ancestors.len());
            for parent in index.parents(id) {
                prop_assert!(unique.contains(parent));
            }
            for child in index.children(id) {
                prop_assert!(index.descendants(id, false).contains(child));
            }
        }
    }
}
