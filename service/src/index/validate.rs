//! Build-time checks over the schema graph
//!
//! Each check returns every defect it finds; `SchemaGraph::build` gathers
//! them into a single report.

use biolink_toolkit_core::{
    config::ToolkitConfig,
    error::SchemaDefect,
    types::{Element, ElementKind},
};
use std::collections::HashMap;

use super::graph::{ElementId, SchemaGraph};

const CLASS: &[ElementKind] = &[ElementKind::Class];
const SLOT: &[ElementKind] = &[ElementKind::Slot];
const RANGE: &[ElementKind] = &[ElementKind::Class, ElementKind::Type, ElementKind::Enum];
const VALUE: &[ElementKind] = &[ElementKind::Type, ElementKind::Enum];

/// Distinct elements whose names fold to the same lookup key
pub(super) fn name_collisions(graph: &SchemaGraph) -> Vec<SchemaDefect> {
    let mut seen: HashMap<String, ElementId> = HashMap::with_capacity(graph.len());
    let mut defects = Vec::new();

    for id in graph.ids() {
        let key = graph.name(id).folded_key();
        if let Some(first) = seen.get(&key) {
            defects.push(SchemaDefect::NameCollision {
                first: describe(graph, *first),
                second: describe(graph, id),
                key,
            });
        } else {
            seen.insert(key, id);
        }
    }

    defects
}

/// Slot, domain and range references that are undefined or of the wrong kind
///
/// Parent references are checked while linking the graph.
pub(super) fn reference_defects(graph: &SchemaGraph) -> Vec<SchemaDefect> {
    let mut defects = Vec::new();

    for id in graph.ids() {
        match graph.element(id) {
            Element::Class(class) => {
                for slot in &class.slots {
                    defects.extend(check(graph, &class.name, "slots", slot, SLOT));
                }
                for (slot, usage) in &class.slot_usage {
                    defects.extend(check(graph, &class.name, "slot_usage", slot, SLOT));
                    let owner = format!("{}/{slot}", class.name);
                    if let Some(domain) = &usage.domain {
                        defects.extend(check(graph, &owner, "domain", domain, CLASS));
                    }
                    if let Some(range) = &usage.range {
                        defects.extend(check(graph, &owner, "range", range, RANGE));
                    }
                }
            }
            Element::Slot(slot) => {
                if let Some(domain) = &slot.domain {
                    defects.extend(check(graph, &slot.name, "domain", domain, CLASS));
                }
                if let Some(range) = &slot.range {
                    defects.extend(check(graph, &slot.name, "range", range, RANGE));
                }
                if let Some(inverse) = &slot.inverse {
                    defects.extend(check(graph, &slot.name, "inverse", inverse, SLOT));
                }
            }
            Element::Type(_) | Element::Enum(_) => {}
        }
    }

    defects
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    New,
    Active,
    Done,
}

/// Cycles in the is-a/mixin relation
///
/// Iterative depth-first search; a parent edge into a node that is still on
/// the stack closes a cycle, reported with its first node repeated.
pub(super) fn cycles(graph: &SchemaGraph) -> Vec<SchemaDefect> {
    let mut marks = vec![Mark::New; graph.len()];
    let mut defects = Vec::new();

    for start in graph.ids() {
        if marks[start.index()] != Mark::New {
            continue;
        }
        marks[start.index()] = Mark::Active;
        let mut stack: Vec<(ElementId, usize)> = vec![(start, 0)];

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            let parents = graph.parents(node);

            if next == parents.len() {
                marks[node.index()] = Mark::Done;
                stack.pop();
                continue;
            }

            frame.1 += 1;
            let parent = parents[next];
            match marks[parent.index()] {
                Mark::New => {
                    marks[parent.index()] = Mark::Active;
                    stack.push((parent, 0));
                }
                Mark::Active => {
                    let from = stack
                        .iter()
                        .position(|(on_stack, _)| *on_stack == parent)
                        .unwrap_or(0);
                    let mut cycle: Vec<String> = stack[from..]
                        .iter()
                        .map(|(on_stack, _)| graph.name(*on_stack).to_string())
                        .collect();
                    cycle.push(graph.name(parent).to_string());
                    defects.push(SchemaDefect::CyclicInheritance { cycle });
                }
                Mark::Done => {}
            }
        }
    }

    defects
}

/// Configuration entries naming elements the schema lacks
pub(super) fn config_defects(graph: &SchemaGraph, config: &ToolkitConfig) -> Vec<SchemaDefect> {
    let mut defects = Vec::new();
    let roots = &config.roots;

    let root_checks = [
        ("root class", roots.root_class.as_deref(), CLASS, true),
        ("category root", roots.category_root.as_deref(), CLASS, false),
        ("association root", roots.association_root.as_deref(), CLASS, false),
        ("root predicate", roots.root_predicate.as_deref(), SLOT, true),
    ];
    for (role, name, kinds, parentless) in root_checks {
        let Some(name) = name else { continue };
        match graph.find(name) {
            None => defects.push(SchemaDefect::MissingRoot {
                role,
                name: name.to_string(),
            }),
            Some(id) if !kinds.contains(&graph.kind(id)) => {
                defects.push(SchemaDefect::WrongKindReference {
                    element: "roots".to_string(),
                    field: role,
                    target: name.to_string(),
                    expected: kinds[0].label(),
                });
            }
            Some(id) if parentless && !graph.parents(id).is_empty() => {
                defects.push(SchemaDefect::RootHasParent {
                    role,
                    name: name.to_string(),
                });
            }
            Some(_) => {}
        }
    }

    for (alias, target) in &config.aliases {
        if graph.find(target).is_none() {
            defects.push(SchemaDefect::DanglingReference {
                element: alias.clone(),
                field: "aliases",
                target: target.clone(),
            });
        }
    }

    for (slot, classes) in &config.implicit_domains {
        defects.extend(check(graph, "implicit_domains", "implicit_domains", slot, SLOT));
        for class in classes {
            defects.extend(check(graph, slot, "implicit_domains", class, CLASS));
        }
    }

    if let Some(domain) = &config.default_domain {
        defects.extend(check(graph, "config", "default_domain", domain, CLASS));
    }
    if let Some(value_type) = &config.reference_value_type {
        defects.extend(check(
            graph,
            "config",
            "reference_value_type",
            value_type,
            VALUE,
        ));
    }

    defects
}

fn check(
    graph: &SchemaGraph,
    element: &str,
    field: &'static str,
    target: &str,
    kinds: &[ElementKind],
) -> Option<SchemaDefect> {
    match graph.find(target) {
        None => Some(SchemaDefect::DanglingReference {
            element: element.to_string(),
            field,
            target: target.to_string(),
        }),
        Some(id) if !kinds.contains(&graph.kind(id)) => Some(SchemaDefect::WrongKindReference {
            element: element.to_string(),
            field,
            target: target.to_string(),
            expected: kinds[0].label(),
        }),
        Some(_) => None,
    }
}

fn describe(graph: &SchemaGraph, id: ElementId) -> String {
    format!("{} {}", graph.kind(id), graph.name(id))
}

#[cfg(test)]
mod tests {
    use biolink_toolkit_core::config::HierarchyRoots;
    use biolink_toolkit_core::error::ToolkitError;
    use biolink_toolkit_core::types::{
        ClassDefinition, SchemaDefinition, SlotDefinition, TypeDefinition,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn bare_config() -> ToolkitConfig {
        ToolkitConfig {
            roots: HierarchyRoots::none(),
            reference_value_type: None,
            ..Default::default()
        }
    }

    fn class_with_parent(is_a: &str) -> ClassDefinition {
        ClassDefinition {
            is_a: Some(is_a.to_string()),
            ..Default::default()
        }
    }

    fn defects_of(schema: &SchemaDefinition, config: &ToolkitConfig) -> Vec<SchemaDefect> {
        match SchemaGraph::build(schema, config) {
            Ok(_) => Vec::new(),
            Err(ToolkitError::SchemaDefects(defects)) => defects,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_folded_collision() {
        let mut schema = SchemaDefinition::default();
        schema.classes.insert("RNA product".into(), ClassDefinition::default());
        schema.classes.insert("rna_product".into(), ClassDefinition::default());

        let defects = defects_of(&schema, &bare_config());
        assert_eq!(
            defects,
            vec![SchemaDefect::NameCollision {
                first: "class RNA product".into(),
                second: "class rna_product".into(),
                key: "rna product".into(),
            }]
        );
    }

    #[test]
    fn test_cycle_reported_with_path() {
        let mut schema = SchemaDefinition::default();
        schema.classes.insert("a".into(), class_with_parent("b"));
        schema.classes.insert("b".into(), class_with_parent("c"));
        schema.classes.insert("c".into(), class_with_parent("a"));
        schema.classes.insert("d".into(), class_with_parent("a"));

        let defects = defects_of(&schema, &bare_config());
        assert_eq!(
            defects,
            vec![SchemaDefect::CyclicInheritance {
                cycle: vec!["a".into(), "b".into(), "c".into(), "a".into()],
            }]
        );
    }

    #[test]
    fn test_self_parent_is_cycle() {
        let mut schema = SchemaDefinition::default();
        schema.classes.insert("loop".into(), class_with_parent("loop"));

        let defects = defects_of(&schema, &bare_config());
        assert_eq!(
            defects,
            vec![SchemaDefect::CyclicInheritance {
                cycle: vec!["loop".into(), "loop".into()],
            }]
        );
    }

    #[test]
    fn test_diamond_is_not_cycle() {
        let mut schema = SchemaDefinition::default();
        schema.classes.insert("top".into(), ClassDefinition::default());
        schema.classes.insert("left".into(), class_with_parent("top"));
        schema.classes.insert("right".into(), class_with_parent("top"));
        schema.classes.insert(
            "bottom".into(),
            ClassDefinition {
                is_a: Some("left".into()),
                mixins: vec!["right".into()],
                ..Default::default()
            },
        );

        assert!(defects_of(&schema, &bare_config()).is_empty());
    }

    #[test]
    fn test_slot_references() {
        let mut schema = SchemaDefinition::default();
        schema.classes.insert("gene".into(), ClassDefinition::default());
        schema.types.insert("string".into(), TypeDefinition::default());
        schema.slots.insert(
            "name".into(),
            SlotDefinition {
                domain: Some("string".into()),
                range: Some("str".into()),
                ..Default::default()
            },
        );

        let defects = defects_of(&schema, &bare_config());
        assert_eq!(
            defects,
            vec![
                SchemaDefect::WrongKindReference {
                    element: "name".into(),
                    field: "domain",
                    target: "string".into(),
                    expected: "class",
                },
                SchemaDefect::DanglingReference {
                    element: "name".into(),
                    field: "range",
                    target: "str".into(),
                },
            ]
        );
    }

    #[test]
    fn test_config_references() {
        let mut schema = SchemaDefinition::default();
        schema.classes.insert("entity".into(), ClassDefinition::default());
        schema.classes.insert("named thing".into(), class_with_parent("entity"));
        schema.slots.insert("related to".into(), SlotDefinition::default());

        let mut config = ToolkitConfig::default();
        config.roots.root_class = Some("named thing".into());
        config.aliases.insert("thing".into(), "nothing".into());

        let defects = defects_of(&schema, &config);
        assert_eq!(
            defects,
            vec![
                SchemaDefect::RootHasParent {
                    role: "root class",
                    name: "named thing".into(),
                },
                SchemaDefect::MissingRoot {
                    role: "association root",
                    name: "association".into(),
                },
                SchemaDefect::DanglingReference {
                    element: "thing".into(),
                    field: "aliases",
                    target: "nothing".into(),
                },
                SchemaDefect::DanglingReference {
                    element: "config".into(),
                    field: "reference_value_type",
                    target: "uriorcurie".into(),
                },
            ]
        );
    }

    #[test]
    fn test_config_names_fold() {
        let mut schema = SchemaDefinition::default();
        schema.classes.insert("entity".into(), ClassDefinition::default());
        schema.slots.insert("related to".into(), SlotDefinition::default());

        let mut config = bare_config();
        config.roots.root_class = Some("Entity".into());
        config.roots.root_predicate = Some("related_to".into());

        assert!(defects_of(&schema, &config).is_empty());
    }
}
