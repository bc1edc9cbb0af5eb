//! Domain and range of slots, and the inverse lookups
//!
//! Two separate axes: a slot that declares no domain (range) takes it from
//! the nearest ancestor slot that does, and `include_ancestors` broadens a
//! result along the class hierarchy.

use biolink_toolkit_core::{
    config::ToolkitConfig,
    error::{Result, ToolkitError},
    types::{ClassDefinition, Element, ElementKind, SlotDefinition},
};
use indexmap::IndexSet;
use std::collections::{BTreeSet, HashMap};

use super::closure::ClosureEngine;
use super::graph::{ElementId, SchemaGraph};

/// Per-slot domains and ranges with inverse indexes, built once
#[derive(Debug)]
pub struct DomainRangeResolver {
    domains: Vec<Vec<ElementId>>,
    ranges: Vec<Option<ElementId>>,
    by_domain: HashMap<ElementId, Vec<ElementId>>,
    by_range: HashMap<ElementId, Vec<ElementId>>,
    reference_value_type: Option<ElementId>,
}

impl DomainRangeResolver {
    /// Resolve direct domains and ranges for every slot
    ///
    /// A slot's direct domain is its inherited declared domain (or the
    /// configured default), then every class listing it in `slots`, then the
    /// configured implicit domains for it.
    #[must_use]
    pub fn build(graph: &SchemaGraph, closure: &ClosureEngine, config: &ToolkitConfig) -> Self {
        let default_domain = config.default_domain.as_deref().and_then(|d| graph.find(d));
        let mut domains = vec![Vec::new(); graph.len()];
        let mut ranges = vec![None; graph.len()];

        for slot in graph.ids_of_kind(ElementKind::Slot) {
            let inherited_domain = inherited(graph, closure, slot, |s| s.domain.as_deref());
            if let Some(domain) = inherited_domain.or(default_domain) {
                domains[slot.index()].push(domain);
            }
            ranges[slot.index()] = inherited(graph, closure, slot, |s| s.range.as_deref())
                .or_else(|| graph.default_range());
        }

        for class in graph.ids_of_kind(ElementKind::Class) {
            let Element::Class(definition) = graph.element(class) else {
                continue;
            };
            for slot in definition.slots.iter().filter_map(|s| graph.find(s)) {
                push_unique(&mut domains[slot.index()], class);
            }
        }

        for (slot, classes) in &config.implicit_domains {
            let Some(slot) = graph.find(slot) else {
                continue;
            };
            for class in classes.iter().filter_map(|c| graph.find(c)) {
                push_unique(&mut domains[slot.index()], class);
            }
        }

        let mut by_domain: HashMap<ElementId, Vec<ElementId>> = HashMap::new();
        let mut by_range: HashMap<ElementId, Vec<ElementId>> = HashMap::new();
        for slot in graph.ids_of_kind(ElementKind::Slot) {
            for class in &domains[slot.index()] {
                by_domain.entry(*class).or_default().push(slot);
            }
            if let Some(range) = ranges[slot.index()] {
                by_range.entry(range).or_default().push(slot);
            }
        }

        Self {
            domains,
            ranges,
            by_domain,
            by_range,
            reference_value_type: config
                .reference_value_type
                .as_deref()
                .and_then(|t| graph.find(t)),
        }
    }

    /// Direct domain of a slot, without class expansion
    #[must_use]
    pub fn direct_domain(&self, slot: ElementId) -> &[ElementId] {
        &self.domains[slot.index()]
    }

    /// Domain of a slot, optionally broadened to every class ancestor
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::InvalidQueryShape` if `slot` is not a slot.
    pub fn slot_domain(
        &self,
        graph: &SchemaGraph,
        closure: &ClosureEngine,
        slot: ElementId,
        include_ancestors: bool,
    ) -> Result<Vec<ElementId>> {
        require_slot(graph, "slot_domain", slot)?;
        let direct = self.direct_domain(slot);
        Ok(if include_ancestors {
            expand(closure, direct)
        } else {
            direct.to_vec()
        })
    }

    /// Range of a slot, optionally broadened to every class ancestor
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::InvalidQueryShape` if `slot` is not a slot.
    pub fn slot_range(
        &self,
        graph: &SchemaGraph,
        closure: &ClosureEngine,
        slot: ElementId,
        include_ancestors: bool,
    ) -> Result<Vec<ElementId>> {
        require_slot(graph, "slot_range", slot)?;
        let direct: Vec<ElementId> = self.ranges[slot.index()].into_iter().collect();
        Ok(if include_ancestors {
            expand(closure, &direct)
        } else {
            direct
        })
    }

    /// Slots whose direct domain contains the class or, with
    /// `check_ancestors`, any of its ancestors
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::InvalidQueryShape` if `class` is not a class.
    pub fn slots_with_class_domain(
        &self,
        graph: &SchemaGraph,
        closure: &ClosureEngine,
        class: ElementId,
        check_ancestors: bool,
    ) -> Result<Vec<ElementId>> {
        require_class(graph, "slots_with_class_domain", class)?;
        Ok(inverse(&self.by_domain, closure, class, check_ancestors))
    }

    /// Slots whose range is the class or, with `check_ancestors`, any of its
    /// ancestors
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::InvalidQueryShape` if `class` is not a class.
    pub fn slots_with_class_range(
        &self,
        graph: &SchemaGraph,
        closure: &ClosureEngine,
        class: ElementId,
        check_ancestors: bool,
    ) -> Result<Vec<ElementId>> {
        require_class(graph, "slots_with_class_range", class)?;
        Ok(inverse(&self.by_range, closure, class, check_ancestors))
    }

    /// Primitive value type of a slot's values
    ///
    /// A type or enum range is returned as is. Class-valued slots hold
    /// references, typed by the configured reference value type.
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::InvalidQueryShape` if `slot` is not a slot, has
    /// no range, or has a class range and no reference value type is set.
    pub fn value_type(&self, graph: &SchemaGraph, slot: ElementId) -> Result<ElementId> {
        const OPERATION: &str = "value_type_for_slot";
        require_slot(graph, OPERATION, slot)?;

        let range = self.ranges[slot.index()].ok_or_else(|| {
            ToolkitError::invalid_query(OPERATION, graph.name(slot).as_str(), "slot has no range")
        })?;
        if graph.kind(range).is_value_type() {
            return Ok(range);
        }
        self.reference_value_type.ok_or_else(|| {
            ToolkitError::invalid_query(
                OPERATION,
                graph.name(slot).as_str(),
                format!(
                    "range '{}' is a class and no reference value type is configured",
                    graph.name(range)
                ),
            )
        })
    }

    /// Range of a slot as used by a class, after `slot_usage` overrides
    ///
    /// The class itself is checked first, then its ancestors nearest first;
    /// without an override this is [`Self::slot_range`].
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::InvalidQueryShape` if `class` is not a class or
    /// `slot` is not a slot.
    pub fn slot_range_in_class(
        &self,
        graph: &SchemaGraph,
        closure: &ClosureEngine,
        class: ElementId,
        slot: ElementId,
        include_ancestors: bool,
    ) -> Result<Vec<ElementId>> {
        require_class(graph, "slot_range_in_class", class)?;
        require_slot(graph, "slot_range_in_class", slot)?;

        let overridden = std::iter::once(class)
            .chain(closure.ancestors_of(class).iter().copied())
            .find_map(|owner| usage_range(graph, owner, slot));

        match overridden {
            Some(range) if include_ancestors => Ok(expand(closure, &[range])),
            Some(range) => Ok(vec![range]),
            None => self.slot_range(graph, closure, slot, include_ancestors),
        }
    }
}

/// First declared value along the slot's own hierarchy, self first
fn inherited<F>(
    graph: &SchemaGraph,
    closure: &ClosureEngine,
    slot: ElementId,
    field: F,
) -> Option<ElementId>
where
    F: Fn(&SlotDefinition) -> Option<&str>,
{
    std::iter::once(slot)
        .chain(closure.ancestors_of(slot).iter().copied())
        .filter_map(|id| graph.element(id).as_slot())
        .find_map(|definition| field(definition))
        .and_then(|name| graph.find(name))
}

fn usage_range(graph: &SchemaGraph, class: ElementId, slot: ElementId) -> Option<ElementId> {
    let definition: &ClassDefinition = graph.element(class).as_class()?;
    definition
        .slot_usage
        .iter()
        .filter(|(name, _)| graph.find(name) == Some(slot))
        .find_map(|(_, usage)| usage.range.as_deref())
        .and_then(|range| graph.find(range))
}

fn inverse(
    index: &HashMap<ElementId, Vec<ElementId>>,
    closure: &ClosureEngine,
    class: ElementId,
    check_ancestors: bool,
) -> Vec<ElementId> {
    let classes = if check_ancestors {
        closure.ancestors(class, true)
    } else {
        vec![class]
    };

    classes
        .iter()
        .filter_map(|c| index.get(c))
        .flatten()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Each member followed by its ancestors, first occurrence kept
fn expand(closure: &ClosureEngine, members: &[ElementId]) -> Vec<ElementId> {
    members
        .iter()
        .flat_map(|member| closure.ancestors(*member, true))
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

fn push_unique(ids: &mut Vec<ElementId>, id: ElementId) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}

fn require_slot(graph: &SchemaGraph, operation: &'static str, id: ElementId) -> Result<()> {
    require(graph, operation, id, ElementKind::Slot)
}

fn require_class(graph: &SchemaGraph, operation: &'static str, id: ElementId) -> Result<()> {
    require(graph, operation, id, ElementKind::Class)
}

fn require(
    graph: &SchemaGraph,
    operation: &'static str,
    id: ElementId,
    expected: ElementKind,
) -> Result<()> {
    let kind = graph.kind(id);
    if kind == expected {
        Ok(())
    } else {
        Err(ToolkitError::invalid_query(
            operation,
            graph.name(id).as_str(),
            format!("expected a {expected}, found a {kind}"),
        ))
    }
}
