//! The assembled index: graph, closure, resolver, mappings, domain/range and
//! partitions of one schema

use biolink_toolkit_core::{
    config::ToolkitConfig,
    error::{Result, ToolkitError},
    name::ElementName,
    types::{Element, ElementKind, SchemaDefinition},
};
use serde::Serialize;
use std::time::Instant;

use super::closure::ClosureEngine;
use super::domain_range::DomainRangeResolver;
use super::format::{DisplayFormatter, DisplayStyle};
use super::graph::{ElementId, SchemaGraph};
use super::mapping::MappingIndex;
use super::partition::Partitions;
use super::resolver::NameResolver;

/// Counts describing a built index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// All elements
    pub elements: usize,
    /// Classes
    pub classes: usize,
    /// Slots
    pub slots: usize,
    /// Types
    pub types: usize,
    /// Enums
    pub enums: usize,
    /// Usable aliases
    pub aliases: usize,
    /// Distinct mapping identifiers
    pub mappings: usize,
    /// Descendant lists computed so far
    pub memoized_descendants: usize,
}

/// Immutable, queryable index over one schema
///
/// Queries take and return [`ElementId`] handles; [`SchemaIndex::lookup`]
/// turns user input into a handle and [`SchemaIndex::name`] or
/// [`SchemaIndex::display_name`] turn a handle back into text.
#[derive(Debug)]
pub struct SchemaIndex {
    graph: SchemaGraph,
    closure: ClosureEngine,
    resolver: NameResolver,
    mappings: MappingIndex,
    domain_range: DomainRangeResolver,
    partitions: Partitions,
    styles: Vec<DisplayStyle>,
    formatter: DisplayFormatter,
    config: ToolkitConfig,
}

impl SchemaIndex {
    /// Build the index
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::ConfigError` for an invalid configuration and
    /// `ToolkitError::SchemaDefects` listing every defect in the schema.
    pub fn build(schema: &SchemaDefinition, config: ToolkitConfig) -> Result<Self> {
        let started = Instant::now();
        config.validate()?;

        let graph = SchemaGraph::build(schema, &config)?;
        let closure = ClosureEngine::build(&graph);
        if config.index.eager_descendants {
            closure.precompute_descendants(&graph);
        }
        let resolver = NameResolver::build(&graph, &config);
        let mappings = MappingIndex::build(&graph);
        let domain_range = DomainRangeResolver::build(&graph, &closure, &config);
        let partitions = Partitions::build(&graph, &closure, &domain_range, &config);
        let styles = graph
            .ids()
            .map(|id| DisplayStyle::of(graph.element(id), &config.naming))
            .collect();
        let formatter = DisplayFormatter::new(&config.naming);

        let index = Self {
            graph,
            closure,
            resolver,
            mappings,
            domain_range,
            partitions,
            styles,
            formatter,
            config,
        };

        let stats = index.stats();
        tracing::info!(
            schema = %schema.name,
            elements = stats.elements,
            classes = stats.classes,
            slots = stats.slots,
            types = stats.types,
            enums = stats.enums,
            aliases = stats.aliases,
            mappings = stats.mappings,
            elapsed_ms = started.elapsed().as_millis(),
            "schema index built"
        );

        Ok(index)
    }

    /// Configuration the index was built with
    #[must_use]
    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// Element counts and memo size
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        let count = |kind| self.graph.ids_of_kind(kind).count();
        IndexStats {
            elements: self.graph.len(),
            classes: count(ElementKind::Class),
            slots: count(ElementKind::Slot),
            types: count(ElementKind::Type),
            enums: count(ElementKind::Enum),
            aliases: self.resolver.alias_count(),
            mappings: self.mappings.len(),
            memoized_descendants: self.closure.memoized(),
        }
    }

    /// Resolve user input to a handle
    #[must_use]
    pub fn resolve(&self, input: &str) -> Option<ElementId> {
        self.resolver.resolve(&self.graph, input)
    }

    /// Resolve user input to a handle
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::NotFound` if nothing matches.
    pub fn lookup(&self, input: &str) -> Result<ElementId> {
        self.resolve(input)
            .ok_or_else(|| ToolkitError::not_found(input.trim()))
    }

    /// Canonical name
    #[must_use]
    pub fn name(&self, id: ElementId) -> &ElementName {
        self.graph.name(id)
    }

    /// Display form of the canonical name
    #[must_use]
    pub fn display_name(&self, id: ElementId) -> String {
        self.formatter.format(self.graph.name(id), self.styles[id.index()])
    }

    /// Element record
    #[must_use]
    pub fn element(&self, id: ElementId) -> &Element {
        self.graph.element(id)
    }

    /// Kind of an element
    #[must_use]
    pub fn kind(&self, id: ElementId) -> ElementKind {
        self.graph.kind(id)
    }

    /// Every element in declaration order
    #[must_use]
    pub fn all_elements(&self) -> Vec<ElementId> {
        self.graph.ids().collect()
    }

    /// Every element of one kind in declaration order
    #[must_use]
    pub fn all_of_kind(&self, kind: ElementKind) -> Vec<ElementId> {
        self.graph.ids_of_kind(kind).collect()
    }

    /// Entity classes
    #[must_use]
    pub fn entities(&self) -> &[ElementId] {
        self.partitions.entities()
    }

    /// Association classes
    #[must_use]
    pub fn associations(&self) -> &[ElementId] {
        self.partitions.associations()
    }

    /// Node properties
    #[must_use]
    pub fn node_properties(&self) -> &[ElementId] {
        self.partitions.node_properties()
    }

    /// Edge properties
    #[must_use]
    pub fn edge_properties(&self) -> &[ElementId] {
        self.partitions.edge_properties()
    }

    /// Predicate slots
    #[must_use]
    pub fn predicates(&self) -> &[ElementId] {
        self.partitions.predicates()
    }

    /// Whether the element is a class under the category root
    #[must_use]
    pub fn is_category(&self, id: ElementId) -> bool {
        self.partitions.is_category(&self.graph, &self.closure, id)
    }

    /// Whether the element is a predicate slot
    #[must_use]
    pub fn is_predicate(&self, id: ElementId) -> bool {
        self.partitions.is_predicate(id)
    }

    /// Ancestors breadth-first, nearest first
    #[must_use]
    pub fn ancestors(&self, id: ElementId, reflexive: bool) -> Vec<ElementId> {
        self.closure.ancestors(id, reflexive)
    }

    /// Descendants breadth-first, nearest first
    #[must_use]
    pub fn descendants(&self, id: ElementId, reflexive: bool) -> Vec<ElementId> {
        self.closure.descendants(&self.graph, id, reflexive)
    }

    /// Direct parents, is-a first
    #[must_use]
    pub fn parents(&self, id: ElementId) -> &[ElementId] {
        self.graph.parents(id)
    }

    /// Direct children
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.graph.children(id)
    }

    /// Elements declaring a mapping to the identifier
    #[must_use]
    pub fn elements_for_mapping(&self, identifier: &str) -> &[ElementId] {
        self.mappings.elements_for(identifier)
    }

    /// Domain of a slot
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::InvalidQueryShape` if `slot` is not a slot.
    pub fn slot_domain(&self, slot: ElementId, include_ancestors: bool) -> Result<Vec<ElementId>> {
        self.domain_range
            .slot_domain(&self.graph, &self.closure, slot, include_ancestors)
    }

    /// Range of a slot
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::InvalidQueryShape` if `slot` is not a slot.
    pub fn slot_range(&self, slot: ElementId, include_ancestors: bool) -> Result<Vec<ElementId>> {
        self.domain_range
            .slot_range(&self.graph, &self.closure, slot, include_ancestors)
    }

    /// Slots whose domain contains the class (or an ancestor)
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::InvalidQueryShape` if `class` is not a class.
    pub fn slots_with_class_domain(
        &self,
        class: ElementId,
        check_ancestors: bool,
    ) -> Result<Vec<ElementId>> {
        self.domain_range
            .slots_with_class_domain(&self.graph, &self.closure, class, check_ancestors)
    }

    /// Slots whose range is the class (or an ancestor)
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::InvalidQueryShape` if `class` is not a class.
    pub fn slots_with_class_range(
        &self,
        class: ElementId,
        check_ancestors: bool,
    ) -> Result<Vec<ElementId>> {
        self.domain_range
            .slots_with_class_range(&self.graph, &self.closure, class, check_ancestors)
    }

    /// Predicates among [`Self::slots_with_class_domain`]
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::InvalidQueryShape` if `class` is not a class.
    pub fn predicates_with_class_domain(
        &self,
        class: ElementId,
        check_ancestors: bool,
    ) -> Result<Vec<ElementId>> {
        self.slots_with_class_domain(class, check_ancestors)
            .map(|slots| self.only(slots, true))
    }

    /// Predicates among [`Self::slots_with_class_range`]
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::InvalidQueryShape` if `class` is not a class.
    pub fn predicates_with_class_range(
        &self,
        class: ElementId,
        check_ancestors: bool,
    ) -> Result<Vec<ElementId>> {
        self.slots_with_class_range(class, check_ancestors)
            .map(|slots| self.only(slots, true))
    }

    /// Non-predicate slots among [`Self::slots_with_class_domain`]
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::InvalidQueryShape` if `class` is not a class.
    pub fn properties_with_class_domain(
        &self,
        class: ElementId,
        check_ancestors: bool,
    ) -> Result<Vec<ElementId>> {
        self.slots_with_class_domain(class, check_ancestors)
            .map(|slots| self.only(slots, false))
    }

    /// Non-predicate slots among [`Self::slots_with_class_range`]
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::InvalidQueryShape` if `class` is not a class.
    pub fn properties_with_class_range(
        &self,
        class: ElementId,
        check_ancestors: bool,
    ) -> Result<Vec<ElementId>> {
        self.slots_with_class_range(class, check_ancestors)
            .map(|slots| self.only(slots, false))
    }

    /// Value type of a slot
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::InvalidQueryShape` if `slot` is not a slot or
    /// its values have no primitive type.
    pub fn value_type_for_slot(&self, slot: ElementId) -> Result<ElementId> {
        self.domain_range.value_type(&self.graph, slot)
    }

    /// Range of a slot as used by a class
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::InvalidQueryShape` if the arguments are not a
    /// class and a slot.
    pub fn slot_range_in_class(
        &self,
        class: ElementId,
        slot: ElementId,
        include_ancestors: bool,
    ) -> Result<Vec<ElementId>> {
        self.domain_range.slot_range_in_class(
            &self.graph,
            &self.closure,
            class,
            slot,
            include_ancestors,
        )
    }

    fn only(&self, slots: Vec<ElementId>, predicates: bool) -> Vec<ElementId> {
        slots
            .into_iter()
            .filter(|slot| self.partitions.is_predicate(*slot) == predicates)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biolink_toolkit_core::types::{ClassDefinition, SlotDefinition, TypeDefinition};
    use pretty_assertions::assert_eq;

    fn schema() -> SchemaDefinition {
        let yaml = r"
id: https://example.org/mini
name: mini
classes:
  entity: {}
  named thing:
    is_a: entity
  association:
    is_a: entity
slots:
  related to:
    domain: named thing
    range: named thing
  name:
    domain: named thing
    range: string
types:
  string:
    typeof: str
  uriorcurie:
    typeof: str
";
        serde_yaml::from_str(yaml).expect("valid yaml")
    }

    #[test]
    fn test_build_and_lookup() -> anyhow::Result<()> {
        let index = SchemaIndex::build(&schema(), ToolkitConfig::default())?;

        let id = index.lookup("Named_Thing")?;
        assert_eq!(index.name(id).as_str(), "named thing");
        assert_eq!(index.display_name(id), "biolink:NamedThing");
        assert!(matches!(
            index.lookup("missing"),
            Err(ToolkitError::NotFound(name)) if name == "missing"
        ));

        let stats = index.stats();
        assert_eq!(stats.elements, 7);
        assert_eq!((stats.classes, stats.slots, stats.types), (3, 2, 2));
        assert_eq!(serde_json::to_value(stats)?["mappings"], 0);
        Ok(())
    }

    #[test]
    fn test_predicate_and_property_filters() -> anyhow::Result<()> {
        let index = SchemaIndex::build(&schema(), ToolkitConfig::default())?;
        let named_thing = index.lookup("named thing")?;
        let names = |ids: Vec<ElementId>| -> Vec<String> {
            ids.into_iter().map(|id| index.name(id).to_string()).collect()
        };

        assert_eq!(
            names(index.predicates_with_class_domain(named_thing, false)?),
            vec!["related to"]
        );
        assert_eq!(
            names(index.properties_with_class_domain(named_thing, false)?),
            vec!["name"]
        );
        assert_eq!(
            names(index.properties_with_class_range(named_thing, false)?),
            Vec::<String>::new()
        );
        Ok(())
    }

    #[test]
    fn test_eager_descendants() -> anyhow::Result<()> {
        let mut config = ToolkitConfig::default();
        config.index.eager_descendants = true;
        let index = SchemaIndex::build(&schema(), config)?;
        assert_eq!(index.stats().memoized_descendants, 7);
        Ok(())
    }

    #[test]
    fn test_defects_reported_together() {
        let mut schema = SchemaDefinition::default();
        schema.classes.insert(
            "gene".into(),
            ClassDefinition {
                is_a: Some("named thing".into()),
                ..Default::default()
            },
        );
        schema.slots.insert(
            "name".into(),
            SlotDefinition {
                range: Some("string".into()),
                ..Default::default()
            },
        );
        schema.types.insert("uriorcurie".into(), TypeDefinition::default());

        let err = SchemaIndex::build(&schema, ToolkitConfig::default()).unwrap_err();
        // two dangling references plus four missing roots
        assert_eq!(err.defects().len(), 6);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ToolkitConfig::default();
        config.naming.prefix = String::new();
        let err = SchemaIndex::build(&schema(), config).unwrap_err();
        assert!(matches!(err, ToolkitError::ConfigError(_)));
    }
}
