//! Name resolution: user input to canonical element
//!
//! Lookup order on the trimmed input, after a known display prefix is
//! stripped: exact name, folded key, alias, compact key. Resolution never
//! formats.

use biolink_toolkit_core::{
    config::ToolkitConfig,
    name::{compact_key, fold_key},
};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::graph::{ElementId, SchemaGraph};

/// Normalizes identifiers to element handles
#[derive(Debug)]
pub struct NameResolver {
    prefixes: Vec<String>,
    folded: HashMap<String, ElementId>,
    aliases: HashMap<String, ElementId>,
    /// `None` marks a compact key shared by several elements
    compact: HashMap<String, Option<ElementId>>,
}

impl NameResolver {
    /// Build lookup tables for a validated graph
    ///
    /// Configured aliases win over schema aliases. A schema alias claimed by
    /// two elements, or one that shadows a canonical name, is dropped.
    #[must_use]
    pub fn build(graph: &SchemaGraph, config: &ToolkitConfig) -> Self {
        let mut folded = HashMap::with_capacity(graph.len());
        let mut compact: HashMap<String, Option<ElementId>> = HashMap::with_capacity(graph.len());

        for id in graph.ids() {
            let name = graph.name(id);
            folded.insert(name.folded_key(), id);
            compact
                .entry(compact_key(name.as_str()))
                .and_modify(|slot| *slot = None)
                .or_insert(Some(id));
        }

        let mut aliases = HashMap::new();
        for (alias, target) in &config.aliases {
            let Some(target) = graph.find(target) else {
                continue;
            };
            let key = fold_key(alias);
            if folded.get(&key).is_some_and(|owner| *owner != target) {
                tracing::warn!(%alias, "configured alias shadows an element name; ignored");
                continue;
            }
            aliases.insert(key, target);
        }
        let configured: Vec<String> = aliases.keys().cloned().collect();

        let mut contested: Vec<String> = Vec::new();
        for id in graph.ids() {
            for alias in graph.element(id).aliases() {
                let key = fold_key(alias);
                if configured.contains(&key) || contested.contains(&key) {
                    continue;
                }
                if folded.get(&key).is_some_and(|owner| *owner != id) {
                    tracing::warn!(
                        %alias,
                        element = %graph.name(id),
                        "alias shadows another element's name; ignored"
                    );
                    continue;
                }
                match aliases.entry(key) {
                    Entry::Vacant(entry) => {
                        entry.insert(id);
                    }
                    Entry::Occupied(entry) if *entry.get() == id => {}
                    Entry::Occupied(entry) => {
                        tracing::warn!(
                            %alias,
                            first = %graph.name(*entry.get()),
                            second = %graph.name(id),
                            "alias claimed by two elements; ignored"
                        );
                        contested.push(entry.remove_entry().0);
                    }
                }
            }
        }

        let mut prefixes = vec![config.naming.prefix.to_lowercase()];
        let type_prefix = config.naming.type_prefix.to_lowercase();
        if !prefixes.contains(&type_prefix) {
            prefixes.push(type_prefix);
        }

        Self {
            prefixes,
            folded,
            aliases,
            compact,
        }
    }

    /// Resolve an identifier to an element handle
    #[must_use]
    pub fn resolve(&self, graph: &SchemaGraph, input: &str) -> Option<ElementId> {
        let name = self.strip_prefix(input.trim());

        if let Some(id) = graph.id(name) {
            return Some(id);
        }
        let key = fold_key(name);
        if let Some(id) = self.folded.get(&key).or_else(|| self.aliases.get(&key)) {
            return Some(*id);
        }
        self.compact.get(&compact_key(name)).copied().flatten()
    }

    /// Number of usable aliases
    #[must_use]
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    fn strip_prefix<'a>(&self, input: &'a str) -> &'a str {
        match input.split_once(':') {
            Some((prefix, rest)) if self.prefixes.contains(&prefix.trim().to_lowercase()) => {
                rest.trim()
            }
            _ => input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biolink_toolkit_core::config::HierarchyRoots;
    use biolink_toolkit_core::types::{
        ClassDefinition, SchemaDefinition, SlotDefinition, TypeDefinition,
    };

    fn fixture(config: &ToolkitConfig) -> (SchemaGraph, NameResolver) {
        let mut schema = SchemaDefinition::default();
        schema.classes.insert(
            "gene".into(),
            ClassDefinition {
                aliases: vec!["locus".into()],
                ..Default::default()
            },
        );
        schema.classes.insert(
            "gene or gene product".into(),
            ClassDefinition::default(),
        );
        schema.classes.insert(
            "RNA product".into(),
            ClassDefinition {
                aliases: vec!["transcript".into(), "gene".into()],
                ..Default::default()
            },
        );
        schema.classes.insert(
            "protein".into(),
            ClassDefinition {
                aliases: vec!["transcript".into()],
                ..Default::default()
            },
        );
        schema.slots.insert(
            "related to".into(),
            SlotDefinition::default(),
        );
        schema.types.insert("uriorcurie".into(), TypeDefinition::default());

        let graph = SchemaGraph::build(&schema, config).expect("valid schema");
        let resolver = NameResolver::build(&graph, config);
        (graph, resolver)
    }

    fn config() -> ToolkitConfig {
        ToolkitConfig {
            roots: HierarchyRoots::none(),
            ..Default::default()
        }
    }

    fn resolved(graph: &SchemaGraph, resolver: &NameResolver, input: &str) -> Option<String> {
        resolver
            .resolve(graph, input)
            .map(|id| graph.name(id).to_string())
    }

    #[test]
    fn test_case_and_separator_folding() {
        let (graph, resolver) = fixture(&config());
        for input in ["gene", "Gene", " GENE ", "rna_product", "RNA Product"] {
            assert!(resolver.resolve(&graph, input).is_some(), "{input}");
        }
        assert_eq!(
            resolved(&graph, &resolver, "related_to").as_deref(),
            Some("related to")
        );
    }

    #[test]
    fn test_formatted_names_resolve() {
        let (graph, resolver) = fixture(&config());
        assert_eq!(
            resolved(&graph, &resolver, "biolink:GeneOrGeneProduct").as_deref(),
            Some("gene or gene product")
        );
        assert_eq!(
            resolved(&graph, &resolver, "biolink:related_to").as_deref(),
            Some("related to")
        );
        assert_eq!(
            resolved(&graph, &resolver, "metatype:Uriorcurie").as_deref(),
            Some("uriorcurie")
        );
        assert_eq!(
            resolved(&graph, &resolver, "BIOLINK:RnaProduct").as_deref(),
            Some("RNA product")
        );
    }

    #[test]
    fn test_aliases() {
        let (graph, resolver) = fixture(&config());
        assert_eq!(resolved(&graph, &resolver, "Locus").as_deref(), Some("gene"));
        // claimed by two elements
        assert_eq!(resolved(&graph, &resolver, "transcript"), None);
        // shadows a canonical name
        assert_eq!(resolved(&graph, &resolver, "gene").as_deref(), Some("gene"));
        assert_eq!(resolver.alias_count(), 1);
    }

    #[test]
    fn test_configured_alias_wins() {
        let mut config = config();
        config
            .aliases
            .insert("transcript".into(), "RNA product".into());
        let (graph, resolver) = fixture(&config);
        assert_eq!(
            resolved(&graph, &resolver, "transcript").as_deref(),
            Some("RNA product")
        );
    }

    #[test]
    fn test_unknown_input() {
        let (graph, resolver) = fixture(&config());
        assert_eq!(resolver.resolve(&graph, "no such thing"), None);
        assert_eq!(resolver.resolve(&graph, ""), None);
        assert_eq!(resolver.resolve(&graph, "SO:0000704"), None);
    }
}
