//! Ancestor and descendant closure over the is-a/mixin DAG
//!
//! Ancestor lists are computed for every element while the index is built.
//! Descendant lists are computed on first request and memoized; two readers
//! racing on the same element may both compute it, and the first published
//! list wins.

use dashmap::DashMap;
use rayon::prelude::*;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use super::graph::{ElementId, SchemaGraph};

/// Closure engine over one schema graph
#[derive(Debug)]
pub struct ClosureEngine {
    ancestors: Vec<Arc<[ElementId]>>,
    descendants: DashMap<ElementId, Arc<[ElementId]>>,
}

impl ClosureEngine {
    /// Compute ancestor lists for every element in parallel
    #[must_use]
    pub fn build(graph: &SchemaGraph) -> Self {
        let ancestors: Vec<Arc<[ElementId]>> = graph
            .ids()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|id| -> Arc<[ElementId]> {
                Arc::from(breadth_first(id, |node| graph.parents(node)))
            })
            .collect();

        Self {
            ancestors,
            descendants: DashMap::new(),
        }
    }

    /// Fill the descendant memo for every element
    pub fn precompute_descendants(&self, graph: &SchemaGraph) {
        graph
            .ids()
            .collect::<Vec<_>>()
            .into_par_iter()
            .for_each(|id| {
                self.descendants_of(graph, id);
            });
    }

    /// Proper ancestors in breadth-first order, nearest first
    #[must_use]
    pub fn ancestors_of(&self, id: ElementId) -> Arc<[ElementId]> {
        Arc::clone(&self.ancestors[id.index()])
    }

    /// Proper descendants in breadth-first order, nearest first
    pub fn descendants_of(&self, graph: &SchemaGraph, id: ElementId) -> Arc<[ElementId]> {
        if let Some(cached) = self.descendants.get(&id) {
            return Arc::clone(cached.value());
        }

        let computed: Arc<[ElementId]> = Arc::from(breadth_first(id, |node| graph.children(node)));
        Arc::clone(self.descendants.entry(id).or_insert(computed).value())
    }

    /// Ancestors, with the element itself first when `reflexive`
    #[must_use]
    pub fn ancestors(&self, id: ElementId, reflexive: bool) -> Vec<ElementId> {
        with_self(id, &self.ancestors_of(id), reflexive)
    }

    /// Descendants, with the element itself first when `reflexive`
    pub fn descendants(&self, graph: &SchemaGraph, id: ElementId, reflexive: bool) -> Vec<ElementId> {
        with_self(id, &self.descendants_of(graph, id), reflexive)
    }

    /// Whether `id` is `ancestor` or descends from it
    #[must_use]
    pub fn descends_from(&self, id: ElementId, ancestor: ElementId) -> bool {
        id == ancestor || self.ancestors[id.index()].contains(&ancestor)
    }

    /// Number of memoized descendant lists
    #[must_use]
    pub fn memoized(&self) -> usize {
        self.descendants.len()
    }
}

fn with_self(id: ElementId, closure: &[ElementId], reflexive: bool) -> Vec<ElementId> {
    let mut out = Vec::with_capacity(closure.len() + usize::from(reflexive));
    if reflexive {
        out.push(id);
    }
    out.extend_from_slice(closure);
    out
}

/// Breadth-first walk from `start`, excluding it; each node is visited once
fn breadth_first<'g, F>(start: ElementId, next: F) -> Vec<ElementId>
where
    F: Fn(ElementId) -> &'g [ElementId],
{
    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    let mut order = Vec::new();

    while let Some(node) = queue.pop_front() {
        for &neighbour in next(node) {
            if visited.insert(neighbour) {
                order.push(neighbour);
                queue.push_back(neighbour);
            }
        }
    }

    order
}
