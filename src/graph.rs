//! Treasure class reference graph.
//!
//! Treasure classes may name other treasure classes as entries. The
//! `TreasureGraph` holds those references as a directed graph so that
//! catalogs with reference loops are rejected at load time, before any
//! roll can recurse forever.

use crate::code::Code;
use crate::error::ItemError;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// A directed graph of treasure class references.
///
/// An edge `A -> B` means class `A` lists class `B` as one of its entries.
///
/// # Examples
///
/// ```rust
/// use lootstat::graph::TreasureGraph;
/// use lootstat::Code;
///
/// let mut graph = TreasureGraph::new();
/// graph.add_reference(Code::new("Act 1 Good"), Code::new("Act 1 Junk"));
/// assert!(graph.detect_cycles().is_ok());
///
/// graph.add_reference(Code::new("Act 1 Junk"), Code::new("Act 1 Good"));
/// assert!(graph.detect_cycles().is_err());
/// ```
pub struct TreasureGraph {
    graph: DiGraph<Code, ()>,
    node_map: HashMap<Code, NodeIndex>,
}

impl TreasureGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Add a class if it isn't present, returning its node index.
    pub fn add_node(&mut self, code: Code) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&code) {
            idx
        } else {
            let idx = self.graph.add_node(code.clone());
            self.node_map.insert(code, idx);
            idx
        }
    }

    /// Record that `from` lists `to` as an entry.
    pub fn add_reference(&mut self, from: Code, to: Code) {
        let from_idx = self.add_node(from);
        let to_idx = self.add_node(to);
        self.graph.add_edge(from_idx, to_idx, ());
    }

    /// Detect reference loops.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if no loop exists
    /// * `Err(ItemError::TreasureCycle)` with the loop path, closed on its first class
    pub fn detect_cycles(&self) -> Result<(), ItemError> {
        let mut visited = HashSet::new();
        let mut on_path = HashSet::new();

        for node in self.graph.node_indices() {
            if !visited.contains(&node) {
                let mut path = Vec::new();
                if let Some(cycle) = self.find_cycle(node, &mut visited, &mut on_path, &mut path) {
                    return Err(cycle);
                }
            }
        }

        Ok(())
    }

    fn find_cycle(
        &self,
        node: NodeIndex,
        visited: &mut HashSet<NodeIndex>,
        on_path: &mut HashSet<NodeIndex>,
        path: &mut Vec<Code>,
    ) -> Option<ItemError> {
        visited.insert(node);
        on_path.insert(node);
        path.push(self.graph[node].clone());

        for next in self.graph.neighbors_directed(node, Direction::Outgoing) {
            if !visited.contains(&next) {
                if let Some(cycle) = self.find_cycle(next, visited, on_path, path) {
                    return Some(cycle);
                }
            } else if on_path.contains(&next) {
                let entry = self.graph[next].clone();
                let start = path.iter().position(|code| code == &entry).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(entry);
                return Some(ItemError::TreasureCycle { path: cycle });
            }
        }

        on_path.remove(&node);
        path.pop();
        None
    }

    /// The number of classes on the longest reference chain.
    ///
    /// A class with no nested classes has depth 1. An empty graph has depth 0.
    pub fn max_depth(&self) -> Result<usize, ItemError> {
        let order = toposort(&self.graph, None).map_err(|cycle| ItemError::TreasureCycle {
            path: vec![self.graph[cycle.node_id()].clone()],
        })?;

        // Walk leaves first so every child depth is known before its parents.
        let mut depth: HashMap<NodeIndex, usize> = HashMap::new();
        for node in order.into_iter().rev() {
            let deepest_child = self
                .graph
                .neighbors_directed(node, Direction::Outgoing)
                .filter_map(|child| depth.get(&child).copied())
                .max()
                .unwrap_or(0);
            depth.insert(node, deepest_child + 1);
        }

        Ok(depth.values().copied().max().unwrap_or(0))
    }

    /// Classes referenced directly by `code`, in insertion order.
    pub fn references(&self, code: &Code) -> Vec<Code> {
        let Some(&idx) = self.node_map.get(code) else {
            return Vec::new();
        };
        let mut refs: Vec<Code> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|next| self.graph[next].clone())
            .collect();
        // petgraph yields the most recently added edge first
        refs.reverse();
        refs
    }

    pub fn contains_node(&self, code: &Code) -> bool {
        self.node_map.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

impl Default for TreasureGraph {
    fn default() -> Self {
        Self::new()
    }
}
