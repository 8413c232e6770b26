//! Cycle detection for directed graphs

use std::collections::HashMap;
use std::hash::Hash;

use super::edge::{nodes_from_edges, Edge};
use super::topo_sort::kahn_order;

/// Whether the directed graph formed by `edges` contains a cycle.
///
/// Only nodes that appear in some edge are considered. A self-loop is a cycle.
pub fn has_cycle<T: Clone + Eq + Hash>(edges: &[Edge<T>]) -> bool {
    let nodes = nodes_from_edges(edges);
    let node_index: HashMap<&T, usize> = nodes.iter().enumerate().map(|(i, n)| (n, i)).collect();
    let indexed: Vec<(usize, usize)> = edges
        .iter()
        .map(|e| (node_index[&e.from], node_index[&e.to]))
        .collect();
    kahn_order(nodes.len(), &indexed).len() != nodes.len()
}
