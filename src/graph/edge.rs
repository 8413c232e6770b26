//! Weighted directed edges

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize, Serializer};

/// Distance marking an edge as disconnected, and an unreachable destination.
pub const INF: u64 = u64::MAX;

/// A directed edge `from -> to` with a non-negative distance.
///
/// Serializes as a `[from, to, distance]` triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "(T, T, u64)")]
pub struct Edge<T> {
    pub from: T,
    pub to: T,
    pub distance: u64,
}

impl<T> Edge<T> {
    pub fn new(from: T, to: T, distance: u64) -> Self {
        Self { from, to, distance }
    }
}

impl<T> From<(T, T, u64)> for Edge<T> {
    fn from((from, to, distance): (T, T, u64)) -> Self {
        Self::new(from, to, distance)
    }
}

impl<T: Serialize> Serialize for Edge<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.from, &self.to, self.distance).serialize(serializer)
    }
}

/// Distinct nodes of `edges`: every source in edge order, then every target,
/// keeping the first appearance of each node.
pub fn nodes_from_edges<T: Clone + Eq + Hash>(edges: &[Edge<T>]) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut nodes = Vec::new();
    let sources = edges.iter().map(|e| &e.from);
    let targets = edges.iter().map(|e| &e.to);
    for node in sources.chain(targets) {
        if seen.insert(node) {
            nodes.push(node.clone());
        }
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_before_targets() {
        let edges = vec![Edge::new("a", "b", 1), Edge::new("c", "a", 1)];
        assert_eq!(nodes_from_edges(&edges), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_edge_serializes_as_triple() {
        let edge = Edge::new("a".to_string(), "b".to_string(), 3);
        let json = serde_json::to_string(&edge).unwrap();
        assert_eq!(json, r#"["a","b",3]"#);
        let back: Edge<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, edge);
    }
}
