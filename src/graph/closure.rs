//! All-pairs distances and transitive closure via Floyd–Warshall

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use super::edge::{nodes_from_edges, Edge, INF};

/// One reachable `(parent, child)` pair and its shortest distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitiveClosure<T> {
    pub parent: T,
    pub child: T,
    pub distance: u64,
}

/// Shortest distance between every ordered pair of `n` nodes.
///
/// `edges` are `(from, to, distance)` over node indices `0..n`. Parallel edges
/// keep the shortest distance. The diagonal is 0 and unreachable pairs hold
/// [`INF`]; sums involving `INF` stay `INF`.
///
/// # Panics
///
/// Panics if an edge index is not below `n`.
pub fn distance_matrix(n: usize, edges: &[(usize, usize, u64)]) -> Vec<Vec<u64>> {
    let mut dm = vec![vec![INF; n]; n];
    for &(from, to, distance) in edges {
        dm[from][to] = dm[from][to].min(distance);
    }
    for (i, row) in dm.iter_mut().enumerate() {
        row[i] = 0;
    }

    for k in 0..n {
        for from in 0..n {
            let via = dm[from][k];
            if via == INF {
                continue;
            }
            for to in 0..n {
                let candidate = via.saturating_add(dm[k][to]);
                if candidate < dm[from][to] {
                    dm[from][to] = candidate;
                }
            }
        }
    }
    dm
}

/// Every finite entry of `dm` as a closure pair, row-major, self pairs
/// included.
pub fn closure_from_matrix<T: Clone>(nodes: &[T], dm: &[Vec<u64>]) -> Vec<TransitiveClosure<T>> {
    let mut closure = Vec::new();
    for (from, row) in dm.iter().enumerate() {
        for (to, &distance) in row.iter().enumerate() {
            if distance == INF {
                continue;
            }
            closure.push(TransitiveClosure {
                parent: nodes[from].clone(),
                child: nodes[to].clone(),
                distance,
            });
        }
    }
    closure
}

/// Transitive closure of the graph formed by `edges`, over the nodes
/// returned by [`nodes_from_edges`].
pub fn transitive_closure<T: Clone + Eq + Hash>(edges: &[Edge<T>]) -> Vec<TransitiveClosure<T>> {
    let nodes = nodes_from_edges(edges);
    let node_index: HashMap<&T, usize> = nodes.iter().enumerate().map(|(i, n)| (n, i)).collect();
    let indexed: Vec<(usize, usize, u64)> = edges
        .iter()
        .map(|e| (node_index[&e.from], node_index[&e.to], e.distance))
        .collect();

    let dm = distance_matrix(nodes.len(), &indexed);
    closure_from_matrix(&nodes, &dm)
}
