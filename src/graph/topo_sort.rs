//! Kahn topological sort

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use super::edge::Edge;
use super::errors::{GraphError, GraphResult};

/// Drain order of Kahn's algorithm over `n` nodes given as index pairs.
///
/// Ready nodes sit on a LIFO stack: the initial ones are pushed in index
/// order and the most recently pushed node is emitted first. A result
/// shorter than `n` means the remaining nodes lie on or behind a cycle.
pub(crate) fn kahn_order(n: usize, edges: &[(usize, usize)]) -> Vec<usize> {
    let mut in_degree = vec![0usize; n];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
    for &(from, to) in edges {
        in_degree[to] += 1;
        dependents[from].push(to);
    }

    let mut ready: Vec<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(n);
    while let Some(node) = ready.pop() {
        order.push(node);
        for &child in &dependents[node] {
            in_degree[child] -= 1;
            if in_degree[child] == 0 {
                ready.push(child);
            }
        }
    }
    order
}

/// Order `nodes` so that every edge parent precedes its child.
///
/// Duplicate entries in `nodes` count once, at their first position.
/// Fails if an edge names a node missing from `nodes`, or if the edges
/// contain a cycle.
pub fn topo_sort<T>(nodes: &[T], edges: &[Edge<T>]) -> GraphResult<Vec<T>>
where
    T: Clone + Eq + Hash + Debug,
{
    let mut node_index: HashMap<&T, usize> = HashMap::with_capacity(nodes.len());
    let mut distinct: Vec<&T> = Vec::with_capacity(nodes.len());
    for node in nodes {
        node_index.entry(node).or_insert_with(|| {
            distinct.push(node);
            distinct.len() - 1
        });
    }

    let mut indexed = Vec::with_capacity(edges.len());
    for edge in edges {
        let from = *node_index
            .get(&edge.from)
            .ok_or_else(|| GraphError::UnknownParent(format!("{:?}", edge.from)))?;
        let to = *node_index
            .get(&edge.to)
            .ok_or_else(|| GraphError::UnknownChild(format!("{:?}", edge.to)))?;
        indexed.push((from, to));
    }

    let order = kahn_order(distinct.len(), &indexed);
    if order.len() != distinct.len() {
        debug!(
            nodes = distinct.len(),
            drained = order.len(),
            "topological sort hit a cycle"
        );
        return Err(GraphError::CycleDetected);
    }

    Ok(order.into_iter().map(|i| distinct[i].clone()).collect())
}
