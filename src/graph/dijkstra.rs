//! Single-pair shortest paths with Dijkstra's algorithm

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use tracing::trace;

use super::edge::{Edge, INF};
use super::errors::{GraphError, GraphResult};

/// Path from source to destination, inclusive, and its total distance.
///
/// An unreachable destination gives an empty path with distance [`INF`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPath<T> {
    pub path: Vec<T>,
    pub distance: u64,
}

impl<T> ShortestPath<T> {
    fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            distance: INF,
        }
    }

    /// Whether a path was found
    pub fn is_reachable(&self) -> bool {
        self.distance != INF
    }
}

#[derive(Copy, Clone, Eq, PartialEq)]
struct State {
    cost: u64,
    position: usize,
}

// Min-heap on cost; ties pop the lower node index first.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest-path solver over a fixed edge list.
///
/// Nodes are numbered by first appearance across `[from, to]` of each edge.
/// The adjacency lists are built once and reused by every `calculate` call.
#[derive(Debug, Clone)]
pub struct DijkstraShortestPath<T> {
    nodes: Vec<T>,
    node_index: HashMap<T, usize>,
    edges: Vec<Edge<T>>,
    /// Per node: `(target node, edge position)`
    adjacency: Vec<Vec<(usize, usize)>>,
}

impl<T> DijkstraShortestPath<T>
where
    T: Clone + Eq + Hash + Debug,
{
    pub fn new(edges: Vec<Edge<T>>) -> Self {
        let mut nodes = Vec::new();
        let mut node_index = HashMap::new();
        let mut intern = |node: &T| -> usize {
            *node_index.entry(node.clone()).or_insert_with(|| {
                nodes.push(node.clone());
                nodes.len() - 1
            })
        };

        let mut endpoints = Vec::with_capacity(edges.len());
        for edge in &edges {
            let from = intern(&edge.from);
            let to = intern(&edge.to);
            endpoints.push((from, to));
        }

        let mut adjacency = vec![Vec::new(); nodes.len()];
        for (position, (from, to)) in endpoints.into_iter().enumerate() {
            adjacency[from].push((to, position));
        }

        Self {
            nodes,
            node_index,
            edges,
            adjacency,
        }
    }

    /// Number of distinct nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Shortest path using each edge's own distance.
    ///
    /// Edges whose distance is [`INF`] are treated as disconnected.
    pub fn calculate(&self, src: &T, dst: &T) -> GraphResult<ShortestPath<T>> {
        self.search(src, dst, |edge| Ok(edge.distance))
    }

    /// Shortest path with distances computed by `dist_fn`.
    ///
    /// `dist_fn` returns `None` to treat an edge as disconnected. Fails with
    /// `NegativeDistance` as soon as the search relaxes an edge for which
    /// `dist_fn` returns a negative value.
    pub fn calculate_with<F>(&self, src: &T, dst: &T, dist_fn: F) -> GraphResult<ShortestPath<T>>
    where
        F: Fn(&Edge<T>) -> Option<i64>,
    {
        self.search(src, dst, |edge| {
            let Some(distance) = dist_fn(edge) else {
                return Ok(INF);
            };
            u64::try_from(distance).map_err(|_| GraphError::NegativeDistance {
                from: format!("{:?}", edge.from),
                to: format!("{:?}", edge.to),
                distance,
            })
        })
    }

    fn search<F>(&self, src: &T, dst: &T, dist_fn: F) -> GraphResult<ShortestPath<T>>
    where
        F: Fn(&Edge<T>) -> GraphResult<u64>,
    {
        let src = *self
            .node_index
            .get(src)
            .ok_or_else(|| GraphError::InvalidSource(format!("{:?}", src)))?;
        let dst = *self
            .node_index
            .get(dst)
            .ok_or_else(|| GraphError::InvalidDestination(format!("{:?}", dst)))?;

        let n = self.nodes.len();
        let mut distances = vec![INF; n];
        let mut previous: Vec<Option<usize>> = vec![None; n];
        let mut heap = BinaryHeap::new();

        distances[src] = 0;
        heap.push(State {
            cost: 0,
            position: src,
        });

        while let Some(State { cost, position }) = heap.pop() {
            if position == dst {
                break;
            }
            if cost > distances[position] {
                continue;
            }

            for &(next, edge) in &self.adjacency[position] {
                let weight = dist_fn(&self.edges[edge])?;
                if weight == INF {
                    continue;
                }
                let candidate = cost.saturating_add(weight);
                if candidate < distances[next] {
                    distances[next] = candidate;
                    previous[next] = Some(position);
                    heap.push(State {
                        cost: candidate,
                        position: next,
                    });
                }
            }
        }

        if distances[dst] == INF {
            trace!(src, dst, "destination unreachable");
            return Ok(ShortestPath::unreachable());
        }

        Ok(ShortestPath {
            path: self.path_to(dst, &previous),
            distance: distances[dst],
        })
    }

    fn path_to(&self, dst: usize, previous: &[Option<usize>]) -> Vec<T> {
        let mut path = Vec::new();
        let mut node = Some(dst);
        while let Some(current) = node {
            path.push(self.nodes[current].clone());
            node = previous[current];
        }
        path.reverse();
        path
    }
}
