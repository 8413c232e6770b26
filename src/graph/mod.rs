//! Graph algorithms over weighted edge lists
//!
//! Graphs are given as slices of [`Edge`]; nodes are any `Clone + Eq + Hash`
//! value and are discovered from the edges unless listed explicitly.
//!
//! - `has_cycle` - Kahn drain check
//! - `topo_sort` - Kahn order with a LIFO ready stack
//! - `DijkstraShortestPath` - single-pair shortest path, reusable adjacency
//! - `transitive_closure` - Floyd–Warshall over all reachable pairs

mod closure;
mod cycle;
mod dijkstra;
mod edge;
mod errors;
mod topo_sort;

pub use closure::{closure_from_matrix, distance_matrix, transitive_closure, TransitiveClosure};
pub use cycle::has_cycle;
pub use dijkstra::{DijkstraShortestPath, ShortestPath};
pub use edge::{nodes_from_edges, Edge, INF};
pub use errors::{GraphError, GraphResult};
pub use topo_sort::topo_sort;
