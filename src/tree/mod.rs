//! Multi-level map subsystem
//!
//! A trie keyed by sequences of string labels. Every node may carry a value,
//! so `["a"]` and `["a", "b"]` can both be set independently.
//!
//! # Queries
//!
//! Patterns are slices of `PathSegment`. A `Label` matches one child by
//! name; `Any` matches every child at that level. All values beneath the
//! nodes reached by the pattern are returned.
//!
//! # Invariants
//!
//! - Each node is exclusively owned by its parent
//! - Deleting the last value in a branch removes the branch

mod map;
mod node;
mod path;

pub use map::MultiLevelMap;
pub use path::{parse_pattern, PathSegment};
