//! Hierarchical map keyed by label paths
//!
//! # API
//!
//! - `set(path, value)` - Create missing nodes, overwrite terminal value
//! - `get(path)` / `has(path)` - Exact lookup
//! - `get_all(path)` - Every value at or below a subtree
//! - `query(pattern)` - Frontier walk with `PathSegment::Any` wildcards
//! - `delete(path)` - Clear a value and prune emptied nodes bottom-up
//!
//! # Invariants
//!
//! - Below the root, no node is both valueless and childless after `delete`
//! - `len()` equals the number of stored values

use tracing::trace;

use super::node::Node;
use super::path::PathSegment;

/// A trie of string labels with optional values at every node.
#[derive(Debug, Clone)]
pub struct MultiLevelMap<T> {
    root: Node<T>,
    len: usize,
}

impl<T> Default for MultiLevelMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MultiLevelMap<T> {
    /// Creates a new empty map
    pub fn new() -> Self {
        Self {
            root: Node::new(),
            len: 0,
        }
    }

    /// Store `value` at `path`, creating intermediate nodes.
    ///
    /// Returns the value previously stored there.
    pub fn set<S: AsRef<str>>(&mut self, path: &[S], value: T) -> Option<T> {
        let mut node = &mut self.root;
        for label in path {
            node = node
                .children
                .entry(label.as_ref().to_string())
                .or_default();
        }
        let previous = node.value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Value stored exactly at `path`.
    ///
    /// An intermediate node that never received a value is not found.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&T> {
        self.root.descend(path)?.value.as_ref()
    }

    /// Mutable access to the value stored exactly at `path`
    pub fn get_mut<S: AsRef<str>>(&mut self, path: &[S]) -> Option<&mut T> {
        let mut node = &mut self.root;
        for label in path {
            node = node.children.get_mut(label.as_ref())?;
        }
        node.value.as_mut()
    }

    /// Whether a value is stored exactly at `path`
    pub fn has<S: AsRef<str>>(&self, path: &[S]) -> bool {
        self.get(path).is_some()
    }

    /// Every value at or below `path`, in no particular order.
    ///
    /// The empty path addresses the root, i.e. the whole map.
    pub fn get_all<S: AsRef<str>>(&self, path: &[S]) -> Vec<&T> {
        let mut out = Vec::new();
        if let Some(node) = self.root.descend(path) {
            node.collect_values(&mut out);
        }
        out
    }

    /// Every value under the nodes matched by `pattern`.
    ///
    /// Each `Label` narrows the frontier to the matching child of every
    /// frontier node; each `Any` widens it to all of their children. An empty
    /// frontier ends the walk with no results. Values are then collected from
    /// the full subtree of each remaining frontier node.
    pub fn query(&self, pattern: &[PathSegment]) -> Vec<&T> {
        let mut frontier: Vec<&Node<T>> = vec![&self.root];

        for segment in pattern {
            let next: Vec<&Node<T>> = match segment {
                PathSegment::Any => frontier
                    .iter()
                    .flat_map(|node| node.children.values())
                    .collect(),
                PathSegment::Label(label) => frontier
                    .iter()
                    .filter_map(|node| node.children.get(label))
                    .collect(),
            };
            if next.is_empty() {
                return Vec::new();
            }
            frontier = next;
        }

        let mut out = Vec::new();
        for node in frontier {
            node.collect_values(&mut out);
        }
        out
    }

    /// Remove the value at `path` and return it, pruning nodes left empty.
    pub fn remove<S: AsRef<str>>(&mut self, path: &[S]) -> Option<T> {
        let removed = remove_in(&mut self.root, path)?;
        self.len -= 1;
        trace!(depth = path.len(), "value removed");
        Some(removed)
    }

    /// Delete the value at `path`.
    ///
    /// Returns false, changing nothing, if no value is stored there.
    pub fn delete<S: AsRef<str>>(&mut self, path: &[S]) -> bool {
        self.remove(path).is_some()
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no value is stored
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every node
    pub fn clear(&mut self) {
        self.root = Node::new();
        self.len = 0;
    }

    /// Number of labels directly under the root
    pub fn top_level_len(&self) -> usize {
        self.root.children.len()
    }
}

/// Clears the value at `path` below `node`, unlinking each child that is
/// left vacant on the way back up. A child that still holds a value or other
/// children stops the pruning, since every ancestor then keeps a child too.
fn remove_in<T, S: AsRef<str>>(node: &mut Node<T>, path: &[S]) -> Option<T> {
    let Some((label, rest)) = path.split_first() else {
        return node.value.take();
    };
    let label = label.as_ref();
    let child = node.children.get_mut(label)?;
    let removed = remove_in(child, rest)?;
    if child.is_vacant() {
        node.children.remove(label);
    }
    Some(removed)
}

impl<T, S: AsRef<str>> FromIterator<(Vec<S>, T)> for MultiLevelMap<T> {
    fn from_iter<I: IntoIterator<Item = (Vec<S>, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (path, value) in iter {
            map.set(path.as_slice(), value);
        }
        map
    }
}
