//! BTreeMap-based posting lists
//!
//! Each indexed field owns one `PostingTree`: `IndexKey -> Vec<internal index>`.
//! Posting lists are always sorted ascending and never empty; a value whose
//! last record moves away is dropped from the tree, so `key_count()` is the
//! field's current cardinality.

use std::collections::BTreeMap;

use super::key::IndexKey;
use super::sorted::{insert_sorted, remove_sorted};

/// Posting lists for a single field.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PostingTree {
    tree: BTreeMap<IndexKey, Vec<usize>>,
}

impl PostingTree {
    /// Creates a new empty tree
    pub fn new() -> Self {
        Self {
            tree: BTreeMap::new(),
        }
    }

    /// Insert an internal index under a key.
    ///
    /// Keeps ascending order; an updated record may carry an index lower
    /// than entries already present.
    pub fn insert(&mut self, key: IndexKey, index: usize) {
        insert_sorted(self.tree.entry(key).or_default(), index);
    }

    /// Remove an internal index from a key's posting list.
    ///
    /// If the key has no more entries, removes the key entirely.
    pub fn remove(&mut self, key: &IndexKey, index: usize) -> bool {
        let Some(postings) = self.tree.get_mut(key) else {
            return false;
        };
        let removed = remove_sorted(postings, index);
        if postings.is_empty() {
            self.tree.remove(key);
        }
        removed
    }

    /// Posting list for an exact key, sorted ascending.
    pub fn get(&self, key: &IndexKey) -> Option<&[usize]> {
        self.tree.get(key).map(Vec::as_slice)
    }

    /// Returns the number of distinct keys
    pub fn key_count(&self) -> usize {
        self.tree.len()
    }

    /// Returns the total number of postings
    pub fn posting_count(&self) -> usize {
        self.tree.values().map(Vec::len).sum()
    }

    /// Iterate `(key, postings)` in key order
    pub fn iter(&self) -> impl Iterator<Item = (&IndexKey, &[usize])> + '_ {
        self.tree.iter().map(|(k, v)| (k, v.as_slice()))
    }
}
