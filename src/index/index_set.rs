//! Opaque sets of internal record indices returned by index lookups.

use std::borrow::Cow;
use std::ops::Range;
use std::slice;

use super::sorted::contains_sorted;

/// A set of internal indices, answered without touching records.
///
/// `All` is a synthetic `0..len` range and never allocates. `Postings`
/// borrows a posting list for single-field lookups and owns the result of a
/// multi-field intersection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSet<'a> {
    /// No matches
    Empty,
    /// Every record position in `0..len`
    All(usize),
    /// Ascending, duplicate-free positions
    Postings(Cow<'a, [usize]>),
}

impl<'a> IndexSet<'a> {
    /// Wrap a sorted, duplicate-free slice.
    pub fn from_sorted(sorted: &'a [usize]) -> Self {
        if sorted.is_empty() {
            IndexSet::Empty
        } else {
            IndexSet::Postings(Cow::Borrowed(sorted))
        }
    }

    /// Wrap an owned sorted, duplicate-free vector.
    pub fn from_sorted_vec(sorted: Vec<usize>) -> Self {
        if sorted.is_empty() {
            IndexSet::Empty
        } else {
            IndexSet::Postings(Cow::Owned(sorted))
        }
    }

    /// Membership test. O(1) for `All`, O(log n) for postings.
    pub fn contains(&self, index: usize) -> bool {
        match self {
            IndexSet::Empty => false,
            IndexSet::All(len) => index < *len,
            IndexSet::Postings(p) => contains_sorted(p, index),
        }
    }

    /// Number of indices in the set
    pub fn len(&self) -> usize {
        match self {
            IndexSet::Empty => 0,
            IndexSet::All(len) => *len,
            IndexSet::Postings(p) => p.len(),
        }
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this set covers a whole store of `store_len` records.
    pub fn is_all(&self, store_len: usize) -> bool {
        self.len() == store_len
    }

    /// Iterate indices in ascending order
    pub fn iter(&self) -> IndexSetIter<'_> {
        match self {
            IndexSet::Empty => IndexSetIter::Range(0..0),
            IndexSet::All(len) => IndexSetIter::Range(0..*len),
            IndexSet::Postings(p) => IndexSetIter::Slice(p.iter()),
        }
    }

    /// Collect into an owned vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }

    /// Detach from the borrowed posting list
    pub fn into_owned(self) -> IndexSet<'static> {
        match self {
            IndexSet::Empty => IndexSet::Empty,
            IndexSet::All(len) => IndexSet::All(len),
            IndexSet::Postings(p) => IndexSet::Postings(Cow::Owned(p.into_owned())),
        }
    }
}

/// Iterator over an [`IndexSet`].
#[derive(Debug, Clone)]
pub enum IndexSetIter<'s> {
    Range(Range<usize>),
    Slice(slice::Iter<'s, usize>),
}

impl Iterator for IndexSetIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            IndexSetIter::Range(r) => r.next(),
            IndexSetIter::Slice(s) => s.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            IndexSetIter::Range(r) => r.size_hint(),
            IndexSetIter::Slice(s) => s.size_hint(),
        }
    }
}

impl ExactSizeIterator for IndexSetIter<'_> {}

impl<'s> IntoIterator for &'s IndexSet<'_> {
    type Item = usize;
    type IntoIter = IndexSetIter<'s>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
