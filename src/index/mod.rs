//! Inverted index subsystem
//!
//! An in-memory record store with a primary key and per-field secondary
//! indexes, queried by partial records.
//!
//! # Design Principles
//!
//! - Explicit accessor tables: each indexed field is a name plus a function
//!   from record to `IndexKey`
//! - Deterministic: BTreeMap posting trees, sorted posting lists
//! - Lazy planning: field order by cardinality is recomputed on the first
//!   multi-field query after a mutation
//!
//! # Invariants
//!
//! - Internal indices are stable and never reused
//! - One posting per record per indexed field
//! - Posting lists sorted ascending, never empty

mod errors;
mod index_set;
mod key;
mod map;
mod postings;
mod query;
pub mod sorted;

pub use errors::{IndexError, IndexResult};
pub use index_set::{IndexSet, IndexSetIter};
pub use key::IndexKey;
pub use map::{json_primary_key, FieldAccessor, IndexedField, InvertedIndexMap, KeyFn};
pub use postings::PostingTree;
pub use query::IndexQuery;
