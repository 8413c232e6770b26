//! Inverted index map
//!
//! Stores records in an append-only vector and maintains one posting tree
//! per indexed field.
//!
//! # API
//!
//! - `add(record)` - Insert, or overwrite the record with the same primary key
//! - `get(key)` - Exact primary key lookup
//! - `query_index_set(query)` - Matching internal indices, no records touched
//! - `query(query, filter)` - Matching records in internal-index order
//! - `count(query, filter)` - Number of matching records
//!
//! # Invariants
//!
//! - A record's internal index never changes and is never reused
//! - Every record appears in exactly one posting list per indexed field,
//!   the one for its current value
//! - Posting lists are sorted ascending

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use tracing::trace;

use super::errors::{IndexError, IndexResult};
use super::index_set::IndexSet;
use super::key::IndexKey;
use super::postings::PostingTree;
use super::query::IndexQuery;
use super::sorted::intersect_sorted;
use crate::config::IndexConfig;

/// Derives a record's primary key
pub type KeyFn<R> = Box<dyn Fn(&R) -> String>;

/// Reads one field of a record as an index key
pub type FieldAccessor<R> = Box<dyn Fn(&R) -> IndexKey>;

/// A named field accessor, one entry of the accessor table.
pub struct IndexedField<R> {
    name: String,
    accessor: FieldAccessor<R>,
}

impl<R> IndexedField<R> {
    /// Create an indexed field from a name and an accessor
    pub fn new(name: impl Into<String>, accessor: impl Fn(&R) -> IndexKey + 'static) -> Self {
        Self {
            name: name.into(),
            accessor: Box::new(accessor),
        }
    }

    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<R> fmt::Debug for IndexedField<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedField").field("name", &self.name).finish()
    }
}

struct FieldIndex<R> {
    field: IndexedField<R>,
    postings: PostingTree,
}

/// Indexed fields ranked by cardinality, recomputed lazily.
#[derive(Debug)]
struct FieldOrder {
    /// Positions into `InvertedIndexMap::fields`, smallest cardinality first
    ranking: Vec<usize>,
    stale: bool,
}

/// In-memory record store with a primary key and per-field inverted indexes.
pub struct InvertedIndexMap<R> {
    key_fn: KeyFn<R>,
    fields: Vec<FieldIndex<R>>,
    /// Field name -> position in `fields`
    field_positions: HashMap<String, usize>,
    /// Primary key -> internal index
    primary: HashMap<String, usize>,
    records: Vec<R>,
    order: RefCell<FieldOrder>,
}

impl<R> InvertedIndexMap<R> {
    /// Create a map from a key function and an accessor table.
    ///
    /// When two accessors share a name the first one is kept.
    pub fn new<I>(key_fn: impl Fn(&R) -> String + 'static, fields: I) -> Self
    where
        I: IntoIterator<Item = IndexedField<R>>,
    {
        let mut indexes = Vec::new();
        let mut field_positions = HashMap::new();
        for field in fields {
            if field_positions.contains_key(&field.name) {
                continue;
            }
            field_positions.insert(field.name.clone(), indexes.len());
            indexes.push(FieldIndex {
                field,
                postings: PostingTree::new(),
            });
        }

        let ranking = (0..indexes.len()).collect();
        Self {
            key_fn: Box::new(key_fn),
            fields: indexes,
            field_positions,
            primary: HashMap::new(),
            records: Vec::new(),
            order: RefCell::new(FieldOrder {
                ranking,
                stale: true,
            }),
        }
    }

    /// Insert a record, or overwrite the stored record with the same key.
    ///
    /// On overwrite the internal index is kept and only the postings of
    /// fields whose value changed are moved.
    pub fn add(&mut self, record: R) {
        let key = (self.key_fn)(&record);

        match self.primary.get(&key).copied() {
            Some(index) => {
                let existing = &self.records[index];
                let mut changed = 0usize;
                for field in &mut self.fields {
                    let old_value = (field.field.accessor)(existing);
                    let new_value = (field.field.accessor)(&record);
                    if old_value == new_value {
                        continue;
                    }
                    field.postings.remove(&old_value, index);
                    field.postings.insert(new_value, index);
                    changed += 1;
                }
                trace!(key = %key, index, changed, "record updated");
                self.records[index] = record;
            }
            None => {
                let index = self.records.len();
                for field in &mut self.fields {
                    let value = (field.field.accessor)(&record);
                    field.postings.insert(value, index);
                }
                self.primary.insert(key, index);
                self.records.push(record);
                trace!(index, "record inserted");
            }
        }

        self.order.get_mut().stale = true;
    }

    /// Lookup a record by primary key.
    pub fn get(&self, key: &str) -> Option<&R> {
        self.primary.get(key).map(|&index| &self.records[index])
    }

    /// Internal index of a primary key
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.primary.get(key).copied()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the map holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in internal-index order
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Indexed field names in configured order
    pub fn indexed_fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|f| f.field.name())
    }

    /// Number of distinct values currently held by an indexed field
    pub fn cardinality(&self, field: &str) -> Option<usize> {
        self.field_index(field).map(|f| f.postings.key_count())
    }

    /// Raw posting list of `field` for `value`, sorted ascending
    pub fn postings(&self, field: &str, value: &IndexKey) -> Option<&[usize]> {
        self.field_index(field).and_then(|f| f.postings.get(value))
    }

    /// Posting tree of an indexed field
    pub fn posting_tree(&self, field: &str) -> Option<&PostingTree> {
        self.field_index(field).map(|f| &f.postings)
    }

    /// Indexed fields in intersection order, most selective first.
    pub fn field_order(&self) -> Vec<&str> {
        self.refresh_field_order();
        let order = self.order.borrow();
        order
            .ranking
            .iter()
            .map(|&pos| self.fields[pos].field.name())
            .collect()
    }

    fn field_index(&self, field: &str) -> Option<&FieldIndex<R>> {
        self.field_positions.get(field).map(|&pos| &self.fields[pos])
    }

    fn refresh_field_order(&self) {
        let mut order = self.order.borrow_mut();
        if !order.stale {
            return;
        }
        let fields = &self.fields;
        order
            .ranking
            .sort_by_key(|&pos| fields[pos].postings.key_count());
        order.stale = false;
        trace!(fields = order.ranking.len(), "field order recomputed");
    }

    /// Resolve a partial query to the set of matching internal indices.
    ///
    /// - No constraining field: every record (`IndexSet::All`)
    /// - One constraining field: its posting list, borrowed
    /// - Several: posting lists intersected smallest-cardinality first
    ///
    /// A field constrains only if it is indexed and given a value, so a query
    /// on a single unindexed field returns every record, and unindexed fields
    /// mixed with indexed ones are ignored.
    pub fn query_index_set(&self, query: &IndexQuery) -> IndexSet<'_> {
        let constraining: Vec<(usize, &IndexKey)> = query
            .iter()
            .filter_map(|(name, value)| {
                let pos = *self.field_positions.get(name)?;
                Some((pos, value?))
            })
            .collect();

        match constraining.as_slice() {
            [] => IndexSet::All(self.records.len()),
            [(pos, value)] => match self.fields[*pos].postings.get(value) {
                Some(postings) => IndexSet::from_sorted(postings),
                None => IndexSet::Empty,
            },
            _ => self.intersect(&constraining),
        }
    }

    fn intersect(&self, constraining: &[(usize, &IndexKey)]) -> IndexSet<'static> {
        self.refresh_field_order();
        let order = self.order.borrow();

        let mut intersected: Option<Vec<usize>> = None;
        for &pos in &order.ranking {
            let Some(&(_, value)) = constraining.iter().find(|(p, _)| *p == pos) else {
                continue;
            };
            let postings = match self.fields[pos].postings.get(value) {
                Some(p) if !p.is_empty() => p,
                _ => {
                    trace!(field = self.fields[pos].field.name(), "no postings, short-circuit");
                    return IndexSet::Empty;
                }
            };
            let next = match intersected {
                None => postings.to_vec(),
                Some(acc) => intersect_sorted(&acc, postings),
            };
            if next.is_empty() {
                trace!(field = self.fields[pos].field.name(), "empty intersection, short-circuit");
                return IndexSet::Empty;
            }
            intersected = Some(next);
        }

        IndexSet::from_sorted_vec(intersected.unwrap_or_default())
    }

    /// Matching records in internal-index order, optionally filtered.
    pub fn query(&self, query: &IndexQuery, filter: Option<&dyn Fn(&R) -> bool>) -> Vec<&R> {
        let matched = self.query_index_set(query);
        if matched.is_empty() {
            return Vec::new();
        }

        let keep = |r: &&R| filter.map_or(true, |f| f(*r));
        if matched.is_all(self.records.len()) {
            return self.records.iter().filter(keep).collect();
        }

        matched
            .iter()
            .map(|index| &self.records[index])
            .filter(keep)
            .collect()
    }

    /// Number of matching records. Unfiltered counts never touch records.
    pub fn count(&self, query: &IndexQuery, filter: Option<&dyn Fn(&R) -> bool>) -> usize {
        let matched = self.query_index_set(query);
        if matched.is_empty() {
            return 0;
        }

        let Some(filter) = filter else {
            return matched.len();
        };

        if matched.is_all(self.records.len()) {
            return self.records.iter().filter(|r| filter(*r)).count();
        }

        matched
            .iter()
            .filter(|&index| filter(&self.records[index]))
            .count()
    }
}

impl<R> fmt::Debug for InvertedIndexMap<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvertedIndexMap")
            .field("records", &self.records.len())
            .field("fields", &self.indexed_fields().collect::<Vec<_>>())
            .finish()
    }
}

/// Primary key of a JSON record: strings as-is, numbers and booleans in
/// their JSON text. Null, missing, arrays and objects have no key.
pub fn json_primary_key(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) => Some(s.clone()),
        v @ (Value::Number(_) | Value::Bool(_)) => Some(v.to_string()),
        _ => None,
    }
}

impl InvertedIndexMap<Value> {
    /// Map over JSON objects keyed by `primary_key`, indexing `fields`.
    ///
    /// A missing field indexes as `IndexKey::Null`. Numbers are keyed by
    /// value, so `30` and `30.0` share a posting list.
    ///
    /// The key function cannot fail: a record without a usable primary key
    /// is stored under the empty key, and every such record passed to `add`
    /// overwrites the previous one. Use [`InvertedIndexMap::try_add_json`]
    /// to reject those records instead.
    pub fn json<I, S>(primary_key: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key_field = primary_key.to_string();
        let accessors = fields.into_iter().map(|name| {
            let name: String = name.into();
            let lookup = name.clone();
            IndexedField::new(name, move |record: &Value| {
                record.get(lookup.as_str()).map_or(IndexKey::Null, IndexKey::from_json)
            })
        });
        Self::new(
            move |record: &Value| json_primary_key(record, &key_field).unwrap_or_default(),
            accessors,
        )
    }

    /// Build a JSON map from a loaded configuration
    pub fn from_config(config: &IndexConfig) -> Self {
        Self::json(&config.primary_key, config.indexed_fields.iter().cloned())
    }

    /// Add a JSON record after checking that its primary key is derivable.
    pub fn try_add_json(&mut self, record: Value, primary_key: &str) -> IndexResult<()> {
        if !record.is_object() {
            return Err(IndexError::NotAnObject);
        }
        if json_primary_key(&record, primary_key).is_none() {
            return Err(IndexError::MissingPrimaryKey(primary_key.to_string()));
        }
        self.add(record);
        Ok(())
    }
}
