//! Partial-record queries against an `InvertedIndexMap`

use std::collections::BTreeMap;

use serde_json::Value;

use super::key::IndexKey;

/// A partial record: field name -> wanted value.
///
/// A field mapped to `None` is present but unspecified and never constrains
/// the result. Fields are kept in name order so a query has one canonical
/// form regardless of how it was built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexQuery {
    fields: BTreeMap<String, Option<IndexKey>>,
}

impl IndexQuery {
    /// Empty query, matches every record
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain `field` to equal `value`. Replaces an earlier clause on the
    /// same field.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<IndexKey>) -> Self {
        self.fields.insert(field.into(), Some(value.into()));
        self
    }

    /// Mention `field` without constraining it.
    pub fn unspecified(mut self, field: impl Into<String>) -> Self {
        self.fields.insert(field.into(), None);
        self
    }

    /// In-place variant of [`IndexQuery::eq`] / [`IndexQuery::unspecified`].
    pub fn set(&mut self, field: impl Into<String>, value: Option<IndexKey>) {
        self.fields.insert(field.into(), value);
    }

    /// Build from a JSON object. Each member becomes an equality clause;
    /// JSON `null` matches records whose field is null or missing.
    /// Returns `None` when `value` is not an object.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let fields = object
            .iter()
            .map(|(k, v)| (k.clone(), Some(IndexKey::from_json(v))))
            .collect();
        Some(Self { fields })
    }

    /// Value wanted for `field`, `None` if absent or unspecified
    pub fn get(&self, field: &str) -> Option<&IndexKey> {
        self.fields.get(field).and_then(Option::as_ref)
    }

    /// All `(field, value)` pairs, unspecified ones included
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&IndexKey>)> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Number of fields mentioned, unspecified ones included
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no field is mentioned
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for IndexQuery
where
    K: Into<String>,
    V: Into<IndexKey>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(k, v)| (k.into(), Some(v.into())))
            .collect();
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let q = IndexQuery::new().eq("age", 30).unspecified("name");
        assert_eq!(q.len(), 2);
        assert_eq!(q.get("age"), Some(&IndexKey::Int(30)));
        assert_eq!(q.get("name"), None);
        assert_eq!(q.get("missing"), None);
    }

    #[test]
    fn test_later_clause_replaces_earlier() {
        let q = IndexQuery::new().eq("age", 30).eq("age", 31);
        assert_eq!(q.len(), 1);
        assert_eq!(q.get("age"), Some(&IndexKey::Int(31)));
    }

    #[test]
    fn test_from_json() {
        let q = IndexQuery::from_json(&json!({"category": "books", "price": 15})).unwrap();
        assert_eq!(q.get("category"), Some(&IndexKey::from("books")));
        assert_eq!(q.get("price"), Some(&IndexKey::Int(15)));
        assert!(IndexQuery::from_json(&json!([1, 2])).is_none());
    }

    #[test]
    fn test_from_iter() {
        let q: IndexQuery = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(q.len(), 2);
    }
}
