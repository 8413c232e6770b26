//! Inverted Index Consistency Tests
//!
//! Tests for index invariants:
//! - Every record sits in exactly one posting list per indexed field
//! - Re-adding an identical record changes no posting list
//! - Query results match a brute-force scan, whatever the clause order
//! - Unindexed fields never narrow a result

use memindex::index::{IndexKey, IndexQuery, IndexSet, IndexedField, InvertedIndexMap};
use proptest::prelude::*;

// =============================================================================
// Helper Functions
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Item {
    id: u8,
    color: u8,
    size: u8,
}

fn items_map() -> InvertedIndexMap<Item> {
    InvertedIndexMap::new(
        |i: &Item| i.id.to_string(),
        vec![
            IndexedField::new("color", |i: &Item| IndexKey::from(i.color as i64)),
            IndexedField::new("size", |i: &Item| IndexKey::from(i.size as i64)),
        ],
    )
}

fn arb_item() -> impl Strategy<Value = Item> {
    (0u8..8, 0u8..3, 0u8..4).prop_map(|(id, color, size)| Item { id, color, size })
}

fn arb_clause() -> impl Strategy<Value = Option<u8>> {
    prop_oneof![Just(None), (0u8..4).prop_map(Some)]
}

fn assert_consistent(map: &InvertedIndexMap<Item>) {
    let fields: [(&str, fn(&Item) -> u8); 2] = [("color", |i| i.color), ("size", |i| i.size)];
    for (field, read) in fields {
        let tree = map.posting_tree(field).unwrap();
        assert_eq!(tree.posting_count(), map.len(), "field {field}");
        for (index, record) in map.records().iter().enumerate() {
            let postings = map
                .postings(field, &IndexKey::from(read(record) as i64))
                .unwrap();
            assert!(postings.binary_search(&index).is_ok(), "field {field} index {index}");
        }
        for (_, postings) in tree.iter() {
            assert!(!postings.is_empty());
            assert!(postings.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    /// One posting per record per field after any sequence of adds.
    #[test]
    fn prop_index_consistency(items in prop::collection::vec(arb_item(), 0..40)) {
        let mut map = items_map();
        for item in items {
            map.add(item);
        }
        assert_consistent(&map);
        prop_assert_eq!(map.cardinality("color").unwrap(), {
            let mut colors: Vec<u8> = map.records().iter().map(|i| i.color).collect();
            colors.sort();
            colors.dedup();
            colors.len()
        });
    }

    /// Re-adding every stored record verbatim is a no-op on the indexes.
    #[test]
    fn prop_readd_is_idempotent(items in prop::collection::vec(arb_item(), 1..30)) {
        let mut map = items_map();
        for item in items {
            map.add(item);
        }
        let color_before = map.posting_tree("color").unwrap().clone();
        let size_before = map.posting_tree("size").unwrap().clone();
        let len_before = map.len();

        let stored: Vec<Item> = map.records().to_vec();
        for item in stored {
            map.add(item);
        }

        prop_assert_eq!(map.posting_tree("color").unwrap(), &color_before);
        prop_assert_eq!(map.posting_tree("size").unwrap(), &size_before);
        prop_assert_eq!(map.len(), len_before);
    }

    /// Index answers equal a full scan, in internal-index order.
    #[test]
    fn prop_query_matches_scan(
        items in prop::collection::vec(arb_item(), 0..40),
        color in arb_clause(),
        size in arb_clause(),
    ) {
        let mut map = items_map();
        for item in items {
            map.add(item);
        }

        let mut forward = IndexQuery::new();
        let mut backward = IndexQuery::new();
        if let Some(c) = color {
            forward = forward.eq("color", c as i64);
        }
        if let Some(s) = size {
            forward = forward.eq("size", s as i64);
            backward = backward.eq("size", s as i64);
        }
        if let Some(c) = color {
            backward = backward.eq("color", c as i64);
        }

        let expected: Vec<&Item> = map
            .records()
            .iter()
            .filter(|i| color.map_or(true, |c| i.color == c))
            .filter(|i| size.map_or(true, |s| i.size == s))
            .collect();

        prop_assert_eq!(map.query(&forward, None), expected.clone());
        prop_assert_eq!(map.query(&backward, None), expected.clone());
        prop_assert_eq!(map.count(&forward, None), expected.len());
    }
}

// =============================================================================
// Unindexed Field Tests
// =============================================================================

/// A lone unindexed field constrains nothing.
#[test]
fn test_single_unindexed_field_returns_all() {
    let mut map = items_map();
    map.add(Item { id: 1, color: 0, size: 0 });
    map.add(Item { id: 2, color: 1, size: 1 });

    let query = IndexQuery::new().eq("weight", 10);
    assert_eq!(map.query_index_set(&query), IndexSet::All(2));
    assert_eq!(map.query(&query, None).len(), 2);
}

/// An unindexed field next to an indexed one is ignored.
#[test]
fn test_unindexed_field_ignored_in_multi_field_query() {
    let mut map = items_map();
    map.add(Item { id: 1, color: 0, size: 0 });
    map.add(Item { id: 2, color: 1, size: 0 });

    let with_unindexed = IndexQuery::new().eq("color", 1).eq("weight", 99);
    let without = IndexQuery::new().eq("color", 1);
    assert_eq!(map.query(&with_unindexed, None), map.query(&without, None));
    assert_eq!(map.count(&with_unindexed, None), 1);
}

/// Updates move postings and keep the internal index.
#[test]
fn test_update_moves_postings() {
    let mut map = items_map();
    map.add(Item { id: 1, color: 0, size: 0 });
    map.add(Item { id: 2, color: 0, size: 1 });
    map.add(Item { id: 1, color: 2, size: 0 });

    assert_eq!(map.index_of("1"), Some(0));
    assert_eq!(map.postings("color", &IndexKey::from(0i64)), Some(&[1usize][..]));
    assert_eq!(map.postings("color", &IndexKey::from(2i64)), Some(&[0usize][..]));
    assert_consistent(&map);
}

/// An older record joining an existing posting list keeps it sorted.
#[test]
fn test_older_record_joins_sorted() {
    let mut map = items_map();
    map.add(Item { id: 1, color: 0, size: 0 });
    map.add(Item { id: 2, color: 1, size: 0 });
    map.add(Item { id: 3, color: 1, size: 0 });
    map.add(Item { id: 1, color: 1, size: 0 });

    assert_eq!(map.postings("color", &IndexKey::from(1i64)), Some(&[0usize, 1, 2][..]));
    assert_eq!(map.cardinality("color"), Some(1));
}
