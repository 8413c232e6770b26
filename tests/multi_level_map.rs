//! Multi-Level Map Tests
//!
//! Tests for tree invariants:
//! - set/get/delete round-trip
//! - Deleting the last value of a branch leaves no trace of it
//! - Replacing a label with a wildcard never loses matches

use std::collections::HashSet;

use memindex::tree::{parse_pattern, MultiLevelMap, PathSegment};
use proptest::prelude::*;

// =============================================================================
// Helper Functions
// =============================================================================

fn sorted(values: Vec<&u32>) -> Vec<u32> {
    let mut out: Vec<u32> = values.into_iter().copied().collect();
    out.sort();
    out
}

/// The nested layout shared by the wildcard tests
fn nested() -> MultiLevelMap<u32> {
    let mut map = MultiLevelMap::new();
    map.set(&["a", "b", "c", "d"], 1);
    map.set(&["a", "b", "c", "e"], 2);
    map.set(&["a", "b", "x", "y"], 3);
    map.set(&["a", "z", "c", "d"], 4);
    map.set(&["m", "n", "o"], 5);
    map.set(&["m", "n", "p"], 6);
    map.set(&["x", "y", "z"], 7);
    map.set(&["x", "y", "w"], 8);
    map
}

fn arb_path() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop_oneof![Just("a"), Just("b"), Just("c")], 0..4)
        .prop_map(|labels| labels.into_iter().map(String::from).collect())
}

// =============================================================================
// Wildcard Query Tests
// =============================================================================

#[test]
fn test_fruit_wildcard() {
    let mut map = MultiLevelMap::new();
    map.set(&["fruit", "apple", "red"], "RedApple");
    map.set(&["fruit", "orange", "red"], "RedOrange");
    map.set(&["fruit", "apple", "green"], "GreenApple");
    map.set(&["vegetable", "leafy", "spinach"], "Spinach");

    let mut result = map.query(&parse_pattern("fruit/*/red", '/'));
    result.sort();
    assert_eq!(result, vec![&"RedApple", &"RedOrange"]);
}

#[test]
fn test_wildcard_deep_single_match() {
    let map = nested();
    let pattern = parse_pattern("a/b/*/d", '/');
    assert_eq!(sorted(map.query(&pattern)), vec![1]);
}

#[test]
fn test_wildcards_across_branches() {
    let map = nested();
    let pattern = [
        PathSegment::from("a"),
        PathSegment::Any,
        PathSegment::from("c"),
        PathSegment::Any,
    ];
    assert_eq!(sorted(map.query(&pattern)), vec![1, 2, 4]);
}

#[test]
fn test_leading_wildcard() {
    let map = nested();
    assert_eq!(sorted(map.query(&parse_pattern("*/y/*", '/'))), vec![7, 8]);
}

#[test]
fn test_exact_pattern() {
    let map = nested();
    assert_eq!(sorted(map.query(&parse_pattern("m/n/o", '/'))), vec![5]);
}

#[test]
fn test_pattern_without_match() {
    let map = nested();
    assert!(map.query(&parse_pattern("a/b/nonexistent/*", '/')).is_empty());
}

#[test]
fn test_pattern_deeper_than_map() {
    let map = nested();
    assert!(map.query(&parse_pattern("m/n/o/*", '/')).is_empty());
}

#[test]
fn test_all_wildcards_fixed_depth() {
    let map = nested();
    let pattern = vec![PathSegment::Any; 4];
    // Values at depth 3 are not reached by a 4-level pattern
    assert_eq!(sorted(map.query(&pattern)), vec![1, 2, 3, 4]);
}

// =============================================================================
// Delete and Pruning Tests
// =============================================================================

#[test]
fn test_delete_branch_cleans_intermediate_nodes() {
    let mut map = MultiLevelMap::new();
    map.set(&["level1", "level2", "level3"], 1);
    map.set(&["level1", "level2b"], 2);

    assert!(map.delete(&["level1", "level2", "level3"]));
    assert_eq!(sorted(map.get_all(&["level1"])), vec![2]);
    assert!(map.get_all(&["level1", "level2"]).is_empty());
}

#[test]
fn test_nonexistent_keys() {
    let mut map: MultiLevelMap<u32> = MultiLevelMap::new();
    assert_eq!(map.get(&["non", "existent"]), None);
    assert!(map.get_all(&["non"]).is_empty());
    assert!(!map.delete(&["non", "existent"]));
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    /// What was set can be read back, and deleted exactly once.
    #[test]
    fn prop_set_get_delete(path in arb_path(), value in any::<u32>()) {
        let mut map = MultiLevelMap::new();
        map.set(path.as_slice(), value);
        prop_assert_eq!(map.get(path.as_slice()), Some(&value));
        prop_assert!(map.delete(path.as_slice()));
        prop_assert!(!map.has(path.as_slice()));
        prop_assert!(!map.delete(path.as_slice()));
        prop_assert!(map.is_empty());
    }

    /// Adding then deleting a fresh branch is invisible to `get_all`.
    #[test]
    fn prop_prune_restores_shape(
        paths in prop::collection::vec(arb_path(), 0..10),
        extra in arb_path(),
    ) {
        let mut map = MultiLevelMap::new();
        for (i, path) in paths.iter().enumerate() {
            map.set(path.as_slice(), i as u32);
        }
        prop_assume!(!map.has(extra.as_slice()));

        let before = sorted(map.get_all(&["a"]));
        let top_before = map.top_level_len();

        map.set(extra.as_slice(), u32::MAX);
        prop_assert!(map.delete(extra.as_slice()));

        prop_assert_eq!(sorted(map.get_all(&["a"])), before);
        prop_assert_eq!(map.top_level_len(), top_before);
    }

    /// Replacing any label with `Any` can only widen the result.
    #[test]
    fn prop_wildcard_monotonicity(
        paths in prop::collection::vec(arb_path(), 0..12),
        pattern in arb_path(),
        widen in any::<prop::sample::Index>(),
    ) {
        let mut map = MultiLevelMap::new();
        for (i, path) in paths.iter().enumerate() {
            map.set(path.as_slice(), i as u32);
        }

        let narrow: Vec<PathSegment> = pattern.iter().map(|l| PathSegment::from(l.as_str())).collect();
        let mut wide = narrow.clone();
        if !wide.is_empty() {
            let at = widen.index(wide.len());
            wide[at] = PathSegment::Any;
        }

        let narrow_result: HashSet<u32> = map.query(&narrow).into_iter().copied().collect();
        let wide_result: HashSet<u32> = map.query(&wide).into_iter().copied().collect();
        prop_assert!(narrow_result.is_subset(&wide_result));
    }
}
