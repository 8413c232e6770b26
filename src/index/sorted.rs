//! Set operations over sorted, duplicate-free slices of internal indices.
//!
//! Every posting list in the crate is kept in this shape, so membership is a
//! binary search and intersection is a linear two-pointer merge.

/// Intersection of two ascending, duplicate-free slices.
///
/// O(n + m). The result keeps ascending order.
pub fn intersect_sorted(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let mut i = 0usize;
    let mut j = 0usize;
    while i < a.len() && j < b.len() {
        let x = a[i];
        let y = b[j];
        if x == y {
            out.push(x);
            i += 1;
            j += 1;
        } else if x < y {
            i += 1;
        } else {
            j += 1;
        }
    }
    out
}

/// Membership test by binary search.
pub fn contains_sorted(sorted: &[usize], index: usize) -> bool {
    sorted.binary_search(&index).is_ok()
}

/// Insert keeping ascending order. Returns false if already present.
pub fn insert_sorted(sorted: &mut Vec<usize>, index: usize) -> bool {
    match sorted.binary_search(&index) {
        Ok(_) => false,
        Err(pos) => {
            sorted.insert(pos, index);
            true
        }
    }
}

/// Remove an element. Returns false if it was not present.
pub fn remove_sorted(sorted: &mut Vec<usize>, index: usize) -> bool {
    match sorted.binary_search(&index) {
        Ok(pos) => {
            sorted.remove(pos);
            true
        }
        Err(_) => false,
    }
}
