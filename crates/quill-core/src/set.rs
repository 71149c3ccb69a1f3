//! Set algebra over slices
//!
//! Inputs are treated as mathematical sets: order and duplicates are
//! ignored. Every operation that produces a collection returns it sorted
//! ascending and free of duplicates.

use std::collections::BTreeSet;

fn to_set<T: Ord + Clone>(items: &[T]) -> BTreeSet<T> {
    items.iter().cloned().collect()
}

/// Elements present in either input
pub fn union<T: Ord + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let mut set = to_set(a);
    set.extend(b.iter().cloned());
    set.into_iter().collect()
}

/// Elements present in both inputs
pub fn intersection<T: Ord + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let right = to_set(b);
    to_set(a).intersection(&right).cloned().collect()
}

/// Elements present in exactly one of the inputs
pub fn difference<T: Ord + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let right = to_set(b);
    to_set(a).symmetric_difference(&right).cloned().collect()
}

/// Elements of `a` that are not in `b`
pub fn complement<T: Ord + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let right = to_set(b);
    to_set(a).difference(&right).cloned().collect()
}

/// True when both inputs hold the same distinct elements
pub fn equals<T: Ord + Clone>(a: &[T], b: &[T]) -> bool {
    to_set(a) == to_set(b)
}
