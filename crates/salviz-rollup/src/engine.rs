//! Grouping engine
//!
//! Keys keep the order in which they were first encountered, so the same
//! input always produces the same bucket order.

use crate::reducer::Reducer;
use indexmap::IndexMap;
use salviz_model::Category;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// One reduced group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateBucket<K, V> {
    /// Category value shared by the group
    pub key: K,
    /// Reduced value
    pub value: V,
}

/// Order in which distinct categories are listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryOrder {
    /// Order of first appearance in the records
    #[default]
    FirstSeen,
    /// Ascending by label
    Sorted,
}

impl CategoryOrder {
    /// Reorder a rollup result in place
    pub fn apply<K: Category, V>(self, map: &mut IndexMap<K, V>) {
        if self == Self::Sorted {
            map.sort_by(|a, _, b, _| a.label().cmp(b.label()));
        }
    }
}

fn group_by<'a, T: 'a, K, F>(items: impl IntoIterator<Item = &'a T>, key: F) -> IndexMap<K, Vec<&'a T>>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut groups: IndexMap<K, Vec<&'a T>> = IndexMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item);
    }
    groups
}

/// Group by one key and reduce each group
///
/// Only keys with at least one item appear in the result.
pub fn rollup<T, K, F, R>(items: &[T], key: F, reducer: &R) -> IndexMap<K, R::Output>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
    R: Reducer<T>,
{
    let result: IndexMap<K, R::Output> = group_by(items, key)
        .into_iter()
        .map(|(k, group)| (k, reducer.reduce(&group)))
        .collect();
    tracing::debug!("Rolled up {} items into {} buckets", items.len(), result.len());
    result
}

/// Group by an ordered pair of keys and reduce each cell
///
/// The outer map is keyed by `key1`, each inner map by `key2`; empty
/// cells are absent.
pub fn rollup2<T, K1, K2, F1, F2, R>(
    items: &[T],
    key1: F1,
    key2: F2,
    reducer: &R,
) -> IndexMap<K1, IndexMap<K2, R::Output>>
where
    K1: Hash + Eq,
    K2: Hash + Eq,
    F1: Fn(&T) -> K1,
    F2: Fn(&T) -> K2,
    R: Reducer<T>,
{
    group_by(items, key1)
        .into_iter()
        .map(|(k1, outer)| {
            let inner = group_by(outer, &key2)
                .into_iter()
                .map(|(k2, cell)| (k2, reducer.reduce(&cell)))
                .collect();
            (k1, inner)
        })
        .collect()
}

/// Flatten a single-key rollup into buckets, preserving order
#[must_use]
pub fn buckets<K, V>(map: IndexMap<K, V>) -> Vec<AggregateBucket<K, V>> {
    map.into_iter()
        .map(|(key, value)| AggregateBucket { key, value })
        .collect()
}
