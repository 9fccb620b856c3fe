//! Group-by-sum primitive shared by every view builder.

use std::collections::BTreeMap;

/// Replaces NaN and infinities with 0.
#[must_use]
pub const fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Sums `value_fn` over `records`, grouped by `key_fn`.
///
/// Keys with no contributing record never appear in the result. Non-finite
/// values count as 0.
pub fn group_sum<T, K: Ord>(
    records: impl IntoIterator<Item = T>,
    key_fn: impl Fn(&T) -> K,
    value_fn: impl Fn(&T) -> f64,
) -> BTreeMap<K, f64> {
    group_sum_some(records, |r| Some(key_fn(r)), value_fn)
}

/// Like [`group_sum`], but records whose key is `None` are skipped.
pub fn group_sum_some<T, K: Ord>(
    records: impl IntoIterator<Item = T>,
    key_fn: impl Fn(&T) -> Option<K>,
    value_fn: impl Fn(&T) -> f64,
) -> BTreeMap<K, f64> {
    let mut sums = BTreeMap::new();
    for record in records {
        if let Some(key) = key_fn(&record) {
            *sums.entry(key).or_insert(0.0) += finite_or_zero(value_fn(&record));
        }
    }
    sums
}
