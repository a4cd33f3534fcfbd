//! Ranking helpers for weight tables.
#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use serde::Serialize;

use crate::WeightTable;
use crate::dated::accumulate;

/// Label of the bucket collecting everything outside the top entries.
pub const OTHER_LABEL: &str = "Other";

/// A key paired with its total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightEntry {
    /// Attraction name, tag or bucket label.
    pub name: String,
    /// Summed contribution.
    pub total: f64,
}

impl WeightEntry {
    /// Pair `name` with `total`.
    #[must_use]
    pub fn new(name: impl Into<String>, total: f64) -> Self {
        Self {
            name: name.into(),
            total,
        }
    }
}

fn ranked(weights: &WeightTable) -> Vec<WeightEntry> {
    let mut entries: Vec<WeightEntry> = weights
        .iter()
        .map(|(name, total)| WeightEntry::new(name.clone(), *total))
        .collect();
    entries.sort_by(|left, right| right.total.total_cmp(&left.total));
    entries
}

/// Return the `n` entries with the highest totals, highest first.
///
/// Ties keep name order.
#[must_use]
pub fn top_n(weights: &WeightTable, n: usize) -> Vec<WeightEntry> {
    let mut entries = ranked(weights);
    entries.truncate(n);
    entries
}

/// Like [`top_n`], followed by an [`OTHER_LABEL`] entry summing the rest
/// when that remainder is positive.
#[must_use]
pub fn top_n_with_other(weights: &WeightTable, n: usize) -> Vec<WeightEntry> {
    let mut entries = ranked(weights);
    let rest = entries.split_off(n.min(entries.len()));
    let mut remainder = 0.0;
    for entry in &rest {
        accumulate(&mut remainder, entry.total);
    }
    if remainder > 0.0 {
        entries.push(WeightEntry::new(OTHER_LABEL, remainder));
    }
    entries
}

/// Apply [`top_n`] to every group.
#[must_use]
pub fn top_per_group<K>(groups: &BTreeMap<K, WeightTable>, n: usize) -> BTreeMap<K, Vec<WeightEntry>>
where
    K: Ord + Clone,
{
    groups
        .iter()
        .map(|(group, weights)| (group.clone(), top_n(weights, n)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn weights() -> WeightTable {
        WeightTable::from([
            ("Beaches".to_owned(), 40.0),
            ("Caves".to_owned(), 90.0),
            ("Markets".to_owned(), 40.0),
            ("Museums".to_owned(), 15.0),
            ("Temples".to_owned(), -5.0),
        ])
    }

    #[rstest]
    fn top_n_sorts_descending_with_name_order_ties(weights: WeightTable) {
        assert_eq!(
            top_n(&weights, 3),
            vec![
                WeightEntry::new("Caves", 90.0),
                WeightEntry::new("Beaches", 40.0),
                WeightEntry::new("Markets", 40.0),
            ]
        );
        assert_eq!(top_n(&weights, 10).len(), 5);
    }

    #[rstest]
    fn other_bucket_sums_positive_remainders(weights: WeightTable) {
        let entries = top_n_with_other(&weights, 3);
        assert_eq!(entries.last(), Some(&WeightEntry::new(OTHER_LABEL, 10.0)));
        assert_eq!(entries.len(), 4);
    }

    #[rstest]
    #[case(4)]
    #[case(5)]
    #[case(50)]
    fn other_bucket_is_omitted_without_positive_remainder(
        weights: WeightTable,
        #[case] n: usize,
    ) {
        let entries = top_n_with_other(&weights, n);
        assert!(entries.iter().all(|entry| entry.name != OTHER_LABEL));
    }

    #[rstest]
    fn top_per_group_keeps_every_group(weights: WeightTable) {
        let groups = BTreeMap::from([("Family", weights), ("Solo", WeightTable::new())]);
        let tops = top_per_group(&groups, 1);
        assert_eq!(tops["Family"], vec![WeightEntry::new("Caves", 90.0)]);
        assert!(tops["Solo"].is_empty());
    }
}
