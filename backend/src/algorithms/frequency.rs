//! Frequency tally and ranking.
//!
//! Ties are broken by the order in which labels were first seen, so the
//! ranking is fully determined by the input sequence.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{AggregationError, AggregationResult};

/// One `(label, count)` entry of a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub label: String,
    pub count: usize,
}

/// Label counts in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    index: HashMap<String, usize>,
    entries: Vec<RankedEntry>,
    total: usize,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally every label of a sequence.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for label in labels {
            table.add(label.as_ref());
        }
        table
    }

    /// Count one occurrence of `label`.
    pub fn add(&mut self, label: &str) {
        self.add_many(label, 1);
    }

    /// Count `count` occurrences of `label`.
    pub fn add_many(&mut self, label: &str, count: usize) {
        if count == 0 {
            return;
        }
        match self.index.get(label) {
            Some(&slot) => self.entries[slot].count += count,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push(RankedEntry {
                    label: label.to_string(),
                    count,
                });
            }
        }
        self.total += count;
    }

    /// Occurrences of `label`, zero when never seen.
    pub fn count(&self, label: &str) -> usize {
        self.index
            .get(label)
            .map(|&slot| self.entries[slot].count)
            .unwrap_or(0)
    }

    /// Number of labels tallied, duplicates included.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    /// Full ranking, descending by count.
    pub fn ranking(&self) -> Ranking {
        let mut entries = self.entries.clone();
        // sort_by is stable: equal counts keep first-seen order
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        Ranking { entries }
    }

    /// The `n` most frequent labels.
    pub fn top(&self, n: usize) -> AggregationResult<Ranking> {
        self.ranking().top(n)
    }
}

/// Labels ordered by descending count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranking {
    entries: Vec<RankedEntry>,
}

impl Ranking {
    /// First `n` entries, or all of them when fewer exist.
    ///
    /// Fails with [`AggregationError::InvalidArgument`] when `n` is zero.
    pub fn top(&self, n: usize) -> AggregationResult<Ranking> {
        if n == 0 {
            return Err(AggregationError::invalid_argument(
                "top(n) requires n greater than zero",
            ));
        }
        Ok(Ranking {
            entries: self.entries.iter().take(n).cloned().collect(),
        })
    }

    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<RankedEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts in the ranking.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Percentage share of each entry relative to this ranking's total.
    pub fn shares(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return vec![0.0; self.entries.len()];
        }
        self.entries
            .iter()
            .map(|e| e.count as f64 * 100.0 / total as f64)
            .collect()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }
}

impl IntoIterator for Ranking {
    type Item = RankedEntry;
    type IntoIter = std::vec::IntoIter<RankedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pairs(ranking: &Ranking) -> Vec<(&str, usize)> {
        ranking
            .entries()
            .iter()
            .map(|e| (e.label.as_str(), e.count))
            .collect()
    }

    #[test]
    fn test_ranking_orders_by_count() {
        let table = FrequencyTable::from_labels(["a", "b", "b", "c", "b", "c"]);
        assert_eq!(
            pairs(&table.ranking()),
            vec![("b", 3), ("c", 2), ("a", 1)]
        );
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let table = FrequencyTable::from_labels(["z", "y", "x", "y", "z", "x"]);
        assert_eq!(
            pairs(&table.ranking()),
            vec![("z", 2), ("y", 2), ("x", 2)]
        );
    }

    #[test]
    fn test_empty_input_gives_empty_ranking() {
        let table = FrequencyTable::from_labels(Vec::<String>::new());
        assert!(table.is_empty());
        assert!(table.ranking().is_empty());
        assert!(table.top(5).unwrap().is_empty());
    }

    #[test]
    fn test_top_zero_is_invalid() {
        let table = FrequencyTable::from_labels(["a"]);
        assert!(matches!(
            table.top(0),
            Err(AggregationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_top_truncates() {
        let table = FrequencyTable::from_labels(["a", "b", "b", "c", "c", "c"]);
        let top = table.top(2).unwrap();
        assert_eq!(pairs(&top), vec![("c", 3), ("b", 2)]);
        assert_eq!(table.top(10).unwrap().len(), 3);
    }

    #[test]
    fn test_empty_string_is_a_label() {
        let table = FrequencyTable::from_labels(["", "a", ""]);
        assert_eq!(table.count(""), 2);
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_add_many_and_count() {
        let mut table = FrequencyTable::new();
        table.add_many("Teaser", 3);
        table.add_many("Teaser", 0);
        table.add("Saw");
        assert_eq!(table.count("Teaser"), 3);
        assert_eq!(table.count("Missing"), 0);
        assert_eq!(table.total(), 4);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_shares() {
        let table = FrequencyTable::from_labels(["a", "a", "a", "b"]);
        let shares = table.ranking().shares();
        assert_eq!(shares, vec![75.0, 25.0]);
        assert!(Ranking::default().shares().is_empty());
    }

    #[test]
    fn test_ranking_serializes_as_list() {
        let table = FrequencyTable::from_labels(["a"]);
        let json = serde_json::to_value(table.ranking()).unwrap();
        assert_eq!(json, serde_json::json!([{"label": "a", "count": 1}]));
    }

    proptest! {
        #[test]
        fn prop_counts_sum_to_input_len(labels in prop::collection::vec("[a-d]{0,2}", 0..64)) {
            let table = FrequencyTable::from_labels(&labels);
            prop_assert_eq!(table.total(), labels.len());
            prop_assert_eq!(table.ranking().total(), labels.len());
        }

        #[test]
        fn prop_top_len_and_order(labels in prop::collection::vec("[a-f]", 0..64), n in 1usize..10) {
            let table = FrequencyTable::from_labels(&labels);
            let top = table.top(n).unwrap();
            prop_assert_eq!(top.len(), n.min(table.len()));
            for pair in top.entries().windows(2) {
                prop_assert!(pair[0].count >= pair[1].count);
            }
        }
    }
}
