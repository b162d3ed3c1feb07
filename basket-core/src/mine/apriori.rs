//! Level-wise frequent itemset mining.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use crate::core::{FrequentItemset, ItemCatalog, MiningParams, TransactionSet};

/// A frequent itemset in interned form.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequentEntry {
    /// Sorted member item ids.
    pub ids: Vec<u32>,
    /// Number of transactions containing the itemset.
    pub count: u64,
    /// Fraction of transactions containing the itemset.
    pub support: f64,
}

/// The frequent itemset table accumulated across all levels of the search.
///
/// Keys are sorted id vectors, so any subset probe is a direct lookup.
#[derive(Debug, Clone, Default)]
pub struct FrequentItemsets {
    entries: HashMap<Vec<u32>, FrequentEntry>,
}

impl FrequentItemsets {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, keyed by its sorted ids.
    pub fn insert(&mut self, entry: FrequentEntry) {
        self.entries.insert(entry.ids.clone(), entry);
    }

    /// Looks up an itemset by its sorted ids.
    pub fn get(&self, ids: &[u32]) -> Option<&FrequentEntry> {
        self.entries.get(ids)
    }

    /// Returns true if the itemset is in the table.
    pub fn contains(&self, ids: &[u32]) -> bool {
        self.entries.contains_key(ids)
    }

    /// Number of frequent itemsets across all sizes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no itemset met the support threshold.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &FrequentEntry> {
        self.entries.values()
    }

    /// Resolves all entries into label form, in no particular order.
    pub fn to_itemsets(&self, catalog: &ItemCatalog) -> Vec<FrequentItemset> {
        self.entries
            .values()
            .map(|entry| FrequentItemset {
                items: catalog.labels_of(&entry.ids),
                support: entry.support,
                count: entry.count,
            })
            .collect()
    }
}

/// Apriori-style level-wise miner.
///
/// Level 1 keeps every item whose support meets the threshold. Each
/// subsequent level k joins pairs of frequent (k−1)-itemsets into
/// k-candidates, discards any candidate with an infrequent (k−1)-subset
/// before counting, counts the survivors by bitset intersection, and stops
/// when a level produces nothing or `max_itemset_size` is reached. The
/// returned table is the union of every level, not just the last one.
#[derive(Debug, Clone, Copy, Default)]
pub struct AprioriMiner;

impl AprioriMiner {
    /// Mines all frequent itemsets of the dataset.
    #[instrument(skip(data, params), fields(transactions = data.len()))]
    pub fn mine(data: &TransactionSet, params: &MiningParams) -> FrequentItemsets {
        let mut table = FrequentItemsets::new();
        let total = data.len();
        if total == 0 {
            return table;
        }

        let mut level: Vec<Vec<u32>> = Vec::new();
        for id in 0..data.catalog().len() as u32 {
            let count = data.item_count(id);
            let support = count as f64 / total as f64;
            if support >= params.min_support {
                table.insert(FrequentEntry {
                    ids: vec![id],
                    count,
                    support,
                });
                level.push(vec![id]);
            }
        }
        debug!(level = 1, frequent = level.len(), "level complete");

        let mut k = 2;
        while k <= params.max_itemset_size && !level.is_empty() {
            let candidates = generate_candidates(&level, k);
            if candidates.is_empty() {
                break;
            }

            let mut next: Vec<Vec<u32>> = Vec::new();
            for candidate in candidates {
                let (count, support) = data.support_of_ids(&candidate);
                if support >= params.min_support {
                    table.insert(FrequentEntry {
                        ids: candidate.clone(),
                        count,
                        support,
                    });
                    next.push(candidate);
                }
            }
            debug!(level = k, frequent = next.len(), "level complete");

            level = next;
            k += 1;
        }

        table
    }
}

/// Joins pairs of frequent (k−1)-itemsets into k-candidates, pruning any
/// candidate with a (k−1)-subset missing from the previous level.
fn generate_candidates(level: &[Vec<u32>], k: usize) -> Vec<Vec<u32>> {
    let previous: HashSet<&[u32]> = level.iter().map(Vec::as_slice).collect();
    let mut candidates: HashSet<Vec<u32>> = HashSet::new();

    for i in 0..level.len() {
        for j in (i + 1)..level.len() {
            let union = match merge_union(&level[i], &level[j], k) {
                Some(union) => union,
                None => continue,
            };
            if has_infrequent_subset(&union, &previous) {
                continue;
            }
            candidates.insert(union);
        }
    }

    candidates.into_iter().collect()
}

/// Merges two sorted id sets, returning the union only if it has exactly
/// `k` members.
fn merge_union(a: &[u32], b: &[u32], k: usize) -> Option<Vec<u32>> {
    let mut union = Vec::with_capacity(k);
    let (mut i, mut j) = (0, 0);
    while i < a.len() || j < b.len() {
        let next = match (a.get(i), b.get(j)) {
            (Some(&x), Some(&y)) if x == y => {
                i += 1;
                j += 1;
                x
            }
            (Some(&x), Some(&y)) if x < y => {
                i += 1;
                x
            }
            (Some(_), Some(&y)) => {
                j += 1;
                y
            }
            (Some(&x), None) => {
                i += 1;
                x
            }
            (None, Some(&y)) => {
                j += 1;
                y
            }
            (None, None) => break,
        };
        if union.len() == k {
            return None;
        }
        union.push(next);
    }
    (union.len() == k).then_some(union)
}

/// Checks whether any (k−1)-subset of the candidate is absent from the
/// previous level's frequent set.
fn has_infrequent_subset(candidate: &[u32], previous: &HashSet<&[u32]>) -> bool {
    let mut subset = Vec::with_capacity(candidate.len() - 1);
    for skip in 0..candidate.len() {
        subset.clear();
        subset.extend(
            candidate
                .iter()
                .enumerate()
                .filter(|(idx, _)| *idx != skip)
                .map(|(_, &id)| id),
        );
        if !previous.contains(subset.as_slice()) {
            return true;
        }
    }
    false
}
