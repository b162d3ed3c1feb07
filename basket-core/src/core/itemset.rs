//! Transaction storage: item interning and bitset membership index.
//!
//! Items are interned into a global `u32` catalog once per dataset, and each
//! item carries a transaction-membership bitset. The support of an arbitrary
//! itemset is then the popcount of the AND of its members' bitsets, which
//! replaces per-candidate set scans over the whole transaction list.

use std::collections::{HashMap, HashSet};

/// Interner mapping item labels to dense `u32` ids.
///
/// Ids are assigned in sorted label order, so resolving a sorted id slice
/// yields alphabetically sorted labels. Comparison is case-sensitive:
/// `"Bread"` and `"bread"` are distinct items.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    ids: HashMap<String, u32>,
    labels: Vec<String>,
}

impl ItemCatalog {
    fn from_rows(rows: &[Vec<String>]) -> Self {
        let mut distinct: Vec<&String> = rows
            .iter()
            .flatten()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        distinct.sort_unstable();

        let mut ids = HashMap::with_capacity(distinct.len());
        let mut labels = Vec::with_capacity(distinct.len());
        for (idx, label) in distinct.into_iter().enumerate() {
            ids.insert(label.clone(), idx as u32);
            labels.push(label.clone());
        }
        Self { ids, labels }
    }

    /// Looks up the id of an item label.
    pub fn id(&self, item: &str) -> Option<u32> {
        self.ids.get(item).copied()
    }

    /// Resolves an id back to its label.
    ///
    /// Returns an empty string for ids outside the catalog; ids produced by
    /// this catalog always resolve.
    pub fn label(&self, id: u32) -> &str {
        self.labels.get(id as usize).map(String::as_str).unwrap_or("")
    }

    /// Resolves a slice of ids into owned labels.
    pub fn labels_of(&self, ids: &[u32]) -> Vec<String> {
        ids.iter().map(|&id| self.label(id).to_string()).collect()
    }

    /// Number of distinct items in the catalog.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if the catalog holds no items.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Transaction-membership bitset: one bit per transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TidSet {
    blocks: Vec<u64>,
}

impl TidSet {
    fn empty(num_transactions: usize) -> Self {
        Self {
            blocks: vec![0; (num_transactions + 63) / 64],
        }
    }

    fn insert(&mut self, tid: usize) {
        self.blocks[tid / 64] |= 1u64 << (tid % 64);
    }

    /// Number of transactions in the set.
    pub fn count(&self) -> u64 {
        self.blocks.iter().map(|b| u64::from(b.count_ones())).sum()
    }
}

/// An in-memory transaction dataset ready for mining.
///
/// Built once per invocation from tokenized rows; duplicates within a row
/// are collapsed and empty rows are dropped. Whether single-item rows are
/// admitted at all is the extraction layer's decision, not this type's:
/// callers supplying transactions directly keep whatever they pass in.
#[derive(Debug, Clone, Default)]
pub struct TransactionSet {
    catalog: ItemCatalog,
    transactions: Vec<Vec<u32>>,
    tidsets: Vec<TidSet>,
}

impl TransactionSet {
    /// Builds a transaction set from tokenized rows.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let mut cleaned: Vec<Vec<String>> = Vec::with_capacity(rows.len());
        for row in rows {
            let mut seen = HashSet::with_capacity(row.len());
            let mut items = Vec::with_capacity(row.len());
            for item in row {
                if seen.insert(item.clone()) {
                    items.push(item);
                }
            }
            if !items.is_empty() {
                cleaned.push(items);
            }
        }

        let catalog = ItemCatalog::from_rows(&cleaned);
        let mut tidsets = vec![TidSet::empty(cleaned.len()); catalog.len()];
        let mut transactions = Vec::with_capacity(cleaned.len());
        for (tid, row) in cleaned.iter().enumerate() {
            let mut ids: Vec<u32> = row.iter().filter_map(|item| catalog.id(item)).collect();
            ids.sort_unstable();
            for &id in &ids {
                tidsets[id as usize].insert(tid);
            }
            transactions.push(ids);
        }

        Self {
            catalog,
            transactions,
            tidsets,
        }
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Returns true if the dataset holds no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// The item catalog backing this dataset.
    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// The interned transactions, each a sorted slice of item ids.
    pub fn transactions(&self) -> &[Vec<u32>] {
        &self.transactions
    }

    /// Count of transactions containing the given item.
    pub fn item_count(&self, id: u32) -> u64 {
        self.tidsets
            .get(id as usize)
            .map(TidSet::count)
            .unwrap_or(0)
    }

    /// Count and support of an arbitrary itemset, by bitset intersection.
    ///
    /// The empty itemset is contained in every transaction. Unknown ids
    /// yield zero support.
    pub fn support_of_ids(&self, ids: &[u32]) -> (u64, f64) {
        let total = self.transactions.len();
        if total == 0 {
            return (0, 0.0);
        }
        if ids.is_empty() {
            return (total as u64, 1.0);
        }

        let first = match self.tidsets.get(ids[0] as usize) {
            Some(tidset) => tidset,
            None => return (0, 0.0),
        };
        let mut acc = first.blocks.clone();
        for &id in &ids[1..] {
            match self.tidsets.get(id as usize) {
                Some(tidset) => {
                    for (block, other) in acc.iter_mut().zip(&tidset.blocks) {
                        *block &= *other;
                    }
                }
                None => return (0, 0.0),
            }
        }

        let count: u64 = acc.iter().map(|b| u64::from(b.count_ones())).sum();
        (count, count as f64 / total as f64)
    }

    /// Count and support of an itemset given by labels.
    ///
    /// An item absent from the catalog makes the support zero.
    pub fn support_of_items(&self, items: &[&str]) -> (u64, f64) {
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            match self.catalog.id(item) {
                Some(id) => ids.push(id),
                None => return (0, 0.0),
            }
        }
        ids.sort_unstable();
        ids.dedup();
        self.support_of_ids(&ids)
    }
}
