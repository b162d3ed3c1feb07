//! Memoized support lookup.

use std::collections::HashMap;

use crate::core::TransactionSet;

/// Memoized support lookup over one dataset.
///
/// Used by rule generation when an itemset is not in the frequent table.
/// Keys are the sorted id vectors themselves, so equivalent itemsets share
/// one entry. The cache lives for a single generation run and is dropped
/// with it, so nothing accumulates across invocations.
#[derive(Debug)]
pub struct SupportCache<'a> {
    data: &'a TransactionSet,
    memo: HashMap<Vec<u32>, (u64, f64)>,
}

impl<'a> SupportCache<'a> {
    /// Creates an empty cache over the dataset.
    pub fn new(data: &'a TransactionSet) -> Self {
        Self {
            data,
            memo: HashMap::new(),
        }
    }

    /// Count and support of the itemset, computing and memoizing on miss.
    pub fn support(&mut self, ids: &[u32]) -> (u64, f64) {
        if let Some(&cached) = self.memo.get(ids) {
            return cached;
        }
        let computed = self.data.support_of_ids(ids);
        self.memo.insert(ids.to_vec(), computed);
        computed
    }

    /// Number of memoized itemsets.
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    /// Returns true if nothing has been memoized yet.
    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }
}
