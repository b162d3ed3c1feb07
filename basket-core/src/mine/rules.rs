//! Association rule enumeration.

use tracing::{debug, instrument};

use crate::core::{AssociationRule, MiningParams, TransactionSet};
use crate::mine::apriori::FrequentItemsets;
use crate::mine::support::SupportCache;

/// Enumerates association rules from a frequent itemset table.
///
/// Every frequent itemset of size n ≥ 2 yields up to `2^n − 2` candidate
/// rules, one per non-empty proper subset taken as the antecedent. All
/// splits meeting the confidence threshold are emitted, not just the best
/// one per itemset.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleGenerator;

impl RuleGenerator {
    /// Generates all rules meeting `min_confidence`.
    #[instrument(skip(frequent, data, params), fields(itemsets = frequent.len()))]
    pub fn generate(
        frequent: &FrequentItemsets,
        data: &TransactionSet,
        params: &MiningParams,
    ) -> Vec<AssociationRule> {
        let mut cache = SupportCache::new(data);
        let mut rules = Vec::new();

        for entry in frequent.iter() {
            let n = entry.ids.len();
            if n < 2 || n >= u64::BITS as usize {
                continue;
            }

            let mut antecedent = Vec::with_capacity(n - 1);
            let mut consequent = Vec::with_capacity(n - 1);
            for mask in 1u64..((1u64 << n) - 1) {
                antecedent.clear();
                consequent.clear();
                for (pos, &id) in entry.ids.iter().enumerate() {
                    if mask & (1u64 << pos) != 0 {
                        antecedent.push(id);
                    } else {
                        consequent.push(id);
                    }
                }

                let antecedent_support = lookup_support(frequent, &mut cache, &antecedent);
                if antecedent_support <= 0.0 {
                    continue;
                }
                let confidence = entry.support / antecedent_support;
                if confidence < params.min_confidence {
                    continue;
                }

                let consequent_support = lookup_support(frequent, &mut cache, &consequent);
                let lift = if consequent_support > 0.0 {
                    confidence / consequent_support
                } else {
                    0.0
                };

                rules.push(AssociationRule {
                    antecedent: data.catalog().labels_of(&antecedent),
                    consequent: data.catalog().labels_of(&consequent),
                    support: entry.support,
                    confidence,
                    lift,
                    count: entry.count,
                });
            }
        }

        debug!(rules = rules.len(), "rule generation complete");
        rules
    }
}

/// Support of an itemset, preferring the frequent table over a scan.
///
/// Every proper subset of a frequent itemset is itself frequent, so the
/// cache path cannot be taken when the table holds all levels of the
/// search; it remains as a fallback for tables built elsewhere.
fn lookup_support(frequent: &FrequentItemsets, cache: &mut SupportCache<'_>, ids: &[u32]) -> f64 {
    match frequent.get(ids) {
        Some(entry) => entry.support,
        None => cache.support(ids).1,
    }
}
