//! Property-based tests for the mining engine.
//!
//! These verify the structural guarantees of the level-wise search and rule
//! generation across randomly generated transaction sets:
//!
//! - anti-monotonicity: every subset of a frequent itemset is frequent, with
//!   support at least that of its superset
//! - support bounds: a rule's support never exceeds the support of its
//!   antecedent or its consequent
//! - confidence bounds: every emitted rule has confidence in
//!   [min_confidence, 1]
//! - determinism: two runs over identical input produce identical sets
//! - support idempotence: the frequent table agrees with a brute-force scan

use basket_core::core::{mine_transactions, MiningParams, TransactionSet};
use basket_core::mine::{AprioriMiner, RuleGenerator};
use proptest::prelude::*;
use std::collections::HashSet;

/// Strategy producing small random baskets over a bounded vocabulary.
///
/// A tight vocabulary keeps co-occurrence dense enough that mining actually
/// surfaces itemsets instead of returning empty tables for every case.
fn transactions_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(
        prop::collection::vec(0u8..8, 2..5).prop_map(|items| {
            items
                .into_iter()
                .map(|item| format!("item{item}"))
                .collect::<Vec<String>>()
        }),
        1..40,
    )
}

/// Support of an itemset by direct subset scan over the raw rows.
fn brute_force_support(rows: &[Vec<String>], items: &[String]) -> f64 {
    let qualifying: Vec<HashSet<&str>> = rows
        .iter()
        .filter_map(|row| {
            let distinct: HashSet<&str> = row.iter().map(String::as_str).collect();
            (!distinct.is_empty()).then_some(distinct)
        })
        .collect();
    if qualifying.is_empty() {
        return 0.0;
    }
    let count = qualifying
        .iter()
        .filter(|transaction| items.iter().all(|item| transaction.contains(item.as_str())))
        .count();
    count as f64 / qualifying.len() as f64
}

/// All strict subsets of the given sorted item list.
fn proper_subsets(items: &[String]) -> Vec<Vec<String>> {
    let n = items.len();
    let mut subsets = Vec::new();
    for mask in 1u32..((1u32 << n) - 1) {
        let subset: Vec<String> = items
            .iter()
            .enumerate()
            .filter(|(idx, _)| mask & (1 << idx) != 0)
            .map(|(_, item)| item.clone())
            .collect();
        subsets.push(subset);
    }
    subsets
}

proptest! {
    #[test]
    fn test_every_subset_of_a_frequent_itemset_is_frequent(
        rows in transactions_strategy(),
        min_support in 0.05f64..0.5,
    ) {
        let params = MiningParams::new(min_support, 0.5, 3).unwrap();
        let report = mine_transactions(rows, params).unwrap();

        let frequent: HashSet<Vec<String>> = report
            .frequent_itemsets
            .iter()
            .map(|set| set.items.clone())
            .collect();

        for itemset in &report.frequent_itemsets {
            for subset in proper_subsets(&itemset.items) {
                prop_assert!(
                    frequent.contains(&subset),
                    "subset {:?} of frequent {:?} is missing from the table",
                    subset,
                    itemset.items
                );
            }
        }
    }

    #[test]
    fn test_subset_support_dominates_superset_support(
        rows in transactions_strategy(),
    ) {
        let params = MiningParams::new(0.1, 0.5, 3).unwrap();
        let report = mine_transactions(rows, params).unwrap();

        for itemset in &report.frequent_itemsets {
            for subset in proper_subsets(&itemset.items) {
                let subset_refs: Vec<&str> = subset.iter().map(String::as_str).collect();
                if let Some(smaller) = report.itemset(&subset_refs) {
                    prop_assert!(smaller.support >= itemset.support - 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_rule_support_and_confidence_bounds(
        rows in transactions_strategy(),
        min_confidence in 0.1f64..0.9,
    ) {
        let params = MiningParams::new(0.1, min_confidence, 3).unwrap();
        let report = mine_transactions(rows.clone(), params).unwrap();

        for rule in &report.rules {
            let antecedent_support = brute_force_support(&rows, &rule.antecedent);
            let consequent_support = brute_force_support(&rows, &rule.consequent);

            prop_assert!(rule.support <= antecedent_support + 1e-9);
            prop_assert!(rule.support <= consequent_support + 1e-9);
            prop_assert!(rule.confidence >= min_confidence - 1e-9);
            prop_assert!(rule.confidence <= 1.0 + 1e-9);
            prop_assert!(!rule.antecedent.is_empty());
            prop_assert!(!rule.consequent.is_empty());
        }
    }

    #[test]
    fn test_mining_is_deterministic(
        rows in transactions_strategy(),
    ) {
        let params = MiningParams::new(0.1, 0.4, 3).unwrap();
        let first = mine_transactions(rows.clone(), params.clone()).unwrap();
        let second = mine_transactions(rows, params).unwrap();

        prop_assert_eq!(&first.frequent_itemsets, &second.frequent_itemsets);
        prop_assert_eq!(&first.rules, &second.rules);
    }

    #[test]
    fn test_table_support_matches_brute_force_scan(
        rows in transactions_strategy(),
    ) {
        let params = MiningParams::new(0.1, 0.5, 3).unwrap();
        let report = mine_transactions(rows.clone(), params).unwrap();

        for itemset in &report.frequent_itemsets {
            let scanned = brute_force_support(&rows, &itemset.items);
            prop_assert!(
                (itemset.support - scanned).abs() < 1e-9,
                "table says {} but scan says {} for {:?}",
                itemset.support,
                scanned,
                itemset.items
            );
        }
    }

    #[test]
    fn test_no_pruned_itemset_would_survive_a_full_scan(
        rows in transactions_strategy(),
        min_support in 0.1f64..0.6,
    ) {
        // Pruning must remove only provably infrequent candidates: every
        // pair meeting the threshold under a brute-force scan must be in
        // the table.
        let params = MiningParams::new(min_support, 0.5, 2).unwrap();
        let report = mine_transactions(rows.clone(), params).unwrap();

        let data = TransactionSet::from_rows(rows.clone());
        let catalog = data.catalog();
        let labels: Vec<String> = (0..catalog.len() as u32)
            .map(|id| catalog.label(id).to_string())
            .collect();

        for i in 0..labels.len() {
            for j in (i + 1)..labels.len() {
                let pair = vec![labels[i].clone(), labels[j].clone()];
                let scanned = brute_force_support(&rows, &pair);
                if scanned >= min_support {
                    let pair_refs: Vec<&str> = pair.iter().map(String::as_str).collect();
                    prop_assert!(
                        report.itemset(&pair_refs).is_some(),
                        "{:?} has support {} >= {} but is not in the table",
                        pair,
                        scanned,
                        min_support
                    );
                }
            }
        }
    }
}

#[test]
fn test_rule_generation_agrees_with_direct_engine_calls() {
    let rows: Vec<Vec<String>> = vec![
        vec!["a".into(), "b".into()],
        vec!["a".into(), "b".into(), "c".into()],
        vec!["a".into(), "c".into()],
        vec!["b".into(), "c".into()],
        vec!["a".into(), "b".into(), "c".into()],
    ];
    let params = MiningParams::new(0.4, 0.5, 3).unwrap();

    let report = mine_transactions(rows.clone(), params.clone()).unwrap();

    let data = TransactionSet::from_rows(rows);
    let frequent = AprioriMiner::mine(&data, &params);
    let rules = RuleGenerator::generate(&frequent, &data, &params);

    assert_eq!(report.frequent_itemsets.len(), frequent.len());
    assert_eq!(report.rules.len(), rules.len());
}
