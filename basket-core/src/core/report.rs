//! Mining result types.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A frequent itemset with its occurrence statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequentItemset {
    /// The member items, sorted.
    pub items: Vec<String>,
    /// Fraction of transactions containing the itemset.
    pub support: f64,
    /// Number of transactions containing the itemset.
    pub count: u64,
}

/// An association rule between two disjoint itemsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRule {
    /// The "if" side of the rule.
    pub antecedent: Vec<String>,
    /// The "then" side of the rule.
    pub consequent: Vec<String>,
    /// Support of antecedent ∪ consequent.
    pub support: f64,
    /// `support / support(antecedent)`.
    pub confidence: f64,
    /// `confidence / support(consequent)`; 0 when the consequent support is 0.
    pub lift: f64,
    /// Number of transactions containing antecedent ∪ consequent.
    pub count: u64,
}

/// The full result of one mining run.
///
/// Itemsets are sorted by (size, items) and rules by descending confidence.
/// Both orderings are presentation decisions made at assembly time; the
/// mining engine itself guarantees only the sets, not their order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternReport {
    /// Columns the transactions were extracted from (empty for in-memory runs).
    pub columns: Vec<String>,
    /// Number of transactions mined.
    pub transaction_count: usize,
    /// Timestamp when the run finished (RFC 3339).
    pub timestamp: String,
    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: u64,
    /// All frequent itemsets across every level of the search.
    pub frequent_itemsets: Vec<FrequentItemset>,
    /// All rules meeting the confidence threshold.
    pub rules: Vec<AssociationRule>,
}

impl PatternReport {
    /// Assembles a report from raw mining output, applying the presentation
    /// ordering.
    pub fn new(
        columns: Vec<String>,
        transaction_count: usize,
        elapsed: std::time::Duration,
        mut frequent_itemsets: Vec<FrequentItemset>,
        mut rules: Vec<AssociationRule>,
    ) -> Self {
        frequent_itemsets.sort_by(|a, b| {
            a.items
                .len()
                .cmp(&b.items.len())
                .then_with(|| a.items.cmp(&b.items))
        });
        rules.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.antecedent.cmp(&b.antecedent))
                .then_with(|| a.consequent.cmp(&b.consequent))
        });

        Self {
            columns,
            transaction_count,
            timestamp: chrono::Utc::now().to_rfc3339(),
            elapsed_ms: elapsed.as_millis() as u64,
            frequent_itemsets,
            rules,
        }
    }

    /// Returns true if the run surfaced neither itemsets nor rules.
    pub fn is_empty(&self) -> bool {
        self.frequent_itemsets.is_empty() && self.rules.is_empty()
    }

    /// The `n` highest-confidence rules.
    pub fn top_rules(&self, n: usize) -> &[AssociationRule] {
        &self.rules[..self.rules.len().min(n)]
    }

    /// The rule with the highest confidence, if any.
    pub fn strongest_rule(&self) -> Option<&AssociationRule> {
        self.rules.first()
    }

    /// The rule with the highest lift, if any.
    pub fn highest_lift_rule(&self) -> Option<&AssociationRule> {
        self.rules.iter().max_by(|a, b| {
            a.lift
                .partial_cmp(&b.lift)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Looks up a frequent itemset by its (sorted) member items.
    pub fn itemset(&self, items: &[&str]) -> Option<&FrequentItemset> {
        self.frequent_itemsets
            .iter()
            .find(|set| set.items.iter().map(String::as_str).eq(items.iter().copied()))
    }

    /// Formats the report as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Formats the report as JSON with pretty printing.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
