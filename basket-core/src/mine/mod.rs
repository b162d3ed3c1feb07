//! The mining engine: level-wise itemset search, support lookup, and rule
//! enumeration.
//!
//! Everything in this module is synchronous and operates purely on an
//! in-memory [`TransactionSet`](crate::core::TransactionSet); the async
//! boundary lives in the extraction layer.

pub mod apriori;
pub mod rules;
pub mod support;

pub use apriori::{AprioriMiner, FrequentEntry, FrequentItemsets};
pub use rules::RuleGenerator;
pub use support::SupportCache;
