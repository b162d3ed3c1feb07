//! Core types: parameters, transaction storage, reports, and the facade.

pub mod analyzer;
pub mod itemset;
pub mod params;
pub mod report;

pub use analyzer::{mine_transactions, MarketBasketAnalyzer, MarketBasketAnalyzerBuilder};
pub use itemset::{ItemCatalog, TidSet, TransactionSet};
pub use params::MiningParams;
pub use report::{AssociationRule, FrequentItemset, PatternReport};
