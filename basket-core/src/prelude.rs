//! Prelude for commonly used types in basket-core.

pub use crate::core::{
    mine_transactions, AssociationRule, FrequentItemset, MarketBasketAnalyzer, MiningParams,
    PatternReport, TransactionSet,
};
pub use crate::error::{BasketError, Result};
pub use crate::extract::{TransactionColumnDetector, TransactionExtractor};
pub use crate::logging::LoggingConfig;
