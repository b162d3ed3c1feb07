//! # Basket - Market Basket Analysis for Rust
//!
//! Basket discovers co-occurrence patterns in tabular datasets whose rows
//! carry delimiter-separated item lists: frequent itemsets via Apriori-style
//! level-wise search with anti-monotonic pruning, and association rules with
//! support, confidence, and lift. It reads tables through DataFusion and
//! runs entirely in-process.
//!
//! ## Quick Start
//!
//! ```rust
//! use basket_core::prelude::*;
//! use datafusion::prelude::*;
//! use arrow::array::StringArray;
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use std::sync::Arc;
//!
//! # async fn example() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! // Register a table whose "purchases" column holds item lists
//! let ctx = SessionContext::new();
//! let schema = Arc::new(Schema::new(vec![Field::new(
//!     "purchases",
//!     DataType::Utf8,
//!     true,
//! )]));
//! let batch = RecordBatch::try_new(
//!     schema.clone(),
//!     vec![Arc::new(StringArray::from(vec![
//!         Some("bread,butter"),
//!         Some("bread,butter,jam"),
//!         Some("bread,jam"),
//!     ]))],
//! )?;
//! ctx.register_batch("data", batch)?;
//!
//! // Mine it
//! let analyzer = MarketBasketAnalyzer::builder()
//!     .transaction_columns(vec!["purchases"])
//!     .params(MiningParams::default().with_min_support(0.3))
//!     .build()?;
//!
//! let report = analyzer.run(&ctx).await?;
//! for rule in report.top_rules(5) {
//!     println!(
//!         "{:?} => {:?} (confidence {:.2}, lift {:.2})",
//!         rule.antecedent, rule.consequent, rule.confidence, rule.lift
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! When no column is designated, the extractor asks its
//! [`TransactionColumnDetector`](extract::TransactionColumnDetector) to pick
//! one; the default strategy takes the first text column where more than 10%
//! of rows contain the delimiter. Callers that already hold transactions in
//! memory can use [`core::mine_transactions`] and skip DataFusion entirely.
//!
//! ## Architecture
//!
//! - **`extract`**: turning table rows into transactions, via the
//!   [`TransactionExtractor`](extract::TransactionExtractor) and the
//!   pluggable column detection strategies
//! - **`mine`**: the synchronous mining engine: level-wise itemset search,
//!   bitset-backed support counting, and rule enumeration
//! - **`core`**: parameters, transaction storage, the report types, and the
//!   [`MarketBasketAnalyzer`](core::MarketBasketAnalyzer) facade
//! - **`error`**: the [`BasketError`](error::BasketError) taxonomy
//! - **`logging`**: `tracing-subscriber` setup helpers
//!
//! Degenerate inputs (an empty table, no qualifying column, thresholds
//! nothing can meet) produce empty reports, never errors. Errors are
//! reserved for the data layer, invalid configuration, and serialization.

pub mod core;
pub mod error;
pub mod extract;
pub mod logging;
pub mod mine;
pub mod prelude;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
