//! Turning tabular rows into transactions.

pub mod detect;
pub mod extractor;

pub use detect::{DelimiterRatioDetector, TransactionColumnDetector};
pub use extractor::{ExtractedTransactions, TransactionExtractor, DEFAULT_TABLE};
