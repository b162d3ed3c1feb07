//! Shared helpers for constructing test datasets.
//!
//! Available to this crate's tests and, behind the `test-utils` feature, to
//! downstream crates that want ready-made contexts for their own tests.

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use datafusion::prelude::*;
use std::sync::Arc;

/// Creates a context with a single nullable string column registered as the
/// `data` table.
pub async fn context_with_string_column(
    name: &str,
    values: Vec<Option<&str>>,
) -> SessionContext {
    context_with_string_columns(vec![(name, values)]).await
}

/// Creates a context with several nullable string columns (all the same
/// length) registered as the `data` table.
pub async fn context_with_string_columns(
    columns: Vec<(&str, Vec<Option<&str>>)>,
) -> SessionContext {
    let ctx = SessionContext::new();

    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, _)| Field::new(*name, DataType::Utf8, true))
        .collect();
    let arrays: Vec<ArrayRef> = columns
        .into_iter()
        .map(|(_, values)| Arc::new(StringArray::from(values)) as ArrayRef)
        .collect();

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema, arrays).unwrap();
    ctx.register_batch("data", batch).unwrap();

    ctx
}

/// Generates reproducible synthetic transactions: `num_rows` baskets of 2 to
/// `max_items` items drawn from a vocabulary of `item0..itemN` labels.
pub fn synthetic_transactions(
    num_rows: usize,
    vocabulary: usize,
    max_items: usize,
    seed: u64,
) -> Vec<Vec<String>> {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let vocabulary = vocabulary.max(2);
    let max_items = max_items.clamp(2, vocabulary);
    let mut rng = StdRng::seed_from_u64(seed);

    (0..num_rows)
        .map(|_| {
            let len = rng.random_range(2..=max_items);
            (0..len)
                .map(|_| format!("item{}", rng.random_range(0..vocabulary)))
                .collect()
        })
        .collect()
}
