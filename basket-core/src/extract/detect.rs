//! Transaction column detection strategies.

use arrow::array::Array;
use arrow::datatypes::DataType;
use async_trait::async_trait;
use datafusion::prelude::*;
use std::fmt::Debug;
use tracing::{debug, instrument};

use crate::error::{BasketError, Result};

/// Strategy deciding which column of a table holds transaction item lists.
///
/// The extractor consults a detector only when no columns were designated
/// explicitly. Implementations are free to use schema metadata, sampling,
/// or full scans; returning `Ok(None)` means "no qualifying column", which
/// downstream treats as an empty (not failed) mining run.
#[async_trait]
pub trait TransactionColumnDetector: Send + Sync + Debug {
    /// Picks a transaction column, or `None` if nothing qualifies.
    async fn detect(
        &self,
        ctx: &SessionContext,
        table: &str,
        delimiter: char,
    ) -> Result<Option<String>>;

    /// Returns the name of this detector.
    fn name(&self) -> &str;
}

/// Default detector: the first text column where more than a minimum
/// fraction of rows contain the delimiter.
///
/// Columns are scanned in schema order and scanning stops at the first
/// qualifying column. The default ratio is 0.1, i.e. more than 10% of rows
/// must contain the delimiter (strictly greater).
#[derive(Debug, Clone)]
pub struct DelimiterRatioDetector {
    min_row_ratio: f64,
}

impl Default for DelimiterRatioDetector {
    fn default() -> Self {
        Self { min_row_ratio: 0.1 }
    }
}

impl DelimiterRatioDetector {
    /// Creates a detector with a custom row-ratio threshold.
    pub fn new(min_row_ratio: f64) -> Self {
        Self { min_row_ratio }
    }

    /// The configured row-ratio threshold.
    pub fn min_row_ratio(&self) -> f64 {
        self.min_row_ratio
    }

    async fn delimited_row_ratio(
        &self,
        ctx: &SessionContext,
        table: &str,
        column: &str,
        delimiter: char,
    ) -> Result<f64> {
        let delimiter_literal = delimiter.to_string().replace('\'', "''");
        let sql = format!(
            r#"
            SELECT
                COUNT(*) as total_rows,
                SUM(CASE WHEN strpos("{column}", '{delimiter_literal}') > 0 THEN 1 ELSE 0 END) as delimited_rows
            FROM "{table}"
            "#
        );

        let df = ctx.sql(&sql).await?;
        let batches = df.collect().await?;

        let batch = match batches.first() {
            Some(batch) if batch.num_rows() > 0 => batch,
            _ => return Ok(0.0),
        };

        let total_array = batch
            .column(0)
            .as_any()
            .downcast_ref::<arrow::array::Int64Array>()
            .ok_or_else(|| BasketError::invalid_data("Expected Int64 array for total count"))?;
        let delimited_array = batch
            .column(1)
            .as_any()
            .downcast_ref::<arrow::array::Int64Array>()
            .ok_or_else(|| BasketError::invalid_data("Expected Int64 array for delimited count"))?;

        let total = total_array.value(0);
        if total == 0 {
            return Ok(0.0);
        }
        // SUM over an empty or all-null input comes back null.
        let delimited = if delimited_array.is_null(0) {
            0
        } else {
            delimited_array.value(0)
        };

        Ok(delimited as f64 / total as f64)
    }
}

#[async_trait]
impl TransactionColumnDetector for DelimiterRatioDetector {
    #[instrument(skip(self, ctx), fields(detector = self.name(), table = %table))]
    async fn detect(
        &self,
        ctx: &SessionContext,
        table: &str,
        delimiter: char,
    ) -> Result<Option<String>> {
        let df = ctx.table(table).await?;
        let text_columns: Vec<String> = df
            .schema()
            .fields()
            .iter()
            .filter(|field| {
                matches!(
                    field.data_type(),
                    DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
                )
            })
            .map(|field| field.name().clone())
            .collect();

        for column in text_columns {
            let ratio = self
                .delimited_row_ratio(ctx, table, &column, delimiter)
                .await?;
            debug!(column = %column, ratio, "scanned candidate column");
            if ratio > self.min_row_ratio {
                return Ok(Some(column));
            }
        }

        Ok(None)
    }

    fn name(&self) -> &str {
        "delimiter_ratio"
    }
}
