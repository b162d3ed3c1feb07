//! Transaction extraction from tabular sources.

use arrow::array::{Array, LargeStringArray, StringViewArray};
use datafusion::prelude::*;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::{BasketError, Result};
use crate::extract::detect::{DelimiterRatioDetector, TransactionColumnDetector};

/// The default table name transactions are read from.
pub const DEFAULT_TABLE: &str = "data";

/// Transactions pulled out of a tabular source, with provenance.
#[derive(Debug, Clone, Default)]
pub struct ExtractedTransactions {
    /// Tokenized item lists, one per qualifying row.
    pub rows: Vec<Vec<String>>,
    /// The columns the rows came from (empty when nothing qualified).
    pub columns: Vec<String>,
}

/// Extracts transactions from a table registered in a DataFusion context.
///
/// Cells are split on the delimiter, tokens trimmed, empty tokens dropped,
/// and duplicates collapsed; a row becomes a transaction only when more
/// than one distinct item remains. Rows are never deduplicated against each
/// other: repeated identical baskets are real signal and strengthen support
/// counts.
///
/// With designated columns, every column contributes its qualifying rows.
/// Without them, the configured [`TransactionColumnDetector`] picks a
/// single column (or none, yielding an empty extraction).
#[derive(Debug, Clone)]
pub struct TransactionExtractor {
    table: String,
    columns: Option<Vec<String>>,
    delimiter: char,
    detector: Arc<dyn TransactionColumnDetector>,
}

impl Default for TransactionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionExtractor {
    /// Creates an extractor reading from the `data` table with the default
    /// detector and a `,` delimiter.
    pub fn new() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            columns: None,
            delimiter: ',',
            detector: Arc::new(DelimiterRatioDetector::default()),
        }
    }

    /// Sets the table to read from.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Designates the columns holding transaction item lists.
    pub fn with_columns(mut self, columns: Vec<impl Into<String>>) -> Self {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the token delimiter within a cell.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Replaces the column detection strategy.
    pub fn with_detector(mut self, detector: Arc<dyn TransactionColumnDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// The table this extractor reads from.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Extracts all transactions from the configured source.
    #[instrument(skip(self, ctx), fields(table = %self.table))]
    pub async fn extract(&self, ctx: &SessionContext) -> Result<ExtractedTransactions> {
        let columns = match &self.columns {
            Some(designated) => {
                self.ensure_columns_exist(ctx, designated).await?;
                designated.clone()
            }
            None => match self.detector.detect(ctx, &self.table, self.delimiter).await? {
                Some(column) => vec![column],
                None => {
                    debug!("no transaction column detected");
                    return Ok(ExtractedTransactions::default());
                }
            },
        };

        let mut rows = Vec::new();
        for column in &columns {
            let cells = self.column_values(ctx, column).await?;
            let before = rows.len();
            rows.extend(cells.iter().filter_map(|cell| self.tokenize(cell)));
            debug!(
                column = %column,
                transactions = rows.len() - before,
                "extracted column"
            );
        }

        Ok(ExtractedTransactions { rows, columns })
    }

    async fn ensure_columns_exist(&self, ctx: &SessionContext, columns: &[String]) -> Result<()> {
        let df = ctx.table(&self.table).await?;
        for column in columns {
            if !df
                .schema()
                .fields()
                .iter()
                .any(|field| field.name() == column)
            {
                return Err(BasketError::column_not_found(column.clone()));
            }
        }
        Ok(())
    }

    /// Non-null cell values of one column, as strings.
    async fn column_values(&self, ctx: &SessionContext, column: &str) -> Result<Vec<String>> {
        let sql = format!(
            r#"SELECT CAST("{column}" AS VARCHAR) as cell FROM "{table}" WHERE "{column}" IS NOT NULL"#,
            table = self.table,
        );
        let df = ctx.sql(&sql).await?;
        let batches = df.collect().await?;

        let mut values = Vec::new();
        for batch in &batches {
            let cells = batch.column(0);
            match cells.data_type() {
                arrow::datatypes::DataType::Utf8 => {
                    let array = cells
                        .as_any()
                        .downcast_ref::<arrow::array::StringArray>()
                        .ok_or_else(|| {
                            BasketError::invalid_data("Failed to extract string values")
                        })?;
                    values.extend((0..array.len()).map(|i| array.value(i).to_string()));
                }
                arrow::datatypes::DataType::LargeUtf8 => {
                    let array = cells
                        .as_any()
                        .downcast_ref::<LargeStringArray>()
                        .ok_or_else(|| {
                            BasketError::invalid_data("Failed to extract large string values")
                        })?;
                    values.extend((0..array.len()).map(|i| array.value(i).to_string()));
                }
                arrow::datatypes::DataType::Utf8View => {
                    let array = cells
                        .as_any()
                        .downcast_ref::<StringViewArray>()
                        .ok_or_else(|| {
                            BasketError::invalid_data("Failed to extract string view values")
                        })?;
                    values.extend((0..array.len()).map(|i| array.value(i).to_string()));
                }
                other => {
                    return Err(BasketError::invalid_data(format!(
                        "Unexpected cell column type: {other:?}"
                    )));
                }
            }
        }

        Ok(values)
    }

    /// Splits a cell into a transaction, or `None` when it does not qualify.
    fn tokenize(&self, cell: &str) -> Option<Vec<String>> {
        let mut items: Vec<String> = Vec::new();
        for token in cell.split(self.delimiter) {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            if !items.iter().any(|existing| existing == token) {
                items.push(token.to_string());
            }
        }
        (items.len() > 1).then_some(items)
    }
}
