//! The top-level mining facade.

use datafusion::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};

use crate::core::{MiningParams, PatternReport, TransactionSet};
use crate::error::Result;
use crate::extract::{TransactionColumnDetector, TransactionExtractor};
use crate::mine::{AprioriMiner, RuleGenerator};

/// Orchestrates extraction, mining, and rule generation against a
/// DataFusion context.
///
/// # Examples
///
/// ```rust,ignore
/// use basket_core::prelude::*;
/// use datafusion::prelude::*;
///
/// # async fn example(ctx: &SessionContext) -> Result<()> {
/// let analyzer = MarketBasketAnalyzer::builder()
///     .transaction_columns(vec!["purchased_items"])
///     .params(MiningParams::default().with_min_support(0.1))
///     .build()?;
///
/// let report = analyzer.run(ctx).await?;
/// println!("{} rules", report.rules.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MarketBasketAnalyzer {
    extractor: TransactionExtractor,
    params: MiningParams,
}

impl MarketBasketAnalyzer {
    /// Starts building an analyzer.
    pub fn builder() -> MarketBasketAnalyzerBuilder {
        MarketBasketAnalyzerBuilder::default()
    }

    /// The mining parameters this analyzer runs with.
    pub fn params(&self) -> &MiningParams {
        &self.params
    }

    /// Runs the full pipeline and assembles a report.
    ///
    /// An empty extraction (no qualifying column, or no qualifying rows)
    /// produces an empty report, not an error.
    #[instrument(skip(self, ctx), fields(table = %self.extractor.table()))]
    pub async fn run(&self, ctx: &SessionContext) -> Result<PatternReport> {
        let started = Instant::now();

        let extracted = self.extractor.extract(ctx).await?;
        let data = TransactionSet::from_rows(extracted.rows);
        let frequent = AprioriMiner::mine(&data, &self.params);
        let rules = RuleGenerator::generate(&frequent, &data, &self.params);

        info!(
            transactions = data.len(),
            itemsets = frequent.len(),
            rules = rules.len(),
            "mining run complete"
        );

        Ok(PatternReport::new(
            extracted.columns,
            data.len(),
            started.elapsed(),
            frequent.to_itemsets(data.catalog()),
            rules,
        ))
    }
}

/// Builder for [`MarketBasketAnalyzer`].
#[derive(Debug, Default)]
pub struct MarketBasketAnalyzerBuilder {
    extractor: Option<TransactionExtractor>,
    table: Option<String>,
    columns: Option<Vec<String>>,
    delimiter: Option<char>,
    detector: Option<Arc<dyn TransactionColumnDetector>>,
    params: Option<MiningParams>,
}

impl MarketBasketAnalyzerBuilder {
    /// Sets the table to read transactions from (default `data`).
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Designates the columns holding transaction item lists.
    ///
    /// Without this, the detector picks a column automatically.
    pub fn transaction_columns(mut self, columns: Vec<impl Into<String>>) -> Self {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the token delimiter within a cell (default `,`).
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Replaces the column detection strategy.
    pub fn detector(mut self, detector: Arc<dyn TransactionColumnDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Replaces the whole extractor, overriding table/columns/delimiter/
    /// detector settings.
    pub fn extractor(mut self, extractor: TransactionExtractor) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Sets the mining parameters (default [`MiningParams::default`]).
    pub fn params(mut self, params: MiningParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Builds the analyzer, validating the mining parameters.
    pub fn build(self) -> Result<MarketBasketAnalyzer> {
        let params = self.params.unwrap_or_default();
        params.validate()?;

        let extractor = match self.extractor {
            Some(extractor) => extractor,
            None => {
                let mut extractor = TransactionExtractor::new();
                if let Some(table) = self.table {
                    extractor = extractor.with_table(table);
                }
                if let Some(columns) = self.columns {
                    extractor = extractor.with_columns(columns);
                }
                if let Some(delimiter) = self.delimiter {
                    extractor = extractor.with_delimiter(delimiter);
                }
                if let Some(detector) = self.detector {
                    extractor = extractor.with_detector(detector);
                }
                extractor
            }
        };

        Ok(MarketBasketAnalyzer { extractor, params })
    }
}

/// Mines transactions already held in memory, skipping extraction.
///
/// Rows are tokenized item lists; duplicates within a row collapse, empty
/// rows are dropped. Empty input yields an empty report.
pub fn mine_transactions(rows: Vec<Vec<String>>, params: MiningParams) -> Result<PatternReport> {
    params.validate()?;
    let started = Instant::now();

    let data = TransactionSet::from_rows(rows);
    let frequent = AprioriMiner::mine(&data, &params);
    let rules = RuleGenerator::generate(&frequent, &data, &params);

    Ok(PatternReport::new(
        Vec::new(),
        data.len(),
        started.elapsed(),
        frequent.to_itemsets(data.catalog()),
        rules,
    ))
}
