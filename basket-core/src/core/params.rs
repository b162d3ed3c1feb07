//! Mining parameters and their validation.

use serde::{Deserialize, Serialize};

use crate::error::{BasketError, Result};

/// Thresholds and limits for a mining run.
///
/// `min_support` and `min_confidence` are fractions in `(0, 1]`; both
/// comparisons are inclusive, so an itemset or rule sitting exactly on a
/// threshold qualifies. `max_itemset_size` bounds the level-wise search and
/// is the caller's primary lever against combinatorial blow-up; keep it
/// small (the default is 3).
///
/// # Examples
///
/// ```rust
/// use basket_core::core::MiningParams;
///
/// let params = MiningParams::default()
///     .with_min_support(0.1)
///     .with_min_confidence(0.6);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiningParams {
    /// Minimum fraction of transactions an itemset must appear in.
    pub min_support: f64,
    /// Minimum confidence a rule must reach to be emitted.
    pub min_confidence: f64,
    /// Largest itemset size explored by the level-wise search.
    pub max_itemset_size: usize,
}

impl Default for MiningParams {
    fn default() -> Self {
        Self {
            min_support: 0.05,
            min_confidence: 0.5,
            max_itemset_size: 3,
        }
    }
}

impl MiningParams {
    /// Creates validated parameters, rejecting out-of-range values.
    pub fn new(min_support: f64, min_confidence: f64, max_itemset_size: usize) -> Result<Self> {
        let params = Self {
            min_support,
            min_confidence,
            max_itemset_size,
        };
        params.validate()?;
        Ok(params)
    }

    /// Sets the minimum support threshold.
    pub fn with_min_support(mut self, min_support: f64) -> Self {
        self.min_support = min_support;
        self
    }

    /// Sets the minimum confidence threshold.
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Sets the maximum itemset size.
    pub fn with_max_itemset_size(mut self, max_itemset_size: usize) -> Self {
        self.max_itemset_size = max_itemset_size;
        self
    }

    /// Checks that all parameters are within their documented ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_support > 0.0 && self.min_support <= 1.0) {
            return Err(BasketError::invalid_config(format!(
                "min_support must be in (0, 1], got {}",
                self.min_support
            )));
        }
        if !(self.min_confidence > 0.0 && self.min_confidence <= 1.0) {
            return Err(BasketError::invalid_config(format!(
                "min_confidence must be in (0, 1], got {}",
                self.min_confidence
            )));
        }
        if self.max_itemset_size < 1 {
            return Err(BasketError::invalid_config(
                "max_itemset_size must be at least 1",
            ));
        }
        Ok(())
    }
}
