//! Price and exchange-rate series models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One sample of a price time series.
///
/// Only the timestamp and close price participate in strategy computation;
/// the remaining OHLCV fields are carried through for collaborators (charting,
/// persistence) that want them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBar {
    /// When this bar closed.
    pub timestamp: DateTime<Utc>,

    /// Closing price, strictly positive.
    pub close: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,
}

impl PriceBar {
    /// Create a bar carrying only a timestamp and close.
    pub fn new(timestamp: DateTime<Utc>, close: Decimal) -> Self {
        Self {
            timestamp,
            close,
            open: None,
            high: None,
            low: None,
            volume: None,
        }
    }
}

/// An ordered price series with strictly ascending, unique timestamps and
/// positive closes. Validated once on construction; every downstream
/// computation relies on these invariants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Validate and wrap a sequence of bars.
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, EngineError> {
        if bars.is_empty() {
            return Err(EngineError::EmptySeries);
        }

        for (i, bar) in bars.iter().enumerate() {
            if bar.close <= Decimal::ZERO {
                return Err(EngineError::NonPositiveClose { index: i });
            }
            if i > 0 && bar.timestamp <= bars[i - 1].timestamp {
                return Err(EngineError::NonAscendingTimestamps { index: i });
            }
        }

        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices in bar order.
    pub fn closes(&self) -> Vec<Decimal> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Timestamps in bar order.
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    /// Whole days between the first and last bar.
    pub fn elapsed_days(&self) -> i64 {
        let first = self.bars[0].timestamp;
        let last = self.bars[self.bars.len() - 1].timestamp;
        (last - first).num_days()
    }
}

/// Exchange-rate series: units of base currency per unit of quote currency.
///
/// Shares the shape and invariants of [`PriceSeries`] but is not assumed to
/// share timestamps with the price series it converts; alignment is done by
/// forward-filling the most recent rate at or before each price timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRateSeries {
    series: PriceSeries,
}

impl ExchangeRateSeries {
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, EngineError> {
        Ok(Self {
            series: PriceSeries::new(bars)?,
        })
    }

    /// The rate in effect at `at`: the last known rate at or before that
    /// instant, or `None` if no rate has been observed yet.
    pub fn rate_at(&self, at: DateTime<Utc>) -> Option<Decimal> {
        let bars = self.series.bars();
        // Timestamps are ascending, so binary search for the insertion point.
        let idx = bars.partition_point(|b| b.timestamp <= at);
        if idx == 0 {
            None
        } else {
            Some(bars[idx - 1].close)
        }
    }

    /// Forward-fill the rate onto each of the given timestamps.
    pub fn align_to(&self, timestamps: &[DateTime<Utc>]) -> Vec<Option<Decimal>> {
        timestamps.iter().map(|ts| self.rate_at(*ts)).collect()
    }
}
