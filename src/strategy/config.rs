//! Backtest configuration.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Configuration for one backtest run.
///
/// One engine parameterized by a window list replaces the per-window script
/// variants the data originally flowed through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Moving-average windows to evaluate, in bars.
    pub windows: Vec<usize>,

    /// Annual risk-free rate used for excess returns (e.g. 0.02).
    pub risk_free_annual_rate: f64,

    /// Bars per year for annualizing the Sharpe ratio. 252 fits daily bars;
    /// callers on other intervals supply their own scale.
    pub periods_per_year: f64,
}

impl BacktestConfig {
    /// Reject window lists the moving-average computation cannot honor.
    pub fn validate(&self) -> Result<(), EngineError> {
        for &window in &self.windows {
            if window == 0 {
                return Err(EngineError::InvalidWindow { window });
            }
        }
        Ok(())
    }
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            windows: vec![10, 20, 30],
            risk_free_annual_rate: 0.02,
            periods_per_year: 252.0,
        }
    }
}
