//! Strategy performance metrics: total/annualized return, MDD, Sharpe, win rate.

use serde::{Deserialize, Serialize};

/// Summary metrics for one return/cumulative-return series pair.
///
/// All values are plain ratios: `0.25` means 25%. `max_drawdown` is zero or
/// negative; zero means the curve never fell below its running peak.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Final cumulative value minus one.
    pub total_return: f64,

    /// Total return compounded to a 365-day year.
    pub annualized_return: f64,

    /// Worst peak-to-trough decline of the cumulative curve (<= 0).
    pub max_drawdown: f64,

    /// Annualized mean excess return over its standard deviation.
    pub sharpe_ratio: f64,

    /// Fraction of defined per-bar returns that were positive.
    pub win_rate: f64,
}

impl std::fmt::Display for PerformanceMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total Return:      {:.2}%", self.total_return * 100.0)?;
        writeln!(f, "Annualized Return: {:.2}%", self.annualized_return * 100.0)?;
        writeln!(f, "Max Drawdown:      {:.2}%", self.max_drawdown * 100.0)?;
        writeln!(f, "Sharpe Ratio:      {:.2}", self.sharpe_ratio)?;
        write!(f, "Win Rate:          {:.2}%", self.win_rate * 100.0)
    }
}
