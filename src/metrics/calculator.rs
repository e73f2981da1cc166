//! Calculator for strategy performance metrics: total/annualized return,
//! MDD, Sharpe ratio, win rate.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use statrs::statistics::Statistics;

use crate::error::EngineError;
use crate::models::PerformanceMetrics;

/// Calculator for computing strategy performance metrics.
///
/// Operates on one per-bar return series and its cumulative curve. Undefined
/// results (zero elapsed time, zero variance, no defined returns) surface as
/// [`EngineError`] rather than NaN or silent defaults.
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Compute the full metrics record for a return/cumulative pair.
    ///
    /// `timestamps` must cover the same bars as `returns` and `cumulative`;
    /// `risk_free_annual_rate` is divided down to a per-bar rate using
    /// `periods_per_year`, which also scales the Sharpe annualization.
    pub fn calculate(
        timestamps: &[DateTime<Utc>],
        returns: &[Option<Decimal>],
        cumulative: &[Decimal],
        risk_free_annual_rate: f64,
        periods_per_year: f64,
    ) -> Result<PerformanceMetrics, EngineError> {
        if timestamps.is_empty() || cumulative.is_empty() {
            return Err(EngineError::EmptySeries);
        }
        if returns.len() != cumulative.len() {
            return Err(EngineError::LengthMismatch {
                left: returns.len(),
                right: cumulative.len(),
            });
        }

        let total_return = Self::total_return(cumulative);
        let annualized_return = Self::annualized_return(timestamps, total_return)?;
        let max_drawdown = Self::max_drawdown(cumulative);
        let sharpe_ratio =
            Self::sharpe_ratio(returns, risk_free_annual_rate, periods_per_year)?;
        let win_rate = Self::win_rate(returns)?;

        Ok(PerformanceMetrics {
            total_return,
            annualized_return,
            max_drawdown,
            sharpe_ratio,
            win_rate,
        })
    }

    /// Final cumulative value minus one.
    fn total_return(cumulative: &[Decimal]) -> f64 {
        cumulative
            .last()
            .and_then(|c| c.to_f64())
            .map(|c| c - 1.0)
            .unwrap_or(0.0)
    }

    /// Compound the total return to a 365-day year over the series span.
    fn annualized_return(
        timestamps: &[DateTime<Utc>],
        total_return: f64,
    ) -> Result<f64, EngineError> {
        let first = timestamps[0];
        let last = timestamps[timestamps.len() - 1];
        let elapsed_days = (last - first).num_days();

        if elapsed_days == 0 {
            return Err(EngineError::ZeroElapsedTime { elapsed_days });
        }

        Ok((1.0 + total_return).powf(365.0 / elapsed_days as f64) - 1.0)
    }

    /// Worst decline of the cumulative curve from its running maximum.
    /// Zero or negative; zero means no drawdown ever occurred.
    fn max_drawdown(cumulative: &[Decimal]) -> f64 {
        let mut running_max = Decimal::ZERO;
        let mut worst = 0.0f64;

        for value in cumulative {
            if *value > running_max {
                running_max = *value;
            }
            if running_max > Decimal::ZERO {
                let dd = (value / running_max - Decimal::ONE).to_f64().unwrap_or(0.0);
                if dd < worst {
                    worst = dd;
                }
            }
        }

        worst
    }

    /// Annualized Sharpe ratio over defined per-bar returns.
    fn sharpe_ratio(
        returns: &[Option<Decimal>],
        risk_free_annual_rate: f64,
        periods_per_year: f64,
    ) -> Result<f64, EngineError> {
        let per_bar_risk_free = risk_free_annual_rate / periods_per_year;

        let excess: Vec<f64> = returns
            .iter()
            .flatten()
            .filter_map(|r| r.to_f64())
            .map(|r| r - per_bar_risk_free)
            .collect();

        if excess.is_empty() {
            return Err(EngineError::NoDefinedReturns);
        }
        if excess.len() < 2 {
            return Err(EngineError::ZeroVariance {
                samples: excess.len(),
            });
        }

        let mean = excess.clone().mean();
        let std_dev = excess.clone().std_dev();

        if std_dev == 0.0 || !std_dev.is_finite() {
            return Err(EngineError::ZeroVariance {
                samples: excess.len(),
            });
        }

        Ok(periods_per_year.sqrt() * mean / std_dev)
    }

    /// Fraction of defined returns that were positive.
    fn win_rate(returns: &[Option<Decimal>]) -> Result<f64, EngineError> {
        let defined = returns.iter().flatten().count();
        if defined == 0 {
            return Err(EngineError::NoDefinedReturns);
        }

        let winners = returns
            .iter()
            .flatten()
            .filter(|r| **r > Decimal::ZERO)
            .count();
        Ok(winners as f64 / defined as f64)
    }
}
