//! Backtesting pipeline for moving-average crossover strategies.
//!
//! Pure series-in, series-out: the caller supplies a price series (and
//! optionally an exchange-rate series); the engine computes moving averages,
//! signals, lagged strategy returns, cumulative curves, and performance
//! metrics for every configured window plus a buy-and-hold baseline. No I/O
//! happens here; fetching and rendering belong to collaborators.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::EngineError;
use crate::metrics::MetricsCalculator;
use crate::models::{ExchangeRateSeries, PerformanceMetrics, PriceSeries};
use crate::strategy::{
    compute_base_currency_returns, compute_buy_and_hold_returns, compute_cumulative_returns,
    compute_moving_average, compute_returns, compute_signal, compute_strategy_returns,
    BacktestConfig, Signal,
};

/// Everything computed for one moving-average window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyOutcome {
    /// The moving-average window, in bars.
    pub window: usize,

    /// The moving average itself; `None` for the leading `window - 1` bars.
    pub moving_average: Vec<Option<Decimal>>,

    /// One directional stance per bar.
    pub signals: Vec<Signal>,

    /// Lagged per-bar strategy returns; `None` at index 0.
    pub strategy_returns: Vec<Option<Decimal>>,

    /// Growth of one unit of base currency under the strategy.
    pub cumulative_returns: Vec<Decimal>,

    /// Summary metrics for the strategy.
    pub metrics: PerformanceMetrics,
}

/// Buy-and-hold baseline shared by all windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineOutcome {
    /// Base-currency per-bar returns, ungated by any signal.
    pub returns: Vec<Option<Decimal>>,

    /// Growth of one unit of base currency when always invested.
    pub cumulative_returns: Vec<Decimal>,

    /// Summary metrics for the baseline.
    pub metrics: PerformanceMetrics,
}

/// Full result of one backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    /// First bar timestamp.
    pub start_time: DateTime<Utc>,

    /// Last bar timestamp.
    pub end_time: DateTime<Utc>,

    /// Number of bars evaluated.
    pub bars: usize,

    /// Whether returns were converted through an exchange-rate series.
    pub currency_converted: bool,

    /// Buy-and-hold baseline.
    pub buy_and_hold: BaselineOutcome,

    /// One outcome per configured window, in configuration order.
    pub outcomes: Vec<StrategyOutcome>,
}

impl std::fmt::Display for BacktestReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n{:=^60}", " BACKTEST RESULTS ")?;
        writeln!(f)?;
        writeln!(
            f,
            "Period: {} to {} ({} bars{})",
            self.start_time.format("%Y-%m-%d %H:%M"),
            self.end_time.format("%Y-%m-%d %H:%M"),
            self.bars,
            if self.currency_converted {
                ", currency-converted"
            } else {
                ""
            }
        )?;
        writeln!(f)?;
        writeln!(f, "--- Buy & Hold (Never Sells) ---")?;
        writeln!(f, "{}", self.buy_and_hold.metrics)?;
        for outcome in &self.outcomes {
            writeln!(f)?;
            writeln!(f, "--- MA{} Strategy ---", outcome.window)?;
            writeln!(f, "{}", outcome.metrics)?;
        }
        write!(f, "{:=^60}", "")
    }
}

/// Backtesting engine: a stateless pipeline over immutable series.
#[derive(Debug)]
pub struct Backtester {
    config: BacktestConfig,
}

impl Backtester {
    /// Create a backtester, rejecting invalid window configurations up front.
    pub fn new(config: BacktestConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Run the full pipeline over one price series.
    ///
    /// With `rates` supplied, per-bar returns are converted to base currency
    /// by the forward-filled rate series before any strategy gating.
    pub fn run(
        &self,
        prices: &PriceSeries,
        rates: Option<&ExchangeRateSeries>,
    ) -> Result<BacktestReport, EngineError> {
        let closes = prices.closes();
        let timestamps = prices.timestamps();

        info!(
            bars = closes.len(),
            windows = ?self.config.windows,
            currency_converted = rates.is_some(),
            "Running backtest"
        );

        let price_returns = compute_returns(&closes);
        let aligned_rates = rates.map(|r| r.align_to(&timestamps));
        let base_returns =
            compute_base_currency_returns(&price_returns, aligned_rates.as_deref())?;

        // Baseline: always invested, no signal gating.
        let bh_returns = compute_buy_and_hold_returns(&base_returns);
        let bh_cumulative = compute_cumulative_returns(&bh_returns);
        let bh_metrics = MetricsCalculator::calculate(
            &timestamps,
            &bh_returns,
            &bh_cumulative,
            self.config.risk_free_annual_rate,
            self.config.periods_per_year,
        )?;

        let mut outcomes = Vec::with_capacity(self.config.windows.len());
        for &window in &self.config.windows {
            outcomes.push(self.run_window(window, &closes, &timestamps, &base_returns)?);
        }

        Ok(BacktestReport {
            start_time: timestamps[0],
            end_time: timestamps[timestamps.len() - 1],
            bars: closes.len(),
            currency_converted: rates.is_some(),
            buy_and_hold: BaselineOutcome {
                returns: bh_returns,
                cumulative_returns: bh_cumulative,
                metrics: bh_metrics,
            },
            outcomes,
        })
    }

    /// Run signals, returns, and metrics for a single window.
    fn run_window(
        &self,
        window: usize,
        closes: &[Decimal],
        timestamps: &[DateTime<Utc>],
        base_returns: &[Option<Decimal>],
    ) -> Result<StrategyOutcome, EngineError> {
        let moving_average = compute_moving_average(closes, window)?;
        let signals = compute_signal(closes, &moving_average)?;
        let strategy_returns = compute_strategy_returns(&signals, base_returns)?;
        let cumulative_returns = compute_cumulative_returns(&strategy_returns);

        let metrics = MetricsCalculator::calculate(
            timestamps,
            &strategy_returns,
            &cumulative_returns,
            self.config.risk_free_annual_rate,
            self.config.periods_per_year,
        )?;

        debug!(
            window = window,
            total_return = metrics.total_return,
            max_drawdown = metrics.max_drawdown,
            "Window evaluated"
        );

        Ok(StrategyOutcome {
            window,
            moving_average,
            signals,
            strategy_returns,
            cumulative_returns,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceBar;
    use chrono::TimeZone;
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal_macros::dec;

    fn series(closes: &[Decimal]) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, close)| {
                let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                    + chrono::Duration::days(i as i64);
                PriceBar::new(ts, *close)
            })
            .collect();
        PriceSeries::new(bars).unwrap()
    }

    fn backtester(windows: Vec<usize>) -> Backtester {
        Backtester::new(BacktestConfig {
            windows,
            ..BacktestConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_rejects_zero_window_config() {
        let config = BacktestConfig {
            windows: vec![10, 0],
            ..BacktestConfig::default()
        };
        assert_eq!(
            Backtester::new(config).unwrap_err(),
            EngineError::InvalidWindow { window: 0 }
        );
    }

    #[test]
    fn test_monotonic_series_goes_long_after_window_fills() {
        // Strictly increasing closes: signal is Long from the first bar
        // where the MA is defined, and the lagged strategy return matches
        // the buy-and-hold return one bar later.
        let closes: Vec<Decimal> = (1..=12).map(|i| Decimal::from(100 + i)).collect();
        let report = backtester(vec![3]).run(&series(&closes), None).unwrap();

        let outcome = &report.outcomes[0];
        assert!(outcome.signals[..2].iter().all(|s| *s == Signal::Flat));
        assert!(outcome.signals[2..].iter().all(|s| *s == Signal::Long));

        // From bar 3 on, signal[i-1] is Long, so strategy == buy & hold.
        for i in 3..closes.len() {
            assert_eq!(outcome.strategy_returns[i], report.buy_and_hold.returns[i]);
        }
    }

    #[test]
    fn test_constant_series_surfaces_zero_variance() {
        // Every return is exactly zero, so Sharpe is undefined and the run
        // fails loudly instead of emitting NaN. The flat-signal and
        // zero-drawdown properties themselves are covered at the component
        // level in the strategy and metrics modules.
        let closes = vec![dec!(42); 10];
        let result = backtester(vec![4]).run(&series(&closes), None);
        assert!(matches!(
            result.unwrap_err(),
            EngineError::ZeroVariance { .. }
        ));
    }

    #[test]
    fn test_twenty_bar_window_twenty_example() {
        // Closes 10..=29 with window 20: the MA is defined only at the last
        // bar, so signal[18] is Flat and the lagged strategy return at bar
        // 19 is exactly zero.
        let closes: Vec<Decimal> = (10..30).map(Decimal::from).collect();
        let ma = compute_moving_average(&closes, 20).unwrap();
        let signals = compute_signal(&closes, &ma).unwrap();
        let returns = compute_returns(&closes);
        let strategy = compute_strategy_returns(&signals, &returns).unwrap();

        assert!(signals[..19].iter().all(|s| *s == Signal::Flat));
        assert_eq!(signals[19], Signal::Long);
        assert_eq!(strategy[19], Some(dec!(0)));
    }

    #[test]
    fn test_sharpe_fails_when_window_never_fills() {
        // A window larger than the series keeps every strategy return at
        // zero; the baseline computes fine but the window outcome must
        // surface the zero-variance domain error.
        let closes = vec![dec!(10), dec!(11), dec!(12)];
        let result = backtester(vec![10]).run(&series(&closes), None);
        assert_eq!(
            result.unwrap_err(),
            EngineError::ZeroVariance { samples: 2 }
        );
    }

    #[test]
    fn test_currency_conversion_flows_into_baseline() {
        let closes = vec![dec!(100), dec!(110), dec!(121)];
        let prices = series(&closes);

        // Rates share the price timestamps: +1%, then about +2%.
        let rate_bars = prices
            .bars()
            .iter()
            .zip([dec!(1.00), dec!(1.01), dec!(1.03)])
            .map(|(bar, rate)| PriceBar::new(bar.timestamp, rate))
            .collect();
        let rates = ExchangeRateSeries::new(rate_bars).unwrap();

        let report = backtester(vec![2]).run(&prices, Some(&rates)).unwrap();

        assert!(report.currency_converted);
        // Bar 1: 10% price move * 1% rate move = 0.1%.
        assert_eq!(report.buy_and_hold.returns[1], Some(dec!(0.001)));
        // Bar 2: 10% price move * (1.03/1.01 - 1) rate move.
        let bar2 = report.buy_and_hold.returns[2].unwrap();
        let expected = 0.10 * (1.03f64 / 1.01 - 1.0);
        assert!((bar2.to_f64().unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_report_display_mentions_each_window() {
        let closes: Vec<Decimal> = (1..=30).map(|i| Decimal::from(100 + (i * 7) % 13)).collect();
        let report = backtester(vec![5, 10]).run(&series(&closes), None).unwrap();
        let rendered = report.to_string();
        assert!(rendered.contains("BACKTEST RESULTS"));
        assert!(rendered.contains("Buy & Hold"));
        assert!(rendered.contains("MA5 Strategy"));
        assert!(rendered.contains("MA10 Strategy"));
    }
}
