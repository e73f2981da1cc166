//! Moving-average crossover strategy engine.
//!
//! Turns a raw price time series (plus an optional exchange-rate series)
//! into trading signals, lagged strategy returns, cumulative-return curves,
//! and performance metrics, with a buy-and-hold baseline for comparison.
//! The engine is a pure pipeline over immutable series; data acquisition,
//! persistence, and charting are collaborators feeding it plain series.

pub mod backtest;
pub mod data;
pub mod error;
pub mod metrics;
pub mod models;
pub mod strategy;

pub use backtest::{BacktestReport, Backtester, BaselineOutcome, StrategyOutcome};
pub use error::EngineError;
pub use models::{ExchangeRateSeries, PerformanceMetrics, PriceBar, PriceSeries};
pub use strategy::{BacktestConfig, Signal};
