//! Data models for price series, exchange rates, and performance metrics.

mod bar;
mod metrics;

pub use bar::{ExchangeRateSeries, PriceBar, PriceSeries};
pub use metrics::PerformanceMetrics;
