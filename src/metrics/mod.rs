//! Performance metric computation.

mod calculator;

pub use calculator::MetricsCalculator;
