//! Directional signals from price-vs-moving-average comparison.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Directional stance for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    /// Close above the moving average.
    Long,
    /// Close below the moving average.
    Short,
    /// Moving average undefined, or close equals it exactly.
    Flat,
}

impl Signal {
    /// Position multiplier applied to the next bar's return.
    pub fn value(&self) -> Decimal {
        match self {
            Signal::Long => Decimal::ONE,
            Signal::Short => Decimal::NEGATIVE_ONE,
            Signal::Flat => Decimal::ZERO,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Long => "LONG",
            Signal::Short => "SHORT",
            Signal::Flat => "FLAT",
        }
    }
}

/// One signal per bar: instantaneous comparison of close against its moving
/// average, no hysteresis or confirmation delay.
pub fn compute_signal(
    closes: &[Decimal],
    ma: &[Option<Decimal>],
) -> Result<Vec<Signal>, EngineError> {
    if closes.len() != ma.len() {
        return Err(EngineError::LengthMismatch {
            left: closes.len(),
            right: ma.len(),
        });
    }

    Ok(closes
        .iter()
        .zip(ma.iter())
        .map(|(close, ma)| match ma {
            Some(ma) if close > ma => Signal::Long,
            Some(ma) if close < ma => Signal::Short,
            _ => Signal::Flat,
        })
        .collect())
}
