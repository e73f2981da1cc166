//! Loading price and exchange-rate series from JSON files.
//!
//! This is collaborator glue, not part of the engine: any source that can
//! produce a `Vec<PriceBar>` works. The file format is a JSON array of bars,
//! e.g. `[{"timestamp": "2024-01-02T15:00:00Z", "close": "187.15"}, ...]`.
//! Series invariants (ordering, positive closes) are still enforced by the
//! model constructors.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::models::{ExchangeRateSeries, PriceBar, PriceSeries};

/// Load a validated price series from a JSON file.
pub fn load_price_series(path: &Path) -> Result<PriceSeries> {
    let bars = load_bars(path)?;
    let series = PriceSeries::new(bars)
        .with_context(|| format!("invalid price series in {}", path.display()))?;
    info!(path = %path.display(), bars = series.len(), "Loaded price series");
    Ok(series)
}

/// Load a validated exchange-rate series from a JSON file.
pub fn load_rate_series(path: &Path) -> Result<ExchangeRateSeries> {
    let bars = load_bars(path)?;
    let series = ExchangeRateSeries::new(bars)
        .with_context(|| format!("invalid exchange-rate series in {}", path.display()))?;
    info!(path = %path.display(), "Loaded exchange-rate series");
    Ok(series)
}

fn load_bars(path: &Path) -> Result<Vec<PriceBar>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_bars_from_json() {
        let raw = r#"[
            {"timestamp": "2024-01-02T15:00:00Z", "close": "187.15"},
            {"timestamp": "2024-01-03T15:00:00Z", "close": "185.64", "volume": "58414500"}
        ]"#;
        let bars: Vec<PriceBar> = serde_json::from_str(raw).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, dec!(187.15));
        assert_eq!(bars[1].volume, Some(dec!(58414500)));

        let series = PriceSeries::new(bars).unwrap();
        assert_eq!(series.elapsed_days(), 1);
    }
}
