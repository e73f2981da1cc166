//! Per-bar return series: simple returns, base-currency conversion, the
//! lagged strategy returns, and cumulative compounding.
//!
//! Undefined entries are `None` (the first bar has no prior close; the first
//! strategy bar has no prior signal). They are never encoded as zero.

use rust_decimal::Decimal;

use crate::error::EngineError;
use crate::strategy::Signal;

/// Simple per-bar returns: `close[i] / close[i-1] - 1`, `None` at index 0.
pub fn compute_returns(closes: &[Decimal]) -> Vec<Option<Decimal>> {
    let mut out = Vec::with_capacity(closes.len());
    for (i, close) in closes.iter().enumerate() {
        if i == 0 {
            out.push(None);
        } else {
            out.push(Some(close / closes[i - 1] - Decimal::ONE));
        }
    }
    out
}

/// Convert local-currency returns to base currency.
///
/// `aligned_rates` is the exchange rate forward-filled onto each price
/// timestamp. The conversion multiplies the price return by the rate
/// series' own return per bar, a first-order approximation of the true
/// compounded conversion, kept as the source data pipeline defined it.
/// Bars with no prior rate observation pass through unconverted.
pub fn compute_base_currency_returns(
    price_returns: &[Option<Decimal>],
    aligned_rates: Option<&[Option<Decimal>]>,
) -> Result<Vec<Option<Decimal>>, EngineError> {
    let rates = match aligned_rates {
        None => return Ok(price_returns.to_vec()),
        Some(rates) => rates,
    };

    if rates.len() != price_returns.len() {
        return Err(EngineError::LengthMismatch {
            left: price_returns.len(),
            right: rates.len(),
        });
    }

    let mut out = Vec::with_capacity(price_returns.len());
    for (i, price_return) in price_returns.iter().enumerate() {
        let converted = price_return.map(|r| {
            match (i.checked_sub(1).and_then(|p| rates[p]), rates[i]) {
                (Some(prev), Some(curr)) if !prev.is_zero() => {
                    r * (curr / prev - Decimal::ONE)
                }
                // No usable rate pair: conversion factor contributes 1.
                _ => r,
            }
        });
        out.push(converted);
    }
    Ok(out)
}

/// Strategy returns with the mandatory one-bar signal lag:
/// `strategy_return[i] = signal[i-1] * base_return[i]`.
///
/// The lag is what keeps the strategy free of lookahead bias: a stance taken
/// at bar `i-1`'s close is the exposure realized over the move into bar `i`.
pub fn compute_strategy_returns(
    signals: &[Signal],
    base_returns: &[Option<Decimal>],
) -> Result<Vec<Option<Decimal>>, EngineError> {
    if signals.len() != base_returns.len() {
        return Err(EngineError::LengthMismatch {
            left: signals.len(),
            right: base_returns.len(),
        });
    }

    let mut out = Vec::with_capacity(base_returns.len());
    for i in 0..base_returns.len() {
        if i == 0 {
            out.push(None);
        } else {
            out.push(base_returns[i].map(|r| signals[i - 1].value() * r));
        }
    }
    Ok(out)
}

/// Buy-and-hold baseline: always fully invested, no signal gating.
pub fn compute_buy_and_hold_returns(base_returns: &[Option<Decimal>]) -> Vec<Option<Decimal>> {
    base_returns.to_vec()
}

/// Running product of `(1 + r)` seeded at 1. Undefined returns leave the
/// accumulated value unchanged (flat position).
pub fn compute_cumulative_returns(returns: &[Option<Decimal>]) -> Vec<Decimal> {
    let mut out = Vec::with_capacity(returns.len());
    let mut acc = Decimal::ONE;
    for r in returns {
        if let Some(r) = r {
            acc *= Decimal::ONE + r;
        }
        out.push(acc);
    }
    out
}
