//! Strategy logic: moving averages, signals, and return series.

mod config;
mod indicators;
mod returns;
mod signal;

pub use config::BacktestConfig;
pub use indicators::compute_moving_average;
pub use returns::{
    compute_base_currency_returns, compute_buy_and_hold_returns, compute_cumulative_returns,
    compute_returns, compute_strategy_returns,
};
pub use signal::{compute_signal, Signal};
