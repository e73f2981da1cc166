//! Moving-average crossover backtester.
//!
//! Runs an MA crossover strategy over a historical price series, compares it
//! against buy-and-hold, and prints performance metrics. Price data comes in
//! as JSON files; fetching and charting live outside this binary.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ma_crossover::backtest::Backtester;
use ma_crossover::strategy::BacktestConfig;
use ma_crossover::{data, strategy};

/// MA crossover backtesting CLI.
#[derive(Parser)]
#[command(name = "ma-crossover")]
#[command(about = "Backtest moving-average crossover strategies against buy-and-hold", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a backtest over a price series file
    Backtest {
        /// JSON file with the price series
        #[arg(short, long)]
        prices: PathBuf,

        /// Optional JSON file with an exchange-rate series for
        /// base-currency conversion
        #[arg(short, long)]
        rates: Option<PathBuf>,

        /// Moving-average windows in bars (repeatable)
        #[arg(short, long = "window", default_values_t = [10usize, 20, 30])]
        windows: Vec<usize>,

        /// Annual risk-free rate for the Sharpe ratio
        #[arg(long, default_value = "0.02")]
        risk_free: f64,

        /// Bars per year used for annualization (252 for daily bars)
        #[arg(long, default_value = "252")]
        periods_per_year: f64,
    },

    /// Print the per-bar signal table for one window
    Signals {
        /// JSON file with the price series
        #[arg(short, long)]
        prices: PathBuf,

        /// Moving-average window in bars
        #[arg(short, long, default_value = "20")]
        window: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Backtest {
            prices,
            rates,
            windows,
            risk_free,
            periods_per_year,
        } => {
            let price_series = data::load_price_series(&prices)?;
            let rate_series = rates.map(|p| data::load_rate_series(&p)).transpose()?;

            let config = BacktestConfig {
                windows,
                risk_free_annual_rate: risk_free,
                periods_per_year,
            };

            info!(windows = ?config.windows, "Starting backtest");

            let backtester = Backtester::new(config)?;
            let report = backtester.run(&price_series, rate_series.as_ref())?;
            println!("{}", report);
        }

        Commands::Signals { prices, window } => {
            let price_series = data::load_price_series(&prices)?;

            let closes = price_series.closes();
            let ma = strategy::compute_moving_average(&closes, window)?;
            let signals = strategy::compute_signal(&closes, &ma)?;

            let ma_header = format!("MA{}", window);
            println!("\n{:<17} {:>12} {:>12} {:>7}", "TIMESTAMP", "CLOSE", ma_header, "SIGNAL");
            println!("{}", "-".repeat(52));

            for ((bar, ma), signal) in price_series.bars().iter().zip(&ma).zip(&signals) {
                let ma_cell = ma
                    .map(|m| format!("{:.4}", m))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<17} {:>12} {:>12} {:>7}",
                    bar.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                    bar.close.to_string(),
                    ma_cell,
                    signal.as_str()
                );
            }
        }
    }

    Ok(())
}
