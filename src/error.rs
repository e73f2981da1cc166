//! Error taxonomy for the strategy engine.
//!
//! Two families: input errors reject malformed series before any computation
//! runs, domain errors report mathematically undefined results (zero elapsed
//! time, zero variance, empty samples). Neither is ever coerced to a default
//! or NaN.

use thiserror::Error;

/// Errors produced by the strategy engine.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    /// Timestamps must be strictly ascending with no duplicates.
    #[error("timestamps not strictly ascending at index {index}")]
    NonAscendingTimestamps { index: usize },

    /// Close prices must be positive.
    #[error("non-positive close price at index {index}")]
    NonPositiveClose { index: usize },

    /// A series must contain at least one bar.
    #[error("price series is empty")]
    EmptySeries,

    /// Moving-average windows must be at least one bar wide.
    #[error("invalid moving-average window: {window}")]
    InvalidWindow { window: usize },

    /// Two series that must be the same length are not.
    #[error("series length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Annualization is undefined when the series spans zero days.
    #[error("cannot annualize: first and last bar are {elapsed_days} days apart")]
    ZeroElapsedTime { elapsed_days: i64 },

    /// Sharpe ratio is undefined when excess returns have no variance.
    #[error("sharpe ratio undefined: zero variance over {samples} return sample(s)")]
    ZeroVariance { samples: usize },

    /// Win rate and Sharpe need at least one defined return.
    #[error("no defined returns in series")]
    NoDefinedReturns,
}

impl EngineError {
    /// True for errors caused by malformed input rather than an undefined
    /// mathematical result.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EngineError::NonAscendingTimestamps { .. }
                | EngineError::NonPositiveClose { .. }
                | EngineError::EmptySeries
                | EngineError::InvalidWindow { .. }
                | EngineError::LengthMismatch { .. }
        )
    }
}
