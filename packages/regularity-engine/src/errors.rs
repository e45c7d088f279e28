//! Typed errors for the regularity driver.
//!
//! Using thiserror for ergonomic error handling with zero overhead, the
//! same way the rest of this pipeline's error types are built.

use thiserror::Error;

/// Errors the decomposition driver can raise while testing a matrix.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegularityError {
    /// The input matrix violates a structural precondition.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A stage exceeded the caller's time budget.
    #[error("time limit exceeded in stage {stage} after {elapsed_ms}ms")]
    TimeLimit { stage: String, elapsed_ms: u64 },

    /// An invariant the driver relies on was violated. Never expected in
    /// correct operation; treat as a bug report, not a recoverable state.
    #[error("internal invariant violated: {reason}")]
    Internal { reason: String },
}

impl RegularityError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn time_limit(stage: impl Into<String>, elapsed_ms: u64) -> Self {
        Self::TimeLimit {
            stage: stage.into(),
            elapsed_ms,
        }
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }

    /// Whether a caller might reasonably retry with more time/resources.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::TimeLimit { .. })
    }

    /// Stable category tag, useful for stats/metrics.
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::TimeLimit { .. } => "time_limit",
            Self::Internal { .. } => "internal",
        }
    }
}

/// Result type alias for driver operations.
pub type RegularityResult<T> = Result<T, RegularityError>;
