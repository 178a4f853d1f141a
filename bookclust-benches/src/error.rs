//! Benchmark setup error type.

use bookclust_core::PropagationError;

use crate::source::SyntheticError;

/// Errors that may occur while preparing or validating a benchmark.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph generation failed.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Engine configuration or a warm-up run failed.
    #[error("propagation failed: {0}")]
    Propagation(#[from] PropagationError),
}
