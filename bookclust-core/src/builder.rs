//! Builder utilities for configuring the propagation engine.
//!
//! Exposes the propagation mode, the execution strategy selection surface,
//! and builder validation used before constructing [`PropagationEngine`]
//! instances.

use std::num::NonZeroUsize;

use crate::{Result, engine::PropagationEngine, error::PropagationError};

/// States how the caller wants each edge to be interpreted.
///
/// # Examples
/// ```
/// use bookclust_core::PropagationMode;
///
/// let mode = PropagationMode::Symmetric;
/// assert!(mode.is_symmetric());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropagationMode {
    /// Push labels from `left` to `right` only. Each node ends with the
    /// smallest label among the nodes that can reach it.
    Directed,
    /// Relax every edge in both directions, merging weakly connected
    /// components onto their minimum label.
    Symmetric,
}

impl PropagationMode {
    /// Returns `true` for [`Self::Symmetric`].
    #[must_use]
    pub const fn is_symmetric(self) -> bool {
        matches!(self, Self::Symmetric)
    }
}

/// Indicates how [`PropagationEngine`] selects a relaxation kernel when
/// [`PropagationEngine::run`] is invoked.
///
/// `Auto` resolves deterministically: graphs with at least
/// [`PARALLEL_EDGE_THRESHOLD`] edges use the Rayon kernel when the
/// `parallel` feature is compiled in, everything else runs sequentially.
/// Both kernels reach the same fixpoint.
///
/// # Examples
/// ```
/// use bookclust_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::Auto;
/// assert!(matches!(strategy, ExecutionStrategy::Auto));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Allow the library to select an appropriate kernel automatically.
    Auto,
    /// Single-threaded in-place passes.
    Sequential,
    /// Data-parallel passes with atomic label updates.
    Parallel,
}

/// Edge count from which [`ExecutionStrategy::Auto`] prefers the parallel
/// kernel.
pub const PARALLEL_EDGE_THRESHOLD: usize = 1 << 16;

/// Configures and constructs [`PropagationEngine`] instances.
///
/// The propagation mode has no default; callers state it up front.
///
/// # Examples
/// ```
/// use bookclust_core::{EngineBuilder, ExecutionStrategy, PropagationMode};
///
/// let engine = EngineBuilder::new(PropagationMode::Symmetric)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .with_max_passes(100)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(engine.mode(), PropagationMode::Symmetric);
/// assert_eq!(engine.max_passes().map(|cap| cap.get()), Some(100));
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    mode: PropagationMode,
    execution_strategy: ExecutionStrategy,
    max_passes: Option<usize>,
}

impl EngineBuilder {
    /// Creates a builder for `mode` with automatic strategy selection and
    /// no pass cap.
    #[must_use]
    pub fn new(mode: PropagationMode) -> Self {
        Self {
            mode,
            execution_strategy: ExecutionStrategy::Auto,
            max_passes: None,
        }
    }

    /// Returns the configured propagation mode.
    #[must_use]
    #[rustfmt::skip]
    pub fn mode(&self) -> PropagationMode { self.mode }

    /// Sets the execution strategy to use when running the engine.
    ///
    /// # Examples
    /// ```
    /// use bookclust_core::{EngineBuilder, ExecutionStrategy, PropagationMode};
    ///
    /// let builder = EngineBuilder::new(PropagationMode::Directed)
    ///     .with_execution_strategy(ExecutionStrategy::Sequential);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Sequential);
    /// ```
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Caps the number of relaxation passes.
    ///
    /// The cap is a diagnostic guard: when it stops a run the engine reports
    /// an unconverged result instead of failing.
    #[must_use]
    pub fn with_max_passes(mut self, passes: usize) -> Self {
        self.max_passes = Some(passes);
        self
    }

    /// Returns the configured pass cap, if any.
    #[must_use]
    pub fn max_passes(&self) -> Option<usize> {
        self.max_passes
    }

    /// Validates the configuration and constructs a [`PropagationEngine`].
    ///
    /// # Errors
    /// Returns [`PropagationError::InvalidMaxPasses`] when the pass cap is
    /// zero.
    ///
    /// # Examples
    /// ```
    /// use bookclust_core::{EngineBuilder, PropagationError, PropagationMode};
    ///
    /// let err = EngineBuilder::new(PropagationMode::Directed)
    ///     .with_max_passes(0)
    ///     .build()
    ///     .expect_err("a zero cap is rejected");
    /// assert!(matches!(err, PropagationError::InvalidMaxPasses { got: 0 }));
    /// ```
    pub fn build(self) -> Result<PropagationEngine> {
        let max_passes = self
            .max_passes
            .map(|got| NonZeroUsize::new(got).ok_or(PropagationError::InvalidMaxPasses { got }))
            .transpose()?;

        Ok(PropagationEngine::new(
            self.mode,
            self.execution_strategy,
            max_passes,
        ))
    }
}
