//! Cluster-label propagation to a fixpoint.
//!
//! Every pass scans the whole edge list and overwrites a target label with
//! its source label whenever the source is strictly smaller. Passes repeat
//! until one changes nothing. Labels only ever decrease, so the loop
//! terminates, and the fixpoint it reaches does not depend on edge order;
//! only the number of passes does.
//!
//! The first pass always runs. The change count that gates the next pass
//! is produced by the pass itself.
//!
//! Two kernels are available: a sequential in-place scan whose updates are
//! visible to later edges of the same pass, and (with the `parallel`
//! feature) a Rayon scan using atomic "store if smaller" updates and a
//! shared change flag checked between passes.

#[cfg(feature = "parallel")]
mod parallel;
mod sequential;

use std::num::NonZeroUsize;

use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use crate::builder::PARALLEL_EDGE_THRESHOLD;
use crate::{
    Result,
    builder::{ExecutionStrategy, PropagationMode},
    error::PropagationError,
    graph::{Edge, Graph, validate_edges, zip_edges},
    labels::LabelStore,
};

/// Summary of one propagation run.
///
/// # Examples
/// ```
/// use bookclust_core::{Edge, propagate};
///
/// let mut labels = [5, 1, 9];
/// let report = propagate(3, &mut labels, &[Edge::new(1, 2), Edge::new(2, 3)])?;
/// assert_eq!(labels, [5, 1, 1]);
/// assert_eq!(report.passes(), 2);
/// assert_eq!(report.updates(), 1);
/// assert!(report.converged());
/// # Ok::<(), bookclust_core::PropagationError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Convergence {
    passes: usize,
    updates: usize,
    converged: bool,
}

impl Convergence {
    /// Returns the number of passes executed, including the final quiet
    /// pass that confirmed the fixpoint.
    #[must_use]
    #[rustfmt::skip]
    pub fn passes(&self) -> usize { self.passes }

    /// Returns the number of passes that changed at least one label.
    #[must_use]
    pub fn changing_passes(&self) -> usize {
        if self.converged {
            self.passes.saturating_sub(1)
        } else {
            self.passes
        }
    }

    /// Returns the total number of label overwrites.
    #[must_use]
    #[rustfmt::skip]
    pub fn updates(&self) -> usize { self.updates }

    /// Returns `false` only when a pass cap stopped the run early.
    #[must_use]
    #[rustfmt::skip]
    pub fn converged(&self) -> bool { self.converged }
}

/// Runs directed propagation over caller-owned labels.
///
/// Slot `i` of `labels` belongs to node `i + 1`. Any totally ordered label
/// type works.
///
/// # Errors
/// Returns [`PropagationError::LabelLengthMismatch`] when
/// `labels.len() != node_count` and [`PropagationError::OutOfRange`] when an
/// edge endpoint lies outside `1..=node_count`. `labels` is untouched on
/// error.
///
/// # Examples
/// ```
/// use bookclust_core::{Edge, propagate};
///
/// // A one-way cycle still carries the minimum all the way round.
/// let mut labels = ["c", "a", "b"];
/// let edges = [Edge::new(1, 2), Edge::new(2, 3), Edge::new(3, 1)];
/// propagate(3, &mut labels, &edges)?;
/// assert_eq!(labels, ["a", "a", "a"]);
/// # Ok::<(), bookclust_core::PropagationError>(())
/// ```
pub fn propagate<L: Ord + Copy>(
    node_count: usize,
    labels: &mut [L],
    edges: &[Edge],
) -> Result<Convergence> {
    validate_input(node_count, labels.len(), edges)?;
    Ok(sequential::relax(labels, edges, PropagationMode::Directed, None))
}

/// Runs directed propagation over parallel source/target sequences.
///
/// # Errors
/// Returns [`PropagationError::EdgeLengthMismatch`] when the sequences
/// differ in length, plus the errors documented on [`propagate`].
///
/// # Examples
/// ```
/// use bookclust_core::propagate_parallel_arrays;
///
/// let mut labels = [1, 2, 3, 4, 5];
/// let sources = [1, 2, 2, 3, 4, 5];
/// let targets = [2, 1, 3, 2, 5, 4];
/// propagate_parallel_arrays(5, &mut labels, &sources, &targets)?;
/// assert_eq!(labels, [1, 1, 1, 4, 4]);
/// # Ok::<(), bookclust_core::PropagationError>(())
/// ```
pub fn propagate_parallel_arrays<L: Ord + Copy>(
    node_count: usize,
    labels: &mut [L],
    sources: &[usize],
    targets: &[usize],
) -> Result<Convergence> {
    let edges = zip_edges(sources, targets)?;
    propagate(node_count, labels, &edges)
}

/// Returns `true` when no edge of `graph` would change `labels` under `mode`.
///
/// Edges whose endpoints fall outside `labels` are ignored.
///
/// # Examples
/// ```
/// use bookclust_core::{Edge, Graph, PropagationMode, is_fixpoint};
///
/// let graph = Graph::new(2, vec![Edge::new(1, 2)]);
/// assert!(is_fixpoint(&graph, &[1, 1], PropagationMode::Directed));
/// assert!(is_fixpoint(&graph, &[2, 1], PropagationMode::Directed));
/// assert!(!is_fixpoint(&graph, &[2, 1], PropagationMode::Symmetric));
/// ```
#[must_use]
pub fn is_fixpoint<L: Ord>(graph: &Graph, labels: &[L], mode: PropagationMode) -> bool {
    let settled = |from: usize, to: usize| match (labels.get(from), labels.get(to)) {
        (Some(source), Some(target)) => source >= target,
        _ => true,
    };
    graph.edges().iter().all(|edge| {
        let (left, right) = edge.slots();
        settled(left, right) && (!mode.is_symmetric() || settled(right, left))
    })
}

fn validate_input(node_count: usize, labels: usize, edges: &[Edge]) -> Result<()> {
    if labels != node_count {
        return Err(PropagationError::LabelLengthMismatch { labels, node_count });
    }
    validate_edges(node_count, edges)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Kernel {
    Sequential,
    #[cfg(feature = "parallel")]
    Parallel,
}

/// Configured propagation engine.
///
/// # Examples
/// ```
/// use bookclust_core::{Edge, EngineBuilder, Graph, LabelStore, PropagationMode};
///
/// let engine = EngineBuilder::new(PropagationMode::Symmetric).build()?;
/// let graph = Graph::new(5, vec![Edge::new(1, 2), Edge::new(2, 3), Edge::new(4, 5)]);
/// let mut labels = LabelStore::singleton(5);
/// let report = engine.run(&graph, &mut labels)?;
/// assert_eq!(labels.as_slice(), &[1, 1, 1, 4, 4]);
/// assert!(report.converged());
/// # Ok::<(), bookclust_core::PropagationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PropagationEngine {
    mode: PropagationMode,
    execution_strategy: ExecutionStrategy,
    max_passes: Option<NonZeroUsize>,
}

impl PropagationEngine {
    pub(crate) fn new(
        mode: PropagationMode,
        execution_strategy: ExecutionStrategy,
        max_passes: Option<NonZeroUsize>,
    ) -> Self {
        Self {
            mode,
            execution_strategy,
            max_passes,
        }
    }

    /// Returns the configured propagation mode.
    #[must_use]
    #[rustfmt::skip]
    pub fn mode(&self) -> PropagationMode { self.mode }

    /// Returns the execution strategy that will be used when running.
    #[must_use]
    #[rustfmt::skip]
    pub fn execution_strategy(&self) -> ExecutionStrategy { self.execution_strategy }

    /// Returns the diagnostic pass cap, if configured.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_passes(&self) -> Option<NonZeroUsize> { self.max_passes }

    /// Propagates labels over `graph` until no edge changes anything.
    ///
    /// # Errors
    /// Returns the validation errors documented on [`propagate`], and
    /// [`PropagationError::BackendUnavailable`] when
    /// [`ExecutionStrategy::Parallel`] is requested without the `parallel`
    /// feature. `labels` is untouched on error.
    #[instrument(
        name = "core.propagate",
        err,
        skip(self, graph, labels),
        fields(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            mode = ?self.mode,
            strategy = ?self.execution_strategy,
        ),
    )]
    pub fn run(&self, graph: &Graph, labels: &mut LabelStore) -> Result<Convergence> {
        validate_input(graph.node_count(), labels.len(), graph.edges())?;
        let kernel = self.select_kernel(graph.edge_count())?;

        let report = match kernel {
            Kernel::Sequential => sequential::relax(
                labels.as_mut_slice(),
                graph.edges(),
                self.mode,
                self.max_passes,
            ),
            #[cfg(feature = "parallel")]
            Kernel::Parallel => parallel::relax(
                labels.as_mut_slice(),
                graph.edges(),
                self.mode,
                self.max_passes,
            ),
        };

        if report.converged() {
            info!(
                passes = report.passes(),
                updates = report.updates(),
                kernel = ?kernel,
                "propagation converged"
            );
        } else {
            warn!(
                passes = report.passes(),
                updates = report.updates(),
                kernel = ?kernel,
                "pass cap reached before the labels converged"
            );
        }
        Ok(report)
    }

    fn select_kernel(&self, edge_count: usize) -> Result<Kernel> {
        match self.execution_strategy {
            ExecutionStrategy::Sequential => Ok(Kernel::Sequential),
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Parallel => Ok(Kernel::Parallel),
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Parallel => Err(PropagationError::BackendUnavailable {
                requested: ExecutionStrategy::Parallel,
            }),
            ExecutionStrategy::Auto => Ok(auto_kernel(edge_count)),
        }
    }
}

#[cfg(feature = "parallel")]
fn auto_kernel(edge_count: usize) -> Kernel {
    if edge_count >= PARALLEL_EDGE_THRESHOLD {
        Kernel::Parallel
    } else {
        Kernel::Sequential
    }
}

#[cfg(not(feature = "parallel"))]
const fn auto_kernel(_edge_count: usize) -> Kernel {
    Kernel::Sequential
}

#[cfg(test)]
mod property;
