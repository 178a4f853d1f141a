//! Benchmark parameter types.

use std::fmt;

use bookclust_core::ExecutionStrategy;

use crate::source::GraphShape;

/// Parameters identifying one propagation benchmark case.
#[derive(Clone, Debug)]
pub struct PropagationBenchParams {
    /// Number of nodes in the graph.
    pub node_count: usize,
    /// Graph topology.
    pub shape: GraphShape,
    /// Kernel under test.
    pub strategy: ExecutionStrategy,
}

impl fmt::Display for PropagationBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/n={}/{:?}",
            self.shape.name(),
            self.node_count,
            self.strategy
        )
    }
}
