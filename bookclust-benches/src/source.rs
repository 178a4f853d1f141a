//! Seeded synthetic graphs for benchmarking.
//!
//! Every generator is deterministic for a given seed so that timings from
//! different runs compare the same work.

use bookclust_core::{Edge, Graph, LabelStore};
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};

/// Errors that may occur during synthetic graph generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The requested node count was zero.
    #[error("node count must be greater than zero")]
    ZeroNodes,
    /// A shape parameter that must be positive was zero.
    #[error("{context} must be greater than zero")]
    ZeroParameter {
        /// Which parameter was zero.
        context: &'static str,
    },
}

/// Graph topologies exercised by the benchmarks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphShape {
    /// One chain listed back to front, the slowest order for in-place
    /// passes.
    ReversedChain,
    /// Disjoint components of `size` nodes, each linked as a shuffled star
    /// in both directions, like records sharing one identifier.
    Components {
        /// Nodes per component.
        size: usize,
    },
    /// Uniformly random directed edges.
    Random {
        /// Edges generated per node.
        edges_per_node: usize,
    },
}

impl GraphShape {
    /// Short label used in benchmark identifiers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ReversedChain => "reversed_chain",
            Self::Components { .. } => "components",
            Self::Random { .. } => "random",
        }
    }
}

/// Configuration for synthetic graph generation.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of nodes.
    pub node_count: usize,
    /// Topology to generate.
    pub shape: GraphShape,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A generated graph together with its singleton starting labels.
///
/// # Examples
/// ```
/// use bookclust_benches::source::{GraphShape, SyntheticConfig, SyntheticGraph};
///
/// let config = SyntheticConfig {
///     node_count: 12,
///     shape: GraphShape::Components { size: 4 },
///     seed: 42,
/// };
/// let synthetic = SyntheticGraph::generate(&config).expect("valid config");
/// assert_eq!(synthetic.graph().node_count(), 12);
/// assert_eq!(synthetic.labels().len(), 12);
/// ```
#[derive(Clone, Debug)]
pub struct SyntheticGraph {
    graph: Graph,
    labels: LabelStore,
}

impl SyntheticGraph {
    /// Generates a graph from `config`.
    ///
    /// # Errors
    /// Returns [`SyntheticError::ZeroNodes`] for an empty graph and
    /// [`SyntheticError::ZeroParameter`] for a zero component size or edge
    /// density.
    pub fn generate(config: &SyntheticConfig) -> Result<Self, SyntheticError> {
        let nodes = config.node_count;
        if nodes == 0 {
            return Err(SyntheticError::ZeroNodes);
        }
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let edges = match config.shape {
            GraphShape::ReversedChain => (1..nodes).rev().map(|n| Edge::new(n, n + 1)).collect(),
            GraphShape::Components { size: 0 } => {
                return Err(SyntheticError::ZeroParameter {
                    context: "component size",
                });
            }
            GraphShape::Components { size } => component_edges(nodes, size, &mut rng),
            GraphShape::Random { edges_per_node: 0 } => {
                return Err(SyntheticError::ZeroParameter {
                    context: "edges per node",
                });
            }
            GraphShape::Random { edges_per_node } => (0..nodes.saturating_mul(edges_per_node))
                .map(|_| Edge::new(rng.gen_range(1..=nodes), rng.gen_range(1..=nodes)))
                .collect(),
        };
        Ok(Self {
            graph: Graph::new(nodes, edges),
            labels: LabelStore::singleton(nodes),
        })
    }

    /// Returns the generated graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn graph(&self) -> &Graph { &self.graph }

    /// Returns the starting labels.
    #[must_use]
    #[rustfmt::skip]
    pub fn labels(&self) -> &LabelStore { &self.labels }
}

fn component_edges(nodes: usize, size: usize, rng: &mut SmallRng) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(nodes.saturating_mul(2));
    let mut start = 1;
    while start <= nodes {
        let end = start.saturating_add(size - 1).min(nodes);
        for member in start + 1..=end {
            edges.push(Edge::new(start, member));
            edges.push(Edge::new(member, start));
        }
        start = end + 1;
    }
    edges.shuffle(rng);
    edges
}
