//! Fixture types for propagation property tests.

use crate::{Edge, Graph, Label, LabelStore};

/// Shape of a generated graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Topology {
    /// Random directed pairs, roughly `1.5n` of them.
    Random,
    /// Forward chain `1 -> 2 -> ... -> n`, edges listed in chain order.
    Chain,
    /// The same chain listed back to front, the slowest order to relax.
    ReversedChain,
    /// One-way cycle through every node.
    Cycle,
    /// Several disjoint groups with edges in both directions.
    Components,
    /// A hub linked both ways to every other node.
    Star,
}

impl Topology {
    pub(super) const ALL: [Self; 6] = [
        Self::Random,
        Self::Chain,
        Self::ReversedChain,
        Self::Cycle,
        Self::Components,
        Self::Star,
    ];
}

/// Generated graph plus the labels it starts from.
#[derive(Clone, Debug)]
pub(super) struct PropagationFixture {
    pub node_count: usize,
    pub edges: Vec<Edge>,
    pub labels: Vec<Label>,
    pub topology: Topology,
    /// Seed used for any follow-up randomness (edge shuffles).
    pub seed: u64,
}

impl PropagationFixture {
    pub(super) fn graph(&self) -> Graph {
        Graph::new(self.node_count, self.edges.clone())
    }

    pub(super) fn store(&self) -> LabelStore {
        LabelStore::new(self.labels.clone())
    }

    pub(super) fn describe(&self) -> String {
        format!(
            "topology={:?}, nodes={}, edges={}, seed={}",
            self.topology,
            self.node_count,
            self.edges.len(),
            self.seed,
        )
    }
}
