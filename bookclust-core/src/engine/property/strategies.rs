//! Graph generation strategies for propagation property tests.
//!
//! Each generator builds 1-based edges over a seeded [`SmallRng`] so that
//! any failing case can be replayed from its topology and seed.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::{Edge, Label};

use super::types::{PropagationFixture, Topology};

/// Minimum node count for generated graphs.
const MIN_NODES: usize = 1;
/// Maximum node count for generated graphs.
const MAX_NODES: usize = 48;

/// Generates fixtures across every [`Topology`].
pub(super) fn propagation_fixture_strategy() -> impl Strategy<Value = PropagationFixture> {
    (prop::sample::select(Topology::ALL.to_vec()), any::<u64>())
        .prop_map(|(topology, seed)| generate_fixture(topology, seed))
}

/// Generates a fixture for a specific topology and seed.
pub(super) fn generate_fixture(topology: Topology, seed: u64) -> PropagationFixture {
    let mut rng = SmallRng::seed_from_u64(seed);
    let node_count = rng.gen_range(MIN_NODES..=MAX_NODES);
    let edges = match topology {
        Topology::Random => random_edges(node_count, &mut rng),
        Topology::Chain => chain_edges(node_count),
        Topology::ReversedChain => {
            let mut edges = chain_edges(node_count);
            edges.reverse();
            edges
        }
        Topology::Cycle => cycle_edges(node_count),
        Topology::Components => component_edges(node_count, &mut rng),
        Topology::Star => star_edges(node_count, &mut rng),
    };
    let labels = random_labels(node_count, &mut rng);

    PropagationFixture {
        node_count,
        edges,
        labels,
        topology,
        seed,
    }
}

/// Returns `edges` in a seeded random order.
pub(super) fn shuffled(edges: &[Edge], seed: u64) -> Vec<Edge> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut shuffled = edges.to_vec();
    shuffled.shuffle(&mut rng);
    shuffled
}

// ── Labels ──────────────────────────────────────────────────────────────

/// Draws labels from a range about as wide as the node count so that ties
/// and negative values both show up.
fn random_labels(node_count: usize, rng: &mut SmallRng) -> Vec<Label> {
    let bound = Label::try_from(node_count).unwrap_or(Label::MAX);
    (0..node_count).map(|_| rng.gen_range(-bound..=bound)).collect()
}

// ── Topologies ──────────────────────────────────────────────────────────

fn random_edges(node_count: usize, rng: &mut SmallRng) -> Vec<Edge> {
    let edge_count = node_count + node_count / 2;
    (0..edge_count)
        .map(|_| {
            Edge::new(
                rng.gen_range(1..=node_count),
                rng.gen_range(1..=node_count),
            )
        })
        .collect()
}

fn chain_edges(node_count: usize) -> Vec<Edge> {
    (1..node_count).map(|node| Edge::new(node, node + 1)).collect()
}

fn cycle_edges(node_count: usize) -> Vec<Edge> {
    let mut edges = chain_edges(node_count);
    edges.push(Edge::new(node_count, 1));
    edges
}

/// Splits the nodes into contiguous groups and links random pairs inside
/// each group in both directions. No edge crosses a group boundary.
fn component_edges(node_count: usize, rng: &mut SmallRng) -> Vec<Edge> {
    let mut edges = Vec::new();
    let mut start = 1;
    while start <= node_count {
        let size = rng.gen_range(1..=8).min(node_count - start + 1);
        let end = start + size - 1;
        for node in (start + 1)..=end {
            let partner = rng.gen_range(start..node);
            edges.push(Edge::new(node, partner));
            edges.push(Edge::new(partner, node));
        }
        start = end + 1;
    }
    edges.shuffle(rng);
    edges
}

fn star_edges(node_count: usize, rng: &mut SmallRng) -> Vec<Edge> {
    let hub = rng.gen_range(1..=node_count);
    (1..=node_count)
        .filter(|&leaf| leaf != hub)
        .flat_map(|leaf| [Edge::new(hub, leaf), Edge::new(leaf, hub)])
        .collect()
}
