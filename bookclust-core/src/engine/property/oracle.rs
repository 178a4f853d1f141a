//! Reachability oracle for propagation property verification.
//!
//! The fixpoint label of a node is the smallest initial label among all
//! nodes that can reach it (itself included). The oracle computes that
//! directly with one breadth-first search per node, which is slow but
//! obviously correct.

use std::collections::VecDeque;

use crate::{Edge, Label, PropagationMode};

/// Result of the reachability oracle.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct OracleResult {
    /// Expected fixpoint labels in node order.
    pub labels: Vec<Label>,
    /// Largest shortest-path hop count between any two connected nodes.
    /// Neither kernel needs more changing passes than this.
    pub max_hops: usize,
}

/// Computes the expected fixpoint for already validated input.
pub(super) fn reachability_minimum(
    node_count: usize,
    edges: &[Edge],
    initial: &[Label],
    mode: PropagationMode,
) -> OracleResult {
    let adjacency = build_adjacency(node_count, edges, mode);
    let mut labels = initial.to_vec();
    let mut max_hops = 0;

    for (origin, &origin_label) in initial.iter().enumerate() {
        let hops = bfs_hops(&adjacency, origin);
        for (node, distance) in hops.iter().enumerate() {
            let Some(distance) = distance else {
                continue;
            };
            max_hops = max_hops.max(*distance);
            if origin_label < labels[node] {
                labels[node] = origin_label;
            }
        }
    }

    OracleResult { labels, max_hops }
}

fn build_adjacency(node_count: usize, edges: &[Edge], mode: PropagationMode) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); node_count];
    for edge in edges {
        let (left, right) = (edge.left() - 1, edge.right() - 1);
        adjacency[left].push(right);
        if mode.is_symmetric() {
            adjacency[right].push(left);
        }
    }
    adjacency
}

fn bfs_hops(adjacency: &[Vec<usize>], origin: usize) -> Vec<Option<usize>> {
    let mut hops = vec![None; adjacency.len()];
    let mut queue = VecDeque::new();
    hops[origin] = Some(0);
    queue.push_back(origin);

    while let Some(node) = queue.pop_front() {
        let next = hops[node].map_or(0, |distance| distance + 1);
        for &neighbour in &adjacency[node] {
            if hops[neighbour].is_none() {
                hops[neighbour] = Some(next);
                queue.push_back(neighbour);
            }
        }
    }
    hops
}
