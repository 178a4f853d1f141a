use bookclust_core::Edge;

/// Expands undirected pairs into edges in both directions.
#[must_use]
pub fn both_ways(pairs: &[(usize, usize)]) -> Vec<Edge> {
    pairs
        .iter()
        .flat_map(|&(left, right)| [Edge::new(left, right), Edge::new(right, left)])
        .collect()
}

/// Builds one-way edges from pairs.
#[must_use]
pub fn one_way(pairs: &[(usize, usize)]) -> Vec<Edge> {
    pairs.iter().copied().map(Edge::from).collect()
}
