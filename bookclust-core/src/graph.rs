//! Immutable graph input for label propagation.
//!
//! Nodes are identified by 1-based ids in `1..=node_count`. Edges are
//! directed pairs `(left, right)` meaning "push `left`'s label to `right`
//! when it is smaller". Self-loops and parallel edges are accepted as-is.

use std::{fmt, num::NonZeroUsize};

use crate::error::{Endpoint, PropagationError, Result};

/// 1-based identifier of a candidate record.
///
/// # Examples
/// ```
/// use bookclust_core::NodeId;
///
/// let node = NodeId::new(3).expect("non-zero id");
/// assert_eq!(node.get(), 3);
/// assert_eq!(node.index(), 2);
/// assert!(NodeId::new(0).is_none());
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(NonZeroUsize);

impl NodeId {
    /// Creates a node id, returning `None` for `0`.
    #[must_use]
    pub fn new(id: usize) -> Option<Self> {
        NonZeroUsize::new(id).map(Self)
    }

    /// Returns the 1-based numeric id.
    #[rustfmt::skip]
    #[must_use]
    pub fn get(self) -> usize { self.0.get() }

    /// Returns the 0-based slot of this node in a dense label store.
    #[must_use]
    pub fn index(self) -> usize {
        self.0.get() - 1
    }

    pub(crate) fn from_index(index: usize) -> Option<Self> {
        index.checked_add(1).and_then(Self::new)
    }

    /// Id of the node appended after `count` existing nodes.
    pub(crate) const fn after(count: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(count))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A directed propagation relation between two node ids.
///
/// Endpoints are stored as supplied; range checks happen when the edge is
/// handed to the engine so that invalid input is reported rather than
/// silently dropped.
///
/// # Examples
/// ```
/// use bookclust_core::Edge;
///
/// let edge = Edge::new(1, 2);
/// assert_eq!(edge.reversed(), Edge::new(2, 1));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Edge {
    left: usize,
    right: usize,
}

impl Edge {
    /// Creates an edge that propagates from `left` to `right`.
    #[must_use]
    pub const fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    /// Returns the source node id.
    #[must_use]
    #[rustfmt::skip]
    pub const fn left(&self) -> usize { self.left }

    /// Returns the target node id.
    #[must_use]
    #[rustfmt::skip]
    pub const fn right(&self) -> usize { self.right }

    /// Returns the same relation pointing the other way.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self::new(self.right, self.left)
    }

    /// Returns `true` when both endpoints name the same node.
    #[must_use]
    pub const fn is_self_loop(&self) -> bool {
        self.left == self.right
    }

    // Only meaningful after `validate_edges` has accepted the edge.
    pub(crate) const fn slots(&self) -> (usize, usize) {
        (self.left.wrapping_sub(1), self.right.wrapping_sub(1))
    }
}

impl From<(usize, usize)> for Edge {
    fn from((left, right): (usize, usize)) -> Self {
        Self::new(left, right)
    }
}

/// A fixed snapshot of nodes and directed same-as edges.
///
/// # Examples
/// ```
/// use bookclust_core::{Edge, Graph};
///
/// let graph = Graph::new(3, vec![Edge::new(1, 2), Edge::new(2, 3)]);
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// assert!(graph.validate().is_ok());
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Graph {
    node_count: usize,
    edges: Vec<Edge>,
}

impl Graph {
    /// Creates a graph without validating its edges.
    ///
    /// The engine validates every endpoint before running; call
    /// [`Self::validate`] to check earlier.
    #[must_use]
    pub fn new(node_count: usize, edges: Vec<Edge>) -> Self {
        Self { node_count, edges }
    }

    /// Builds a graph from parallel source/target sequences.
    ///
    /// # Errors
    /// Returns [`PropagationError::EdgeLengthMismatch`] when the sequences
    /// differ in length.
    ///
    /// # Examples
    /// ```
    /// use bookclust_core::{Edge, Graph};
    ///
    /// let graph = Graph::from_parallel_arrays(3, &[1, 2], &[2, 3])?;
    /// assert_eq!(graph.edges(), &[Edge::new(1, 2), Edge::new(2, 3)]);
    /// # Ok::<(), bookclust_core::PropagationError>(())
    /// ```
    pub fn from_parallel_arrays(
        node_count: usize,
        sources: &[usize],
        targets: &[usize],
    ) -> Result<Self> {
        Ok(Self::new(node_count, zip_edges(sources, targets)?))
    }

    /// Returns the number of nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns the number of directed edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Returns the edges in their fixed processing order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Returns a graph holding every edge in both directions.
    ///
    /// Running directed propagation over the closure is equivalent to a
    /// symmetric run over `self`.
    #[must_use]
    pub fn symmetric_closure(&self) -> Self {
        let edges = self
            .edges
            .iter()
            .flat_map(|edge| [*edge, edge.reversed()])
            .collect();
        Self::new(self.node_count, edges)
    }

    /// Checks that every endpoint lies in `1..=node_count`.
    ///
    /// # Errors
    /// Returns [`PropagationError::OutOfRange`] for the first invalid edge.
    pub fn validate(&self) -> Result<()> {
        validate_edges(self.node_count, &self.edges)
    }
}

pub(crate) fn zip_edges(sources: &[usize], targets: &[usize]) -> Result<Vec<Edge>> {
    if sources.len() != targets.len() {
        return Err(PropagationError::EdgeLengthMismatch {
            sources: sources.len(),
            targets: targets.len(),
        });
    }
    Ok(sources
        .iter()
        .zip(targets)
        .map(|(&left, &right)| Edge::new(left, right))
        .collect())
}

pub(crate) fn validate_edges(node_count: usize, edges: &[Edge]) -> Result<()> {
    let in_range = |node: usize| (1..=node_count).contains(&node);
    for (position, edge) in edges.iter().enumerate() {
        for (endpoint, node) in [(Endpoint::Left, edge.left), (Endpoint::Right, edge.right)] {
            if !in_range(node) {
                return Err(PropagationError::OutOfRange {
                    edge: position,
                    endpoint,
                    node,
                    node_count,
                });
            }
        }
    }
    Ok(())
}
