//! Dense, caller-owned cluster labels.

use crate::graph::NodeId;

/// Integer cluster label. Smaller values are more canonical.
pub type Label = i64;

/// Dense label store indexed by 1-based node id.
///
/// The engine mutates the store in place and never changes its length.
///
/// # Examples
/// ```
/// use bookclust_core::{LabelStore, NodeId};
///
/// let store = LabelStore::singleton(3);
/// assert_eq!(store.as_slice(), &[1, 2, 3]);
/// assert_eq!(store.get(NodeId::new(2).expect("non-zero")), Some(2));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LabelStore {
    labels: Vec<Label>,
}

impl LabelStore {
    /// Wraps caller-initialised labels; slot `i` belongs to node `i + 1`.
    #[must_use]
    pub fn new(labels: Vec<Label>) -> Self {
        Self { labels }
    }

    /// Creates the conventional singleton assignment `label(i) = i`.
    #[must_use]
    pub fn singleton(node_count: usize) -> Self {
        let labels = (1..=node_count)
            .map(|id| Label::try_from(id).unwrap_or(Label::MAX))
            .collect();
        Self { labels }
    }

    /// Returns the number of labelled nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.labels.len() }

    /// Returns `true` when the store holds no labels.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.labels.is_empty() }

    /// Returns the label of `node`, or `None` when it is out of range.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<Label> {
        self.labels.get(node.index()).copied()
    }

    /// Returns the labels in node order.
    #[must_use]
    #[rustfmt::skip]
    pub fn as_slice(&self) -> &[Label] { &self.labels }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Label] {
        &mut self.labels
    }

    /// Iterates `(node, label)` pairs in node order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Label)> + '_ {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(index, &label)| NodeId::from_index(index).map(|node| (node, label)))
    }

    /// Consumes the store and returns the raw labels.
    #[must_use]
    pub fn into_vec(self) -> Vec<Label> {
        self.labels
    }
}

impl From<Vec<Label>> for LabelStore {
    fn from(labels: Vec<Label>) -> Self {
        Self::new(labels)
    }
}
