//! Cluster materialisation from converged labels.
//!
//! Turns a label store into dense cluster identifiers so downstream record
//! resolution can group members without caring about the label values.

use std::collections::HashMap;

use crate::{
    graph::NodeId,
    labels::{Label, LabelStore},
};

/// Identifier assigned to a cluster.
///
/// Identifiers are contiguous from zero in the order their first member
/// appears.
///
/// # Examples
/// ```
/// use bookclust_core::ClusterId;
///
/// let id = ClusterId::new(4);
/// assert_eq!(id.get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(u64);

impl ClusterId {
    /// Creates a new cluster identifier.
    #[rustfmt::skip]
    #[must_use]
    pub fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub fn get(self) -> u64 { self.0 }

    fn slot(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

/// Clusters derived from a label store.
///
/// # Examples
/// ```
/// use bookclust_core::{ClusterId, Clustering, LabelStore};
///
/// let clustering = Clustering::from_labels(&LabelStore::new(vec![4, 1, 4, 1, 7]));
/// assert_eq!(clustering.cluster_count(), 3);
/// assert_eq!(clustering.assignments()[2], ClusterId::new(0));
/// assert_eq!(clustering.canonical_label(ClusterId::new(1)), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clustering {
    assignments: Vec<ClusterId>,
    canonical: Vec<Label>,
    members: Vec<Vec<NodeId>>,
}

impl Clustering {
    /// Groups nodes sharing a label, numbering clusters in first-seen order.
    #[must_use]
    pub fn from_labels(labels: &LabelStore) -> Self {
        let mut by_label: HashMap<Label, ClusterId> = HashMap::new();
        let mut assignments = Vec::with_capacity(labels.len());
        let mut canonical = Vec::new();
        let mut members: Vec<Vec<NodeId>> = Vec::new();

        for (node, label) in labels.iter() {
            let next = ClusterId::new(canonical.len() as u64);
            let id = *by_label.entry(label).or_insert_with(|| {
                canonical.push(label);
                members.push(Vec::new());
                next
            });
            if let Some(group) = id.slot().and_then(|slot| members.get_mut(slot)) {
                group.push(node);
            }
            assignments.push(id);
        }

        Self {
            assignments,
            canonical,
            members,
        }
    }

    /// Returns the cluster of each node in node order.
    #[must_use]
    #[rustfmt::skip]
    pub fn assignments(&self) -> &[ClusterId] { &self.assignments }

    /// Returns the cluster of `node`.
    #[must_use]
    pub fn cluster_of(&self, node: NodeId) -> Option<ClusterId> {
        self.assignments.get(node.index()).copied()
    }

    /// Counts distinct clusters.
    #[must_use]
    #[rustfmt::skip]
    pub fn cluster_count(&self) -> usize { self.canonical.len() }

    /// Returns the members of `cluster` in ascending node order.
    #[must_use]
    pub fn members(&self, cluster: ClusterId) -> &[NodeId] {
        cluster
            .slot()
            .and_then(|slot| self.members.get(slot))
            .map_or(&[], Vec::as_slice)
    }

    /// Returns the label shared by every member of `cluster`.
    #[must_use]
    pub fn canonical_label(&self, cluster: ClusterId) -> Option<Label> {
        cluster
            .slot()
            .and_then(|slot| self.canonical.get(slot))
            .copied()
    }

    /// Iterates clusters with their members, largest first, ties broken by
    /// identifier.
    pub fn by_size(&self) -> impl Iterator<Item = (ClusterId, &[NodeId])> {
        let mut order: Vec<(ClusterId, &[NodeId])> = self
            .members
            .iter()
            .enumerate()
            .map(|(slot, group)| (ClusterId::new(slot as u64), group.as_slice()))
            .collect();
        order.sort_by(|(a, left), (b, right)| right.len().cmp(&left.len()).then(a.cmp(b)));
        order.into_iter()
    }
}
