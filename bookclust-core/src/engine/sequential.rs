//! Single-threaded relaxation kernel.
//!
//! Updates are applied in place, so a label lowered by one edge is already
//! visible to the edges that follow it in the same pass.

use std::num::NonZeroUsize;

use tracing::debug;

use crate::{builder::PropagationMode, graph::Edge};

use super::Convergence;

/// Relaxes `edges` over `labels` until a pass changes nothing or the cap is
/// hit. Callers must have validated every edge against `labels.len()`.
pub(super) fn relax<L: Ord + Copy>(
    labels: &mut [L],
    edges: &[Edge],
    mode: PropagationMode,
    max_passes: Option<NonZeroUsize>,
) -> Convergence {
    let mut passes = 0_usize;
    let mut updates = 0_usize;

    loop {
        let changed = run_pass(labels, edges, mode);
        passes = passes.saturating_add(1);
        updates = updates.saturating_add(changed);
        debug!(pass = passes, changed, "sequential relaxation pass complete");

        if changed == 0 {
            return Convergence {
                passes,
                updates,
                converged: true,
            };
        }
        if max_passes.is_some_and(|cap| passes >= cap.get()) {
            return Convergence {
                passes,
                updates,
                converged: false,
            };
        }
    }
}

fn run_pass<L: Ord + Copy>(labels: &mut [L], edges: &[Edge], mode: PropagationMode) -> usize {
    let mut changed = 0_usize;
    for edge in edges {
        let (left, right) = edge.slots();
        changed += relax_edge(labels, left, right);
        if mode.is_symmetric() {
            changed += relax_edge(labels, right, left);
        }
    }
    changed
}

fn relax_edge<L: Ord + Copy>(labels: &mut [L], from: usize, to: usize) -> usize {
    let Some(&source) = labels.get(from) else {
        return 0;
    };
    match labels.get_mut(to) {
        Some(target) if source < *target => {
            *target = source;
            1
        }
        _ => 0,
    }
}

#[cfg(kani)]
mod kani_proofs {
    //! Bounded proofs that the sequential kernel reaches a monotone fixpoint.

    use super::relax;
    use crate::{builder::PropagationMode, graph::Edge};

    /// Every run over three nodes and up to four arbitrary edges terminates
    /// at a fixpoint, and no label ever rises above its initial value.
    #[kani::proof]
    #[kani::unwind(8)]
    fn verify_directed_fixpoint_3_nodes() {
        let initial: [u8; 3] = [kani::any(), kani::any(), kani::any()];
        let mut labels = initial;

        let mut edges = Vec::new();
        for _ in 0..4 {
            if kani::any::<bool>() {
                let left: usize = kani::any();
                let right: usize = kani::any();
                kani::assume((1..=3).contains(&left) && (1..=3).contains(&right));
                edges.push(Edge::new(left, right));
            }
        }

        let report = relax(&mut labels, &edges, PropagationMode::Directed, None);

        kani::assert(report.converged, "uncapped runs always converge");
        kani::assert(report.passes <= 3, "passes are bounded by node count");
        for edge in &edges {
            let (left, right) = edge.slots();
            kani::assert(labels[left] >= labels[right], "edge still relaxable");
        }
        for slot in 0..3 {
            kani::assert(labels[slot] <= initial[slot], "label increased");
        }
    }
}
