//! Data-parallel relaxation kernel.
//!
//! Each pass walks the edge list with Rayon. A target label is lowered with
//! an atomic `fetch_min`, so concurrent writers to the same node can only
//! ever leave the smallest candidate behind. A shared flag records whether
//! any edge changed something; the Rayon join at the end of the pass is the
//! barrier at which it is read.

use std::{
    num::NonZeroUsize,
    sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering},
};

use rayon::prelude::*;
use tracing::debug;

use crate::{builder::PropagationMode, graph::Edge, labels::Label};

use super::Convergence;

/// Relaxes `edges` over `labels` in parallel until a pass changes nothing
/// or the cap is hit. Callers must have validated every edge against
/// `labels.len()`.
pub(super) fn relax(
    labels: &mut [Label],
    edges: &[Edge],
    mode: PropagationMode,
    max_passes: Option<NonZeroUsize>,
) -> Convergence {
    let slots: Vec<AtomicI64> = labels.iter().map(|&label| AtomicI64::new(label)).collect();
    let mut passes = 0_usize;
    let mut updates = 0_usize;

    let converged = loop {
        let (changed, pass_updates) = run_pass(&slots, edges, mode);
        passes = passes.saturating_add(1);
        updates = updates.saturating_add(pass_updates);
        debug!(
            pass = passes,
            changed = pass_updates,
            "parallel relaxation pass complete"
        );

        if !changed {
            break true;
        }
        if max_passes.is_some_and(|cap| passes >= cap.get()) {
            break false;
        }
    };

    for (label, slot) in labels.iter_mut().zip(slots) {
        *label = slot.into_inner();
    }

    Convergence {
        passes,
        updates,
        converged,
    }
}

fn run_pass(slots: &[AtomicI64], edges: &[Edge], mode: PropagationMode) -> (bool, usize) {
    let changed = AtomicBool::new(false);
    let updates = AtomicUsize::new(0);

    edges.par_iter().for_each(|edge| {
        let (left, right) = edge.slots();
        let mut local = relax_edge(slots, left, right);
        if mode.is_symmetric() {
            local += relax_edge(slots, right, left);
        }
        if local > 0 {
            changed.store(true, Ordering::Relaxed);
            updates.fetch_add(local, Ordering::Relaxed);
        }
    });

    (changed.into_inner(), updates.into_inner())
}

fn relax_edge(slots: &[AtomicI64], from: usize, to: usize) -> usize {
    let (Some(source), Some(target)) = (slots.get(from), slots.get(to)) else {
        return 0;
    };
    let candidate = source.load(Ordering::Acquire);
    if candidate >= target.load(Ordering::Acquire) {
        return 0;
    }
    let previous = target.fetch_min(candidate, Ordering::AcqRel);
    usize::from(candidate < previous)
}
