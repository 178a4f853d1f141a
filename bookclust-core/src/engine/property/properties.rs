//! Property runners shared by the proptest and rstest suites.
//!
//! Each runner takes a fixture, exercises the engine, and reports a
//! [`TestCaseError`] carrying the fixture description on failure.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{
    Convergence, EngineBuilder, ExecutionStrategy, Graph, LabelStore, PropagationMode,
    is_fixpoint,
};

use super::oracle::reachability_minimum;
use super::strategies::shuffled;
use super::types::PropagationFixture;

fn run_engine(
    graph: &Graph,
    store: &mut LabelStore,
    mode: PropagationMode,
    strategy: ExecutionStrategy,
    max_passes: Option<usize>,
) -> Result<Convergence, TestCaseError> {
    let mut builder = EngineBuilder::new(mode).with_execution_strategy(strategy);
    if let Some(cap) = max_passes {
        builder = builder.with_max_passes(cap);
    }
    builder
        .build()
        .and_then(|engine| engine.run(graph, store))
        .map_err(|err| TestCaseError::fail(format!("engine rejected valid input: {err}")))
}

/// The sequential kernel matches the reachability oracle in both modes.
pub(super) fn run_oracle_equivalence_property(fixture: &PropagationFixture) -> TestCaseResult {
    let graph = fixture.graph();
    for mode in [PropagationMode::Directed, PropagationMode::Symmetric] {
        let expected =
            reachability_minimum(fixture.node_count, &fixture.edges, &fixture.labels, mode);
        let mut store = fixture.store();
        run_engine(&graph, &mut store, mode, ExecutionStrategy::Sequential, None)?;

        if store.as_slice() != expected.labels.as_slice() {
            return Err(TestCaseError::fail(format!(
                "{mode:?} labels diverged from oracle: got {:?}, expected {:?} ({})",
                store.as_slice(),
                expected.labels,
                fixture.describe(),
            )));
        }
        if !is_fixpoint(&graph, store.as_slice(), mode) {
            return Err(TestCaseError::fail(format!(
                "{mode:?} result is not a fixpoint ({})",
                fixture.describe(),
            )));
        }
    }
    Ok(())
}

/// Permuting the edge list leaves the fixpoint unchanged.
pub(super) fn run_order_independence_property(fixture: &PropagationFixture) -> TestCaseResult {
    let baseline_graph = fixture.graph();
    let permuted_graph = Graph::new(fixture.node_count, shuffled(&fixture.edges, fixture.seed));

    for mode in [PropagationMode::Directed, PropagationMode::Symmetric] {
        let mut baseline = fixture.store();
        let mut permuted = fixture.store();
        run_engine(&baseline_graph, &mut baseline, mode, ExecutionStrategy::Sequential, None)?;
        run_engine(&permuted_graph, &mut permuted, mode, ExecutionStrategy::Sequential, None)?;

        if baseline != permuted {
            return Err(TestCaseError::fail(format!(
                "{mode:?} fixpoint depends on edge order: {:?} vs {:?} ({})",
                baseline.as_slice(),
                permuted.as_slice(),
                fixture.describe(),
            )));
        }
    }
    Ok(())
}

/// A second run over a converged store is a single quiet pass.
pub(super) fn run_idempotence_property(fixture: &PropagationFixture) -> TestCaseResult {
    let graph = fixture.graph();
    let mut store = fixture.store();
    run_engine(&graph, &mut store, PropagationMode::Directed, ExecutionStrategy::Sequential, None)?;
    let settled = store.clone();

    let report =
        run_engine(&graph, &mut store, PropagationMode::Directed, ExecutionStrategy::Sequential, None)?;
    if store != settled || report.updates() != 0 || report.passes() != 1 {
        return Err(TestCaseError::fail(format!(
            "re-running a converged store changed it (passes={}, updates={}) ({})",
            report.passes(),
            report.updates(),
            fixture.describe(),
        )));
    }
    Ok(())
}

/// Labels never increase from one pass to the next, and none ends above
/// its initial value.
pub(super) fn run_monotonicity_property(fixture: &PropagationFixture) -> TestCaseResult {
    let graph = fixture.graph();
    let mut previous = fixture.store();

    for cap in 1..=fixture.node_count.max(1).saturating_add(1) {
        let mut store = fixture.store();
        let report = run_engine(
            &graph,
            &mut store,
            PropagationMode::Directed,
            ExecutionStrategy::Sequential,
            Some(cap),
        )?;
        let rose = previous
            .as_slice()
            .iter()
            .zip(store.as_slice())
            .position(|(before, after)| after > before);
        if let Some(slot) = rose {
            return Err(TestCaseError::fail(format!(
                "label of node {} rose between pass {} and {cap} ({})",
                slot + 1,
                cap - 1,
                fixture.describe(),
            )));
        }
        previous = store;
        if report.converged() {
            break;
        }
    }
    Ok(())
}

/// Changing passes never exceed the longest shortest propagation path,
/// which itself never exceeds `nc - 1`.
pub(super) fn run_bounded_convergence_property(fixture: &PropagationFixture) -> TestCaseResult {
    let graph = fixture.graph();
    for mode in [PropagationMode::Directed, PropagationMode::Symmetric] {
        let expected =
            reachability_minimum(fixture.node_count, &fixture.edges, &fixture.labels, mode);
        let mut store = fixture.store();
        let report = run_engine(&graph, &mut store, mode, ExecutionStrategy::Sequential, None)?;

        let node_bound = fixture.node_count.saturating_sub(1);
        if expected.max_hops > node_bound || report.changing_passes() > expected.max_hops {
            return Err(TestCaseError::fail(format!(
                "{mode:?} needed {} changing passes; hop bound {}, node bound {node_bound} ({})",
                report.changing_passes(),
                expected.max_hops,
                fixture.describe(),
            )));
        }
    }
    Ok(())
}

/// The parallel kernel reaches exactly the sequential fixpoint within the
/// same pass bound.
#[cfg(feature = "parallel")]
pub(super) fn run_kernel_equivalence_property(fixture: &PropagationFixture) -> TestCaseResult {
    let graph = fixture.graph();
    for mode in [PropagationMode::Directed, PropagationMode::Symmetric] {
        let mut sequential = fixture.store();
        let mut parallel = fixture.store();
        run_engine(&graph, &mut sequential, mode, ExecutionStrategy::Sequential, None)?;
        let report = run_engine(&graph, &mut parallel, mode, ExecutionStrategy::Parallel, None)?;

        if sequential != parallel {
            return Err(TestCaseError::fail(format!(
                "{mode:?} parallel labels {:?} differ from sequential {:?} ({})",
                parallel.as_slice(),
                sequential.as_slice(),
                fixture.describe(),
            )));
        }
        if report.changing_passes() > fixture.node_count.saturating_sub(1) {
            return Err(TestCaseError::fail(format!(
                "{mode:?} parallel kernel needed {} changing passes ({})",
                report.changing_passes(),
                fixture.describe(),
            )));
        }
    }
    Ok(())
}
