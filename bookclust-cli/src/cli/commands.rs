//! Command implementations and argument parsing for the bookclust CLI.

use std::io::{self, Write};
use std::path::PathBuf;

use bookclust_core::{
    Clustering, Convergence, EngineBuilder, ExecutionStrategy, Graph, IdentifierKind, Label,
    LabelStore, NodeId, PropagationEngine, PropagationError, PropagationMode, SameAsLinker,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::input::{ParseError, open_input, read_edges, read_labels, read_pairs};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "bookclust",
    about = "Cluster linked records by propagating minimum labels."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Propagate labels over an explicit edge list.
    Propagate(PropagateCommand),
    /// Link records by shared identifier and report the resulting clusters.
    Link(LinkCommand),
}

/// Options accepted by the `propagate` command.
#[derive(Debug, Args, Clone)]
pub struct PropagateCommand {
    /// Number of nodes; ids run from 1 to this value.
    #[arg(long)]
    pub nodes: usize,

    /// Tab-separated `left<TAB>right` edge file.
    #[arg(long)]
    pub edges: PathBuf,

    /// Initial labels, one per line (defaults to each node's own id).
    #[arg(long)]
    pub labels: Option<PathBuf>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Options accepted by the `link` command.
#[derive(Debug, Args, Clone)]
pub struct LinkCommand {
    /// Tab-separated `record<TAB>identifier` file.
    #[arg(long)]
    pub pairs: PathBuf,

    /// How identifiers are normalised before matching.
    #[arg(long, value_enum, default_value_t = KindArg::Isbn)]
    pub kind: KindArg,

    /// Kernel selection.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,
}

/// Engine options shared by commands that run over explicit edges.
#[derive(Debug, Args, Clone)]
pub struct EngineArgs {
    /// Edge interpretation.
    #[arg(long, value_enum, default_value_t = ModeArg::Directed)]
    pub mode: ModeArg,

    /// Kernel selection.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,

    /// Diagnostic cap on relaxation passes.
    #[arg(long = "max-passes")]
    pub max_passes: Option<usize>,
}

/// Propagation mode flag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Push labels along edge direction only.
    Directed,
    /// Relax every edge both ways.
    Symmetric,
}

impl From<ModeArg> for PropagationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Directed => Self::Directed,
            ModeArg::Symmetric => Self::Symmetric,
        }
    }
}

/// Execution strategy flag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Pick by graph size.
    Auto,
    /// Single-threaded.
    Sequential,
    /// Rayon-parallel.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(strategy: StrategyArg) -> Self {
        match strategy {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Identifier kind flag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// ISBN-10 or ISBN-13.
    Isbn,
    /// Library of Congress control number.
    Lccn,
    /// Local control number.
    ControlNumber,
}

impl From<KindArg> for IdentifierKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Isbn => Self::Isbn,
            KindArg::Lccn => Self::Lccn,
            KindArg::ControlNumber => Self::ControlNumber,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading an input.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// An input file held a malformed line.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Configuration or propagation failed in the core library.
    #[error(transparent)]
    Core(#[from] PropagationError),
}

/// Outcome of the `propagate` command.
#[derive(Debug, Clone)]
pub struct PropagateSummary {
    /// Final labels in node order.
    pub labels: LabelStore,
    /// Pass and update counts.
    pub report: Convergence,
}

/// Outcome of the `link` command.
#[derive(Debug, Clone)]
pub struct LinkSummary {
    /// Record ids in graph node order, first-observed first.
    pub records: Vec<NodeId>,
    /// Distinct normalised identifiers seen.
    pub identifiers: usize,
    /// Clusters derived from the converged labels.
    pub clustering: Clustering,
    /// Converged labels in graph node order.
    pub labels: LabelStore,
    /// Pass and update counts.
    pub report: Convergence,
}

impl LinkSummary {
    /// Returns the record whose graph node is `label`, which after a
    /// symmetric run is the first-observed record of its cluster.
    #[must_use]
    pub fn canonical_record(&self, label: Label) -> Option<NodeId> {
        let node = usize::try_from(label).ok().and_then(NodeId::new)?;
        self.records.get(node.index()).copied()
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// Result of `propagate`.
    Propagate(PropagateSummary),
    /// Result of `link`.
    Link(LinkSummary),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when an input cannot be read or parsed, or when the
/// core library rejects the configuration or graph.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use bookclust_cli::cli::{Cli, ExecutionSummary, run_cli};
/// # use clap::Parser;
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let edges = NamedTempFile::new()?;
/// std::fs::write(edges.path(), "1\t2\n2\t3\n")?;
/// let edges_path = edges.path().to_string_lossy().into_owned();
/// let args = ["bookclust", "propagate", "--nodes", "3", "--edges", edges_path.as_str()];
/// let cli = Cli::try_parse_from(args)?;
/// let ExecutionSummary::Propagate(summary) = run_cli(cli)? else {
///     unreachable!("propagate yields a propagate summary");
/// };
/// assert_eq!(summary.labels.as_slice(), &[1, 1, 1]);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Propagate(command) => {
            Span::current().record("command", field::display("propagate"));
            run_propagate(command).map(ExecutionSummary::Propagate)
        }
        Command::Link(command) => {
            Span::current().record("command", field::display("link"));
            run_link(command).map(ExecutionSummary::Link)
        }
    }
}

fn build_engine(
    mode: PropagationMode,
    strategy: StrategyArg,
    max_passes: Option<usize>,
) -> Result<PropagationEngine, CliError> {
    let mut builder = EngineBuilder::new(mode).with_execution_strategy(strategy.into());
    if let Some(cap) = max_passes {
        builder = builder.with_max_passes(cap);
    }
    Ok(builder.build()?)
}

#[instrument(
    name = "cli.propagate",
    err,
    skip(command),
    fields(nodes = command.nodes, edges = field::Empty, mode = ?command.engine.mode),
)]
pub(super) fn run_propagate(command: PropagateCommand) -> Result<PropagateSummary, CliError> {
    let PropagateCommand {
        nodes,
        edges,
        labels,
        engine,
    } = command;
    let runner = build_engine(engine.mode.into(), engine.strategy, engine.max_passes)?;

    let edge_list = read_edges(open_input(&edges)?, &edges)?;
    Span::current().record("edges", edge_list.len());
    let mut store = match labels {
        Some(path) => LabelStore::new(read_labels(open_input(&path)?, &path)?),
        None => LabelStore::singleton(nodes),
    };

    let graph = Graph::new(nodes, edge_list);
    let report = runner.run(&graph, &mut store)?;
    info!(
        passes = report.passes(),
        updates = report.updates(),
        converged = report.converged(),
        "propagate command completed"
    );
    Ok(PropagateSummary {
        labels: store,
        report,
    })
}

#[instrument(
    name = "cli.link",
    err,
    skip(command),
    fields(path = %command.pairs.display(), kind = ?command.kind, records = field::Empty),
)]
pub(super) fn run_link(command: LinkCommand) -> Result<LinkSummary, CliError> {
    let runner = build_engine(PropagationMode::Symmetric, command.strategy, None)?;
    let pairs = read_pairs(open_input(&command.pairs)?, &command.pairs)?;

    let mut linker = SameAsLinker::new(command.kind.into());
    let mut usable = 0_usize;
    for (record, raw) in &pairs {
        if linker.observe_raw(*record, raw) {
            usable += 1;
        }
    }
    let identifiers = linker.identifier_count();
    Span::current().record("records", linker.node_count());

    let (graph, records) = linker.into_parts();
    let mut labels = LabelStore::singleton(graph.node_count());
    let report = runner.run(&graph, &mut labels)?;
    let clustering = Clustering::from_labels(&labels);
    info!(
        usable,
        identifiers,
        clusters = clustering.cluster_count(),
        "link command completed"
    );
    Ok(LinkSummary {
        records,
        identifiers,
        clustering,
        labels,
        report,
    })
}

/// Renders `summary` to `writer` as a `#` header line followed by
/// tab-separated rows.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use bookclust_cli::cli::{ExecutionSummary, PropagateSummary, render_summary};
/// # use bookclust_core::{Edge, LabelStore, propagate};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let mut raw = vec![1, 2];
/// let report = propagate(2, &mut raw, &[Edge::new(1, 2)])?;
/// let labels = LabelStore::new(raw);
/// let summary = ExecutionSummary::Propagate(PropagateSummary { labels, report });
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "# passes: 2 (changing: 1), updates: 1, converged: true\n1\t1\n2\t1\n",
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Propagate(propagated) => {
            write_report(&mut writer, &propagated.report)?;
            for (node, label) in propagated.labels.iter() {
                writeln!(writer, "{node}\t{label}")?;
            }
        }
        ExecutionSummary::Link(linked) => {
            writeln!(
                writer,
                "# records: {}, identifiers: {}, clusters: {}",
                linked.labels.len(),
                linked.identifiers,
                linked.clustering.cluster_count(),
            )?;
            write_report(&mut writer, &linked.report)?;
            let rows = linked
                .records
                .iter()
                .zip(linked.clustering.assignments())
                .zip(linked.labels.as_slice());
            for ((record, cluster), &label) in rows {
                match linked.canonical_record(label) {
                    Some(canonical) => {
                        writeln!(writer, "{record}\t{}\t{canonical}", cluster.get())?;
                    }
                    None => writeln!(writer, "{record}\t{}\t{label}", cluster.get())?,
                }
            }
        }
    }
    Ok(())
}

fn write_report(writer: &mut impl Write, report: &Convergence) -> io::Result<()> {
    writeln!(
        writer,
        "# passes: {} (changing: {}), updates: {}, converged: {}",
        report.passes(),
        report.changing_passes(),
        report.updates(),
        report.converged(),
    )
}
