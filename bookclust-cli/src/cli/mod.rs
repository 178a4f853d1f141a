//! Command-line interface orchestration for bookclust.
//!
//! `propagate` runs the engine over an explicit edge file, and `link`
//! derives edges from shared record identifiers before clustering.

mod commands;
mod input;

pub use commands::{
    Cli, CliError, Command, EngineArgs, ExecutionSummary, KindArg, LinkCommand, LinkSummary,
    ModeArg, PropagateCommand, PropagateSummary, StrategyArg, render_summary, run_cli,
};
pub use input::{LineError, ParseError, read_edges, read_labels, read_pairs};
