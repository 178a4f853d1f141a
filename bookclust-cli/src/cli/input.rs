//! Line-oriented readers for the CLI input files.
//!
//! Every format skips blank lines and lines starting with `#`. Fields are
//! trimmed individually, so an empty trailing field survives. Malformed
//! lines are reported with their 1-based line number.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use bookclust_core::{Edge, Label, NodeId};
use thiserror::Error;
use tracing::{Span, field, instrument};

use super::commands::CliError;

/// A malformed line in an input file.
#[derive(Debug, Error)]
#[error("{path}:{line}: {kind}")]
pub struct ParseError {
    /// File containing the line.
    pub path: PathBuf,
    /// 1-based line number.
    pub line: usize,
    /// What was wrong with the line.
    pub kind: LineError,
}

/// Reasons a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// The line did not hold the expected number of tab-separated fields.
    #[error("expected {expected} tab-separated fields, found {found}")]
    FieldCount {
        /// Number of fields the format requires.
        expected: usize,
        /// Number of fields present.
        found: usize,
    },
    /// A field was not an integer of the required kind.
    #[error("{field} `{value}` is not a valid integer")]
    InvalidInteger {
        /// Name of the field.
        field: &'static str,
        /// Raw field text.
        value: String,
    },
    /// A record id of zero was supplied.
    #[error("record ids start at 1")]
    ZeroRecord,
}

/// Opens `path` for buffered reading.
///
/// # Errors
/// Returns [`CliError::Io`] when the file cannot be opened.
#[instrument(name = "cli.open_input", err, fields(path = field::Empty))]
pub fn open_input(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Reads `left<TAB>right` edge lines.
///
/// Endpoints are not range-checked here; the engine validates them against
/// the node count.
///
/// # Errors
/// Returns [`CliError::Io`] on read failure and [`CliError::Parse`] for a
/// malformed line.
pub fn read_edges(reader: impl BufRead, path: &Path) -> Result<Vec<Edge>, CliError> {
    let mut edges = Vec::new();
    for_each_record(reader, path, |line| {
        let [left, right] = split_fields(line)?;
        edges.push(Edge::new(
            parse_integer("left", left)?,
            parse_integer("right", right)?,
        ));
        Ok(())
    })?;
    Ok(edges)
}

/// Reads one label per line.
///
/// # Errors
/// Returns [`CliError::Io`] on read failure and [`CliError::Parse`] for a
/// malformed line.
pub fn read_labels(reader: impl BufRead, path: &Path) -> Result<Vec<Label>, CliError> {
    let mut labels = Vec::new();
    for_each_record(reader, path, |line| {
        labels.push(parse_integer("label", line)?);
        Ok(())
    })?;
    Ok(labels)
}

/// Reads `record_id<TAB>raw identifier` lines.
///
/// The identifier is kept verbatim apart from surrounding whitespace and
/// may be empty; normalisation happens in the linker.
///
/// # Errors
/// Returns [`CliError::Io`] on read failure and [`CliError::Parse`] for a
/// malformed line.
pub fn read_pairs(reader: impl BufRead, path: &Path) -> Result<Vec<(NodeId, String)>, CliError> {
    let mut pairs = Vec::new();
    for_each_record(reader, path, |line| {
        let (raw_record, identifier) = line
            .split_once('\t')
            .ok_or(LineError::FieldCount { expected: 2, found: 1 })?;
        let record =
            NodeId::new(parse_integer("record", raw_record)?).ok_or(LineError::ZeroRecord)?;
        pairs.push((record, identifier.trim().to_owned()));
        Ok(())
    })?;
    Ok(pairs)
}

fn for_each_record(
    reader: impl BufRead,
    path: &Path,
    mut parse: impl FnMut(&str) -> Result<(), LineError>,
) -> Result<(), CliError> {
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let content = line.trim_start();
        if content.trim_end().is_empty() || content.starts_with('#') {
            continue;
        }
        parse(content).map_err(|kind| ParseError {
            path: path.to_path_buf(),
            line: index + 1,
            kind,
        })?;
    }
    Ok(())
}

fn split_fields<const N: usize>(line: &str) -> Result<[&str; N], LineError> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    let found = fields.len();
    fields
        .try_into()
        .map_err(|_| LineError::FieldCount { expected: N, found })
}

fn parse_integer<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, LineError> {
    raw.trim().parse().map_err(|_| LineError::InvalidInteger {
        field,
        value: raw.trim().to_owned(),
    })
}
