//! Identifier normalisation and same-as edge generation.
//!
//! Records are renumbered densely in the order they are first observed, so
//! sparse or very large record ids cost nothing. Records that share a
//! normalised identifier are linked to the first record seen with it. The
//! edges go both ways, so a directed run over them already merges the whole
//! group.

use std::collections::HashMap;

use crate::graph::{Edge, Graph, NodeId};

/// Identifier families that can link records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    /// ISBN-10 or ISBN-13 from a MARC `020` subfield.
    Isbn,
    /// Library of Congress control number (MARC `010`).
    Lccn,
    /// Local control number (MARC `001`).
    ControlNumber,
}

const ISBN10_LEN: usize = 10;
const ISBN13_LEN: usize = 13;

enum GroupScan {
    Consumed,
    Stopped,
    Overflowed,
}

/// Extracts the leading ISBN from a raw MARC `020` value.
///
/// Hyphens inside the number are dropped and a trailing check character
/// `x` is uppercased. Whitespace separates digit groups only while the
/// number is still incomplete; once ten or thirteen characters are held the
/// next token ends the number, so a following price, qualifier or second
/// ISBN is ignored. The one exception is a ten-digit `978`/`979` prefix
/// followed by a three-digit group, which completes a spaced ISBN-13. A
/// digit run longer than thirteen is rejected rather than truncated.
///
/// The ISBN-10 and ISBN-13 forms are returned as written; use
/// [`to_isbn13`] to compare them.
///
/// # Examples
/// ```
/// use bookclust_core::normalize_isbn;
///
/// assert_eq!(normalize_isbn("0-8044-2957-x (pbk.)").as_deref(), Some("080442957X"));
/// assert_eq!(normalize_isbn("978-0-306-40615-7").as_deref(), Some("9780306406157"));
/// assert_eq!(normalize_isbn("0306406152 0877797099").as_deref(), Some("0306406152"));
/// assert_eq!(normalize_isbn("not an isbn"), None);
/// ```
#[must_use]
pub fn normalize_isbn(raw: &str) -> Option<String> {
    let mut isbn = String::with_capacity(ISBN13_LEN);
    for group in raw.split_whitespace() {
        if is_complete(&isbn) && !completes_isbn13(&isbn, group) {
            break;
        }
        match scan_group(&mut isbn, group) {
            GroupScan::Consumed => {}
            GroupScan::Stopped => break,
            GroupScan::Overflowed => return None,
        }
    }
    is_complete(&isbn).then_some(isbn)
}

fn is_complete(isbn: &str) -> bool {
    matches!(isbn.len(), ISBN10_LEN | ISBN13_LEN)
}

fn completes_isbn13(isbn: &str, group: &str) -> bool {
    isbn.len() == ISBN10_LEN
        && (isbn.starts_with("978") || isbn.starts_with("979"))
        && group.len() == ISBN13_LEN - ISBN10_LEN
        && group.bytes().all(|byte| byte.is_ascii_digit())
}

fn scan_group(isbn: &mut String, group: &str) -> GroupScan {
    for ch in group.chars() {
        match ch {
            '0'..='9' if isbn.len() < ISBN13_LEN => isbn.push(ch),
            '0'..='9' => return GroupScan::Overflowed,
            '-' => {}
            'x' | 'X' if isbn.len() == ISBN10_LEN - 1 => {
                isbn.push('X');
                return GroupScan::Stopped;
            }
            _ => return GroupScan::Stopped,
        }
    }
    GroupScan::Consumed
}

/// Converts a normalised ISBN to its ISBN-13 form.
///
/// An ISBN-10 gains the `978` prefix and a recomputed check digit; an
/// ISBN-13 is returned unchanged. Returns `None` for anything that is not
/// a normalised ISBN.
///
/// # Examples
/// ```
/// use bookclust_core::to_isbn13;
///
/// assert_eq!(to_isbn13("0306406152").as_deref(), Some("9780306406157"));
/// assert_eq!(to_isbn13("080442957X").as_deref(), Some("9780804429573"));
/// assert_eq!(to_isbn13("12345"), None);
/// ```
#[must_use]
pub fn to_isbn13(isbn: &str) -> Option<String> {
    match isbn.len() {
        ISBN13_LEN if isbn.bytes().all(|byte| byte.is_ascii_digit()) => Some(isbn.to_owned()),
        ISBN10_LEN => {
            let mut isbn13: String = "978".chars().chain(isbn.chars().take(9)).collect();
            let mut sum = 0;
            for (ch, weight) in isbn13.chars().zip([1, 3].into_iter().cycle()) {
                sum += ch.to_digit(10)? * weight;
            }
            isbn13.push(char::from_digit((10 - sum % 10) % 10, 10)?);
            Some(isbn13)
        }
        _ => None,
    }
}

/// Normalises a raw identifier of the given kind into a matching key.
///
/// ISBNs are keyed by their ISBN-13 form so both editions of a number
/// match. LCCN and control numbers lose all whitespace; an LCCN also drops
/// any `/` revision suffix. Returns `None` when nothing usable remains.
///
/// # Examples
/// ```
/// use bookclust_core::{IdentifierKind, normalize_identifier};
///
/// let lccn = normalize_identifier(IdentifierKind::Lccn, "  85 000002 /AC/r86");
/// assert_eq!(lccn.as_deref(), Some("85000002"));
/// let isbn = normalize_identifier(IdentifierKind::Isbn, "0-306-40615-2 (pbk.)");
/// assert_eq!(isbn.as_deref(), Some("9780306406157"));
/// assert_eq!(normalize_identifier(IdentifierKind::ControlNumber, "   "), None);
/// ```
#[must_use]
pub fn normalize_identifier(kind: IdentifierKind, raw: &str) -> Option<String> {
    let body = match kind {
        IdentifierKind::Isbn => return normalize_isbn(raw).as_deref().and_then(to_isbn13),
        IdentifierKind::Lccn => raw.split('/').next().unwrap_or_default(),
        IdentifierKind::ControlNumber => raw,
    };
    let compact: String = body.chars().filter(|ch| !ch.is_whitespace()).collect();
    (!compact.is_empty()).then_some(compact)
}

/// Accumulates `(record, identifier)` observations into link edges.
///
/// Graph nodes are assigned densely in first-observed order; [`Self::records`]
/// maps them back to record ids.
///
/// # Examples
/// ```
/// use bookclust_core::{IdentifierKind, NodeId, SameAsLinker};
///
/// let mut linker = SameAsLinker::new(IdentifierKind::Isbn);
/// let record = |id| NodeId::new(id).expect("non-zero");
/// assert!(linker.observe_raw(record(10), "0306406152"));
/// assert!(linker.observe_raw(record(30), "978-0-306-40615-7 (hbk.)"));
/// assert!(!linker.observe_raw(record(20), "n/a"));
/// assert_eq!(linker.edges().len(), 2);
/// assert_eq!(linker.node_count(), 3);
/// assert_eq!(linker.records(), &[record(10), record(30), record(20)]);
/// ```
#[derive(Debug, Clone)]
pub struct SameAsLinker {
    kind: IdentifierKind,
    first_seen: HashMap<String, NodeId>,
    nodes: HashMap<NodeId, NodeId>,
    records: Vec<NodeId>,
    edges: Vec<Edge>,
}

impl SameAsLinker {
    /// Creates an empty linker for identifiers of `kind`.
    #[must_use]
    pub fn new(kind: IdentifierKind) -> Self {
        Self {
            kind,
            first_seen: HashMap::new(),
            nodes: HashMap::new(),
            records: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Returns the identifier kind this linker normalises.
    #[must_use]
    #[rustfmt::skip]
    pub fn kind(&self) -> IdentifierKind { self.kind }

    /// Registers `record` and returns its graph node.
    pub fn register(&mut self, record: NodeId) -> NodeId {
        let next = NodeId::after(self.records.len());
        *self.nodes.entry(record).or_insert_with(|| {
            self.records.push(record);
            next
        })
    }

    /// Records that `record` carries an already normalised `identifier`.
    pub fn observe(&mut self, record: NodeId, identifier: String) {
        let node = self.register(record);
        let first = *self.first_seen.entry(identifier).or_insert(node);
        if first != node {
            let link = Edge::new(first.get(), node.get());
            self.edges.push(link);
            self.edges.push(link.reversed());
        }
    }

    /// Normalises `raw` and records it. Returns `false` when `raw` holds
    /// no usable identifier; the record is still registered.
    pub fn observe_raw(&mut self, record: NodeId, raw: &str) -> bool {
        match normalize_identifier(self.kind, raw) {
            Some(identifier) => {
                self.observe(record, identifier);
                true
            }
            None => {
                self.register(record);
                false
            }
        }
    }

    /// Returns the link edges gathered so far, over graph nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Returns record ids in graph node order.
    #[must_use]
    #[rustfmt::skip]
    pub fn records(&self) -> &[NodeId] { &self.records }

    /// Returns the number of distinct records observed.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.records.len()
    }

    /// Returns the number of distinct identifiers observed.
    #[must_use]
    pub fn identifier_count(&self) -> usize {
        self.first_seen.len()
    }

    /// Consumes the linker and returns the link graph together with the
    /// record id of each node.
    #[must_use]
    pub fn into_parts(self) -> (Graph, Vec<NodeId>) {
        (Graph::new(self.records.len(), self.edges), self.records)
    }
}
