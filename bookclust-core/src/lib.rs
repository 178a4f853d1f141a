//! Bookclust core library.
//!
//! Collapses bibliographic records into clusters by propagating the
//! smallest label across identifier links until no link changes anything.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod clustering;
mod engine;
mod error;
mod graph;
mod labels;
mod linking;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{EngineBuilder, ExecutionStrategy, PARALLEL_EDGE_THRESHOLD, PropagationMode},
    clustering::{ClusterId, Clustering},
    engine::{Convergence, PropagationEngine, is_fixpoint, propagate, propagate_parallel_arrays},
    error::{Endpoint, PropagationError, PropagationErrorCode, Result},
    graph::{Edge, Graph, NodeId},
    labels::{Label, LabelStore},
    linking::{IdentifierKind, SameAsLinker, normalize_identifier, normalize_isbn, to_isbn13},
};
