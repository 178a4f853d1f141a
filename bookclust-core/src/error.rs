//! Error types for the bookclust core library.
//!
//! Defines the error enum exposed by the public API, its stable
//! machine-readable codes, and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::builder::ExecutionStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Identifies which side of an edge carried an invalid node id.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Endpoint {
    /// The propagation source (`left`).
    Left,
    /// The propagation target (`right`).
    Right,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// Error type produced when configuring or running label propagation.
///
/// The first three variants form the validation taxonomy: they are raised
/// before the first relaxation pass, so the label store is never touched
/// when one of them is returned.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PropagationError {
    /// An edge endpoint fell outside `1..=node_count`.
    #[error("edge {edge} has {endpoint} endpoint {node}, but node ids must lie in 1..={node_count}")]
    OutOfRange {
        /// Zero-based position of the offending edge in the edge list.
        edge: usize,
        /// Which endpoint of the edge was invalid.
        endpoint: Endpoint,
        /// The node id supplied for that endpoint.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// The label store length did not match the node count.
    #[error("label store has {labels} entries but the graph has {node_count} nodes")]
    LabelLengthMismatch {
        /// Number of labels supplied by the caller.
        labels: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// Parallel source/target sequences had different lengths.
    #[error("edge sources have length {sources} but edge targets have length {targets}")]
    EdgeLengthMismatch {
        /// Length of the source sequence.
        sources: usize,
        /// Length of the target sequence.
        targets: usize,
    },
    /// The diagnostic pass cap must be at least one.
    #[error("max_passes must be at least 1 (got {got})")]
    InvalidMaxPasses {
        /// The invalid cap supplied by the caller.
        got: usize,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
}

define_error_codes! {
    /// Stable codes describing [`PropagationError`] variants.
    enum PropagationErrorCode for PropagationError {
        /// An edge endpoint fell outside `1..=node_count`.
        OutOfRange => OutOfRange { .. } => "PROPAGATION_OUT_OF_RANGE",
        /// The label store length did not match the node count.
        LabelLengthMismatch => LabelLengthMismatch { .. } => "PROPAGATION_LABEL_LENGTH_MISMATCH",
        /// Parallel source/target sequences had different lengths.
        EdgeLengthMismatch => EdgeLengthMismatch { .. } => "PROPAGATION_EDGE_LENGTH_MISMATCH",
        /// The diagnostic pass cap must be at least one.
        InvalidMaxPasses => InvalidMaxPasses { .. } => "PROPAGATION_INVALID_MAX_PASSES",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "PROPAGATION_BACKEND_UNAVAILABLE",
    }
}

impl PropagationErrorCode {
    /// Returns `true` for codes raised while validating graph input.
    pub const fn is_validation(self) -> bool {
        matches!(
            self,
            Self::OutOfRange | Self::LabelLengthMismatch | Self::EdgeLengthMismatch
        )
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, PropagationError>;
