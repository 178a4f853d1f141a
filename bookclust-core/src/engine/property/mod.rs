//! Property-based tests for label propagation.
//!
//! Checks the sequential and parallel kernels against a reachability
//! oracle, and verifies order independence, idempotence, monotonicity and
//! the pass-count bound across generated graph topologies.

mod oracle;
mod properties;
mod strategies;
mod types;
