//! Shared test utilities used across bookclust crates.

pub mod proptest_profile;
pub mod tracing;
