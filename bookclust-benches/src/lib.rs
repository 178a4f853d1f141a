//! Benchmark support crate for bookclust.
//!
//! Provides seeded synthetic graphs and parameter types used by the
//! Criterion propagation benchmarks.

pub mod error;
pub mod params;
pub mod source;
