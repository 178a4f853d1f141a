//! Environment-driven proptest tuning shared by every property suite.
//!
//! `PROGTEST_CASES` overrides the case count and `BOOKCLUST_PBT_FORK`
//! toggles forked execution. Invalid overrides are logged and ignored.

use std::env;

use thiserror::Error;

/// Environment variable controlling proptest case counts.
pub const CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable controlling proptest process forking.
pub const FORK_ENV_KEY: &str = "BOOKCLUST_PBT_FORK";

/// Reasons an override value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverrideError {
    /// The case count was not an unsigned integer.
    #[error("expected a positive integer, got {raw:?}")]
    NotANumber {
        /// Value read from the environment.
        raw: String,
    },
    /// A case count of zero would skip the property entirely.
    #[error("case count must be at least 1")]
    ZeroCases,
    /// The fork flag was not a recognised boolean spelling.
    #[error("expected one of true/false/1/0/yes/no/on/off, got {raw:?}")]
    NotABool {
        /// Value read from the environment.
        raw: String,
    },
}

/// Case count and fork setting for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads a profile, falling back to the given defaults for unset or
    /// invalid variables.
    ///
    /// # Examples
    /// ```
    /// use bookclust_test_support::proptest_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: env_override(CASES_ENV_KEY, parse_cases).unwrap_or(default_cases),
            fork: env_override(FORK_ENV_KEY, parse_flag).unwrap_or(default_fork),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    #[rustfmt::skip]
    pub fn cases(&self) -> u32 { self.cases }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    #[rustfmt::skip]
    pub fn fork(&self) -> bool { self.fork }
}

fn env_override<T>(key: &'static str, parse: fn(&str) -> Result<T, OverrideError>) -> Option<T> {
    let raw = env::var(key).ok()?;
    parse(&raw)
        .inspect_err(|error| {
            tracing::warn!(env = key, %error, "ignoring invalid property-test override");
        })
        .ok()
}

/// Parses a positive case count.
///
/// # Errors
/// Returns [`OverrideError::NotANumber`] or [`OverrideError::ZeroCases`].
pub fn parse_cases(raw: &str) -> Result<u32, OverrideError> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(OverrideError::ZeroCases),
        Ok(cases) => Ok(cases),
        Err(_) => Err(OverrideError::NotANumber { raw: raw.to_owned() }),
    }
}

/// Parses a boolean flag in any of the usual spellings.
///
/// # Errors
/// Returns [`OverrideError::NotABool`] for anything else.
pub fn parse_flag(raw: &str) -> Result<bool, OverrideError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(OverrideError::NotABool { raw: raw.to_owned() }),
    }
}
