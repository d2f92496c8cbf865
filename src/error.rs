use thiserror::Error;

/// Failures surfaced by the scoring and reallocation core.
///
/// Normalization and scoring never fail. Every variant here guarantees the
/// roster passed in was left exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Section count was zero or negative
    #[error("Invalid section count {requested}: must be at least 1")]
    InvalidSectionCount { requested: i64 },

    /// Reevaluation was asked of a roster no student has a section in
    #[error("Roster has no sections yet; allocate it first")]
    Unallocated,

    /// The verification service errored, timed out, or returned garbage
    #[error("Verification failed: {0}")]
    VerificationFailed(String),

    /// The email dispatch service errored or timed out
    #[error("Dispatch failed: {0}")]
    DispatchFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
