//! Error types for podguard
//!
//! Only the control-plane surface returns errors. The packet path models
//! every failure mode as a control-flow outcome (fail open) and never
//! produces an error value.

use thiserror::Error;

/// Podguard error type
#[derive(Error, Debug)]
pub enum GuardError {
    /// Policy table at capacity
    #[error("policy table full ({capacity} entries)")]
    TableFull {
        /// Configured entry limit
        capacity: usize,
    },

    /// Record buffer too short to decode
    #[error("truncated record: need {needed} bytes, got {got}")]
    TruncatedRecord {
        /// Bytes required by the record layout
        needed: usize,
        /// Bytes available
        got: usize,
    },
}

/// Result type for podguard
pub type GuardResult<T> = Result<T, GuardError>;
