//! Error types for reservation counter storage.

use thiserror::Error;

/// Failure of the backing store.
///
/// Callers must treat these as transient infrastructure faults, never as
/// "nothing reserved".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("reservation store unavailable: {0}")]
    Unavailable(String),

    #[error("counter {key} holds invalid value '{value}'")]
    CorruptCounter { key: String, value: String },
}
