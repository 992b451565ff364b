//! Error types for reservation processing.

use thiserror::Error;

use crate::model::ProductId;
use crate::store::StoreError;

/// Error returned by [`Engine`](super::Engine) operations.
///
/// Business outcomes such as running out of stock are not errors; see
/// [`ReservationResult`](crate::model::ReservationResult).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("product {0} not found")]
    NotFound(ProductId),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("product {0}: gave up after {1} conflicting reservation attempts")]
    Contention(ProductId, u32),
}

impl EngineError {
    /// Whether the failure comes from infrastructure rather than the request.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Contention(..))
    }
}
