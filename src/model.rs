//! Core domain types for the reservation service.

use crate::Price;

/// Product identifier.
pub type ProductId = u32;

/// A catalog product. Products are fixed at startup and never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Units on hand before any reservation.
    pub initial_stock: u32,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: Price, initial_stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            initial_stock,
        }
    }
}

/// Outcome of a single reservation attempt.
///
/// These are business outcomes, not failures: infrastructure problems are
/// reported through [`EngineError`](crate::engine::EngineError) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationResult {
    /// One unit was reserved.
    Confirmed(ProductId),
    /// Every unit of the product is already reserved.
    InsufficientStock(ProductId),
    /// The product is not in the catalog.
    NotFound(ProductId),
}

impl ReservationResult {
    pub fn item_id(&self) -> ProductId {
        match self {
            Self::Confirmed(id) | Self::InsufficientStock(id) | Self::NotFound(id) => *id,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }
}
