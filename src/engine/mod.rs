//! Reservation engine.
//!
//! The engine answers availability queries and grants or denies single-unit
//! reservations against the catalog's initial stock. Reserved counts live in a
//! [`ReservationStore`]; the engine never keeps its own copy, so any number of
//! engine clones (or processes sharing the same store) can serve requests
//! concurrently.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::model::{Product, ProductId, ReservationResult};
use crate::store::ReservationStore;

mod state;
pub use state::Availability;

mod error;
pub use error::EngineError;

/// Attempts made by [`Engine::reserve_one`] before reporting contention.
pub const DEFAULT_MAX_RETRIES: u32 = 16;

/// The reservation engine.
///
/// Cheap to clone: catalog and store are shared.
#[derive(Clone)]
pub struct Engine {
    catalog: Arc<Catalog>,
    store: Arc<dyn ReservationStore>,
    max_retries: u32,
}

/// Public API
impl Engine {
    pub fn new(catalog: Catalog, store: Arc<dyn ReservationStore>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            store,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Cap the compare-and-set loop at `max_retries` attempts (at least one).
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Return the current stock position of one product.
    pub async fn get_availability(&self, item: ProductId) -> Result<Availability, EngineError> {
        let product = self
            .catalog
            .find_by_id(item)
            .ok_or(EngineError::NotFound(item))?;

        let reserved = self.store.get_reserved(item).await?;

        Ok(Availability {
            product: product.clone(),
            reserved,
        })
    }

    /// Reserve one unit of `item`.
    ///
    /// Returns `Ok` for every business outcome (confirmed, out of stock,
    /// unknown product). `Err` means the store failed or the retry cap was hit,
    /// in which case nothing was reserved.
    pub async fn reserve_one(&self, item: ProductId) -> Result<ReservationResult, EngineError> {
        let Some(product) = self.catalog.find_by_id(item) else {
            let result = Ok(ReservationResult::NotFound(item));
            Self::log_result(item, None, &result);
            return result;
        };

        let outcome = self.try_reserve(product).await;
        let reserved = outcome.as_ref().ok().map(|(_, reserved)| *reserved);
        let result = outcome.map(|(result, _)| result);
        Self::log_result(item, reserved.map(|r| (r, product.initial_stock)), &result);
        result
    }
}

/// Private API
impl Engine {
    /// Small helper to log `reserve_one` results, with the `(reserved, stock)`
    /// position the decision was made against when there is one.
    fn log_result(
        item: ProductId,
        position: Option<(u32, u32)>,
        result: &Result<ReservationResult, EngineError>,
    ) {
        let reserved = position.map(|(reserved, _)| reserved);
        let available = position.map(|(reserved, stock)| stock.saturating_sub(reserved));

        match result {
            Ok(ReservationResult::Confirmed(_)) => {
                info!(item = item, reserved, available, "reservation confirmed");
            }
            Ok(ReservationResult::InsufficientStock(_)) => {
                info!(
                    item = item,
                    reserved,
                    available,
                    reason = "insufficient stock",
                    "reservation denied"
                );
            }
            Ok(ReservationResult::NotFound(_)) => {
                info!(item = item, reason = "product not found", "reservation denied");
            }
            Err(e) => {
                warn!(item = item, reason = %e, "reservation failed");
            }
        }
    }

    /// Check-then-increment loop:
    /// - Read the reserved count
    /// - Deny if nothing is left
    /// - Compare-and-set `reserved -> reserved + 1`
    /// - Retry from the top if another reservation won the race
    ///
    /// Also returns the reserved count the decision was made against (after
    /// the increment, for a confirmation).
    async fn try_reserve(
        &self,
        product: &Product,
    ) -> Result<(ReservationResult, u32), EngineError> {
        for attempt in 1..=self.max_retries {
            let reserved = self.store.get_reserved(product.id).await?;

            if reserved >= product.initial_stock {
                return Ok((ReservationResult::InsufficientStock(product.id), reserved));
            }

            if self
                .store
                .compare_and_set_reserved(product.id, reserved, reserved + 1)
                .await?
            {
                return Ok((ReservationResult::Confirmed(product.id), reserved + 1));
            }

            debug!(item = product.id, attempt, reserved, "counter moved, retrying");
        }

        Err(EngineError::Contention(product.id, self.max_retries))
    }
}
