pub mod api;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod jobs;
pub mod model;
pub mod price;
pub mod store;

pub use catalog::Catalog;
pub use engine::Engine;
pub use model::{Product, ProductId, ReservationResult};
pub use price::Price;
