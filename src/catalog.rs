//! Immutable product catalog.

use crate::Price;
use crate::model::{Product, ProductId};

/// The fixed list of products offered for reservation.
///
/// Order is preserved: `list_all` yields products in insertion order.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn list_all(&self) -> &[Product] {
        &self.products
    }

    pub fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }
}

/// The suitcase line the service ships with.
impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            Product::new(1, "Suitcase 250", Price::from_units(50), 4),
            Product::new(2, "Suitcase 450", Price::from_units(100), 10),
            Product::new(3, "Suitcase 650", Price::from_units(350), 2),
            Product::new(4, "Suitcase 1050", Price::from_units(550), 5),
        ])
    }
}
