use crate::model::Product;

/// Stock position of one product at the time it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub product: Product,
    pub reserved: u32,
}

impl Availability {
    pub fn initial_stock(&self) -> u32 {
        self.product.initial_stock
    }

    /// Units still reservable. Saturates at 0 if a counter ever overshoots.
    pub fn available(&self) -> u32 {
        self.product.initial_stock.saturating_sub(self.reserved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Price;

    fn availability(stock: u32, reserved: u32) -> Availability {
        Availability {
            product: Product::new(1, "Suitcase 250", Price::from_units(50), stock),
            reserved,
        }
    }

    #[test]
    fn available_is_stock_minus_reserved() {
        assert_eq!(availability(4, 0).available(), 4);
        assert_eq!(availability(4, 3).available(), 1);
        assert_eq!(availability(4, 4).available(), 0);
    }

    #[test]
    fn available_never_underflows() {
        assert_eq!(availability(2, 5).available(), 0);
    }
}
