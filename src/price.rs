use std::fmt;

use serde::{Serialize, Serializer};

/// Fixed-point price with 2 decimal places, stored in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Price(u64);

impl Price {
    const SCALE: u64 = 100;

    /// Whole currency units. Saturates at `u64::MAX` cents.
    pub fn from_units(units: u64) -> Self {
        Price(units.saturating_mul(Self::SCALE))
    }

    pub fn from_cents(cents: u64) -> Self {
        Price(cents)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    pub fn is_whole(&self) -> bool {
        self.0 % Self::SCALE == 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / Self::SCALE;
        let frac = self.0 % Self::SCALE;
        write!(f, "{whole}.{frac:02}")
    }
}

/// Whole prices go out as JSON integers (`50`), others as decimals (`12.5`).
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            serializer.serialize_u64(self.0 / Self::SCALE)
        } else {
            serializer.serialize_f64(self.0 as f64 / Self::SCALE as f64)
        }
    }
}
