use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::error::{Result, StorageError};

pub fn decimal_to_f64(decimal: Decimal) -> f64 {
    decimal.to_f64().unwrap_or(0.0)
}

/// Converts a JSON number into a `Decimal`, rejecting NaN, infinities and
/// magnitudes a `Decimal` cannot hold.
pub fn decimal_from_f64(value: f64, field: &str) -> Result<Decimal> {
    Decimal::from_f64(value).ok_or_else(|| {
        StorageError::invalid(format!("{field} must be a finite number within range"))
    })
}
