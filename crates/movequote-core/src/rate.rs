//! # Rate Deriver
//!
//! Turns a reference price into a per-kilometer rate.
//!
//! ```text
//! reference price (R4 500 for the 299 km reference route)
//!        │
//!        ▼  ÷ reference distance
//! per-km rate (R15.0502/km)
//! ```
//!
//! The rate is deliberately left fractional; rounding happens once, on the
//! finished line item.

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::ValidationResult;

/// Derives the per-kilometer rate for a reference price.
///
/// Fails with a validation error when the price is zero or negative.
///
/// ## Example
/// ```rust
/// use movequote_core::money::Money;
/// use movequote_core::rate::per_km_rate;
///
/// let rate = per_km_rate(Money::from_units(2990), 299.0).unwrap();
/// assert!((rate - 10.0).abs() < 1e-12);
///
/// assert!(per_km_rate(Money::zero(), 299.0).is_err());
/// ```
pub fn per_km_rate(reference_price: Money, reference_distance_km: f64) -> ValidationResult<f64> {
    if !reference_price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "reference price".to_string(),
        });
    }

    if !reference_distance_km.is_finite() || reference_distance_km <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "reference distance".to_string(),
        });
    }

    Ok(reference_price.as_f64() / reference_distance_km)
}
