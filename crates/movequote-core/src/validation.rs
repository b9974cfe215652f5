//! # Validation Module
//!
//! Input validation for quote requests and catalog data.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI / JSON request (movequote-cli)                           │
//! │  ├── Argument parsing ("Desk=2")                                       │
//! │  └── Deserialization of request files                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Labels non-blank, selection non-empty                             │
//! │  ├── Quantities positive whole numbers                                 │
//! │  └── Distances / prices positive                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine                                               │
//! │  └── Defensive zero floor in item_cost                                 │
//! │                                                                         │
//! │  All checks run before the first cost is computed.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use movequote_core::validation::{validate_distance_km, validate_quantity};
//!
//! assert!(validate_distance_km(299.0).is_ok());
//! assert_eq!(validate_quantity("Desk", 2.0).unwrap(), 2);
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_QUANTITY, MAX_WEIGHT_SCORE, MIN_WEIGHT_SCORE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a location label (origin or destination).
///
/// The label is opaque to pricing; it only has to be non-blank.
///
/// ## Example
/// ```rust
/// use movequote_core::validation::validate_location;
///
/// assert!(validate_location("origin", "The Reeds, Centurion").is_ok());
/// assert!(validate_location("destination", "   ").is_err());
/// ```
pub fn validate_location(field: &str, label: &str) -> ValidationResult<()> {
    if label.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates the item reference (name or id) at a 1-based request position.
pub fn validate_item_reference(position: usize, reference: &str) -> ValidationResult<()> {
    if reference.trim().is_empty() {
        return Err(ValidationError::Required {
            field: format!("item name at position {}", position),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a requested quantity and converts it to an integer.
///
/// Quantities arrive as JSON numbers, so `2.5` is representable and must be
/// rejected rather than truncated.
///
/// ## Rules
/// - Must be finite and positive (> 0)
/// - Must be a whole number
/// - Must not exceed [`MAX_QUANTITY`]
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  --item "Desk=2.5"                                                      │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity("Desk", 2.5) ← THIS FUNCTION                        │
/// │       │                                                                 │
/// │       ├── qty <= 0?     → Error: "quantity for "Desk" must be positive" │
/// │       │                                                                 │
/// │       ├── qty.fract()?  → Error: "... must be a whole number"           │
/// │       │                                                                 │
/// │       └── OK → 2                                                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(item: &str, qty: f64) -> ValidationResult<i64> {
    let field = format!("quantity for \"{}\"", item);

    if !qty.is_finite() || qty <= 0.0 {
        return Err(ValidationError::MustBePositive { field });
    }

    if qty.fract() != 0.0 {
        return Err(ValidationError::NotWholeNumber { field });
    }

    if qty > MAX_QUANTITY as f64 {
        return Err(ValidationError::OutOfRange {
            field,
            min: 1,
            max: MAX_QUANTITY,
        });
    }

    Ok(qty as i64)
}

/// Validates an already-integral quantity on a selection entry.
pub fn validate_entry_quantity(item: &str, qty: i64) -> ValidationResult<()> {
    let field = format!("quantity for \"{}\"", item);

    if qty <= 0 {
        return Err(ValidationError::MustBePositive { field });
    }

    if qty > MAX_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field,
            min: 1,
            max: MAX_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a resolved distance in kilometers.
///
/// ## Example
/// ```rust
/// use movequote_core::validation::validate_distance_km;
///
/// assert!(validate_distance_km(0.1).is_ok());
/// assert!(validate_distance_km(0.0).is_err());
/// assert!(validate_distance_km(f64::NAN).is_err());
/// ```
pub fn validate_distance_km(distance_km: f64) -> ValidationResult<()> {
    if !distance_km.is_finite() || distance_km <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "distance".to_string(),
        });
    }

    Ok(())
}

/// Validates a reference price.
///
/// ## Rules
/// - Must be positive (> 0); a free item has no per-km rate to derive
pub fn validate_reference_price(item: &str, price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: format!("reference price for \"{}\"", item),
        });
    }

    Ok(())
}

/// Validates a catalog weight score.
pub fn validate_weight_score(item: &str, weight_score: u32) -> ValidationResult<()> {
    if !(MIN_WEIGHT_SCORE..=MAX_WEIGHT_SCORE).contains(&weight_score) {
        return Err(ValidationError::OutOfRange {
            field: format!("weight score for \"{}\"", item),
            min: MIN_WEIGHT_SCORE as i64,
            max: MAX_WEIGHT_SCORE as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that a selection has at least one entry.
pub fn validate_selection_len(len: usize) -> ValidationResult<()> {
    if len == 0 {
        return Err(ValidationError::Empty {
            field: "item".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_location() {
        assert!(validate_location("origin", "Tzaneen").is_ok());
        assert!(validate_location("origin", "").is_err());
        assert_eq!(
            validate_location("destination", "  \t"),
            Err(ValidationError::Required {
                field: "destination".to_string()
            })
        );
    }

    #[test]
    fn test_validate_item_reference() {
        assert!(validate_item_reference(1, "Desk").is_ok());
        let err = validate_item_reference(3, " ").unwrap_err();
        assert_eq!(err.to_string(), "item name at position 3 is required");
    }

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity("Desk", 1.0), Ok(1));
        assert_eq!(validate_quantity("Desk", 12.0), Ok(12));

        assert!(matches!(
            validate_quantity("Desk", 0.0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_quantity("Desk", -3.0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_quantity("Desk", 2.5),
            Err(ValidationError::NotWholeNumber { .. })
        ));
        assert!(validate_quantity("Desk", f64::NAN).is_err());
        assert!(validate_quantity("Desk", f64::INFINITY).is_err());

        assert_eq!(validate_quantity("Desk", 10_000.0), Ok(10_000));
        assert!(matches!(
            validate_quantity("Desk", 10_001.0),
            Err(ValidationError::OutOfRange { max: 10_000, .. })
        ));
        assert!(matches!(
            validate_quantity("Desk", 3e18),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_entry_quantity() {
        assert!(validate_entry_quantity("Desk", 1).is_ok());
        assert!(validate_entry_quantity("Desk", 0).is_err());
        assert!(validate_entry_quantity("Desk", -1).is_err());
        assert!(validate_entry_quantity("Desk", MAX_QUANTITY).is_ok());
        assert!(matches!(
            validate_entry_quantity("Desk", i64::MAX),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_distance_km() {
        assert!(validate_distance_km(299.0).is_ok());
        assert!(validate_distance_km(0.0).is_err());
        assert!(validate_distance_km(-5.0).is_err());
        assert!(validate_distance_km(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_reference_price() {
        assert!(validate_reference_price("Lamp", Money::from_units(900)).is_ok());
        assert!(validate_reference_price("Lamp", Money::zero()).is_err());
        assert!(validate_reference_price("Lamp", Money::from_units(-1)).is_err());
    }

    #[test]
    fn test_validate_weight_score() {
        for score in 1..=5 {
            assert!(validate_weight_score("Lamp", score).is_ok());
        }
        assert!(validate_weight_score("Lamp", 0).is_err());
        assert!(validate_weight_score("Lamp", 6).is_err());
    }

    #[test]
    fn test_validate_selection_len() {
        assert!(validate_selection_len(1).is_ok());
        assert_eq!(
            validate_selection_len(0).unwrap_err().to_string(),
            "At least one item must be selected"
        );
    }
}
