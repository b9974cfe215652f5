//! # Quote Requests
//!
//! Turns a raw request (labels + item names + quantities) into a priced
//! invoice.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  QuoteRequest                                                           │
//! │     │                                                                   │
//! │     ▼  validate()   ← no catalog, no distance touched yet               │
//! │     │                                                                   │
//! │     ▼  resolve(&catalog) → Vec<SelectionEntry>   (NotFound on a miss)   │
//! │     │                                                                   │
//! │     │   caller resolves distance here (movequote-distance)              │
//! │     ▼                                                                   │
//! │  PricingEngine::calculate_invoice(..) → Invoice                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::pricing::PricingEngine;
use crate::types::{Invoice, SelectionEntry};
use crate::validation::{
    validate_item_reference, validate_location, validate_quantity, validate_selection_len,
};

/// One requested item, as it arrives from a form, a file or the CLI.
///
/// The quantity is a float on purpose: JSON numbers are, and `2.5` must be
/// reported as "not a whole number" rather than silently truncated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRequest {
    /// Catalog name or id.
    pub item: String,
    pub quantity: f64,
}

impl ItemRequest {
    pub fn new(item: impl Into<String>, quantity: f64) -> Self {
        ItemRequest {
            item: item.into(),
            quantity,
        }
    }
}

/// A full quote request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub origin: String,
    pub destination: String,
    pub items: Vec<ItemRequest>,
}

impl QuoteRequest {
    /// Checks the request shape without touching the catalog.
    pub fn validate(&self) -> CoreResult<()> {
        validate_location("origin", &self.origin)?;
        validate_location("destination", &self.destination)?;
        validate_selection_len(self.items.len())?;

        for (index, requested) in self.items.iter().enumerate() {
            validate_item_reference(index + 1, &requested.item)?;
            validate_quantity(requested.item.trim(), requested.quantity)?;
        }

        Ok(())
    }

    /// Validates, then resolves every item against the catalog.
    ///
    /// Fails on the first item that is not in the catalog, naming it.
    ///
    /// ## Example
    /// ```rust
    /// use movequote_core::catalog::Catalog;
    /// use movequote_core::quote::{ItemRequest, QuoteRequest};
    ///
    /// let catalog = Catalog::builtin();
    /// let request = QuoteRequest {
    ///     origin: "Centurion".into(),
    ///     destination: "Tzaneen".into(),
    ///     items: vec![ItemRequest::new("lamp", 2.0)],
    /// };
    ///
    /// let selection = request.resolve(&catalog).unwrap();
    /// assert_eq!(selection[0].item.name, "Lamp");
    /// assert_eq!(selection[0].quantity, 2);
    /// ```
    pub fn resolve<'c>(&self, catalog: &'c Catalog) -> CoreResult<Vec<SelectionEntry<'c>>> {
        self.validate()?;

        self.items
            .iter()
            .map(|requested| {
                let reference = requested.item.trim();
                let item = catalog
                    .find(reference)
                    .ok_or_else(|| CoreError::ItemNotFound(reference.to_string()))?;
                let quantity = validate_quantity(reference, requested.quantity)?;
                SelectionEntry::new(item, quantity)
            })
            .collect()
    }

    /// Resolves the request and prices it over an already-resolved distance.
    pub fn price(
        &self,
        catalog: &Catalog,
        engine: &PricingEngine,
        distance_km: f64,
    ) -> CoreResult<Invoice> {
        let selection = self.resolve(catalog)?;
        engine.calculate_invoice(&self.origin, &self.destination, distance_km, &selection)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ValidationError};

    fn request(items: Vec<ItemRequest>) -> QuoteRequest {
        QuoteRequest {
            origin: "The Reeds, Centurion".to_string(),
            destination: "Tzaneen".to_string(),
            items,
        }
    }

    #[test]
    fn test_empty_selection_rejected_before_catalog_access() {
        // An empty catalog would turn any lookup into NotFound, so an
        // InvalidInput here proves the catalog was never consulted.
        let empty = Catalog::from_items(Vec::new()).unwrap();
        let err = request(Vec::new()).resolve(&empty).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Empty { .. })
        ));
    }

    #[test]
    fn test_unknown_item_is_not_found() {
        let catalog = Catalog::builtin();
        let err = request(vec![
            ItemRequest::new("Desk", 1.0),
            ItemRequest::new(" Grand Piano ", 1.0),
        ])
        .resolve(&catalog)
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Item \"Grand Piano\" not found in catalog");
    }

    #[test]
    fn test_bad_quantities_rejected() {
        let catalog = Catalog::builtin();

        let err = request(vec![ItemRequest::new("Desk", 0.0)])
            .resolve(&catalog)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: quantity for \"Desk\" must be positive"
        );

        let err = request(vec![ItemRequest::new("Desk", 1.5)])
            .resolve(&catalog)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: quantity for \"Desk\" must be a whole number"
        );
    }

    #[test]
    fn test_invalid_quantity_wins_over_unknown_item() {
        // Validation runs over the whole request before any lookup.
        let catalog = Catalog::builtin();
        let err = request(vec![
            ItemRequest::new("Grand Piano", 1.0),
            ItemRequest::new("Desk", -1.0),
        ])
        .resolve(&catalog)
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_blank_item_name_rejected() {
        let catalog = Catalog::builtin();
        let err = request(vec![ItemRequest::new("  ", 1.0)])
            .resolve(&catalog)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: item name at position 1 is required"
        );
    }

    #[test]
    fn test_resolve_preserves_order() {
        let catalog = Catalog::builtin();
        let selection = request(vec![
            ItemRequest::new("Suitcase", 2.0),
            ItemRequest::new("large-sofa", 1.0),
            ItemRequest::new("box (medium)", 10.0),
        ])
        .resolve(&catalog)
        .unwrap();

        let names: Vec<_> = selection.iter().map(|e| e.item.name.as_str()).collect();
        assert_eq!(names, vec!["Suitcase", "Large Sofa", "Box (Medium)"]);
        assert_eq!(selection[2].quantity, 10);
    }

    #[test]
    fn test_price() {
        let catalog = Catalog::builtin();
        let invoice = request(vec![ItemRequest::new("Large Sofa", 1.0)])
            .price(&catalog, &PricingEngine::default(), 299.0)
            .unwrap();

        // weight 4 × R4 500 on the reference route
        assert_eq!(invoice.subtotal().units(), 18_000);
        assert_eq!(invoice.origin(), "The Reeds, Centurion");
    }

    #[test]
    fn test_huge_quantity_is_invalid_input() {
        let catalog = Catalog::builtin();
        let engine = PricingEngine::default();

        for quantity in [10_001.0, 1e15, 3e18] {
            let err = request(vec![ItemRequest::new("Large Sofa", quantity)])
                .price(&catalog, &engine, 299.0)
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "quantity {}", quantity);
            assert!(matches!(
                err,
                CoreError::Validation(ValidationError::OutOfRange { .. })
            ));
        }

        let largest = request(vec![ItemRequest::new("Large Sofa", 10_000.0)])
            .price(&catalog, &engine, 299.0)
            .unwrap();
        assert_eq!(largest.subtotal().units(), 18_000 * 10_000);
        assert!(largest.trailer_required());
    }

    #[test]
    fn test_request_deserializes_from_json() {
        let parsed: QuoteRequest = serde_json::from_str(
            r#"{"origin": "A", "destination": "B",
                "items": [{"item": "Desk", "quantity": 2}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.items[0], ItemRequest::new("Desk", 2.0));
    }
}
