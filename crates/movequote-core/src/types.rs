//! # Domain Types
//!
//! Core domain types used throughout MoveQuote.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogItem    │   │ SelectionEntry  │   │    Invoice      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (slug)      │◄──│  item (&ref)    │   │  origin         │       │
//! │  │  name           │   │  quantity       │   │  destination    │       │
//! │  │  category       │   └─────────────────┘   │  distance_km    │       │
//! │  │  weight_score   │                         │  items[] ───────┼──┐    │
//! │  │  reference_price│                         │  subtotal       │  │    │
//! │  └─────────────────┘                         │  trailer_*      │  │    │
//! │                                              │  total_cost     │  │    │
//! │                                              └─────────────────┘  │    │
//! │                        ┌─────────────────┐                        │    │
//! │                        │ InvoiceLineItem │◄───────────────────────┘    │
//! │                        │  name, quantity │                             │
//! │                        │  weight_score   │                             │
//! │                        │  item_cost      │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Line items copy the name and weight score out of the catalog at pricing
//! time, so an exported invoice never depends on the catalog it came from.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::validate_entry_quantity;

// =============================================================================
// Catalog Item
// =============================================================================

/// An item that can be moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogItem {
    /// Stable identifier (slug of the name for the built-in catalog).
    pub id: String,

    /// Display name, unique within a catalog (case-insensitive).
    pub name: String,

    /// Informational grouping ("Furniture", "Boxes", ...).
    pub category: String,

    /// Relative bulk / handling difficulty, 1-5.
    pub weight_score: u32,

    /// Price quoted for the reference route.
    pub reference_price: Money,
}

impl CatalogItem {
    /// Creates an item whose id is derived from its name.
    ///
    /// ## Example
    /// ```rust
    /// use movequote_core::money::Money;
    /// use movequote_core::types::CatalogItem;
    ///
    /// let item = CatalogItem::new("TV (55 inch)", "Electronics", 2, Money::from_units(1900));
    /// assert_eq!(item.id, "tv-55-inch");
    /// ```
    pub fn new(name: &str, category: &str, weight_score: u32, reference_price: Money) -> Self {
        CatalogItem {
            id: slugify(name),
            name: name.to_string(),
            category: category.to_string(),
            weight_score,
            reference_price,
        }
    }
}

/// Lowercases and joins alphanumeric runs with single hyphens.
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

// =============================================================================
// Selection Entry
// =============================================================================

/// One selected catalog item and how many of it are moving.
///
/// Borrows the item from the catalog; lives only for one pricing call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionEntry<'a> {
    pub item: &'a CatalogItem,
    pub quantity: i64,
}

impl<'a> SelectionEntry<'a> {
    /// Creates an entry, rejecting quantities below one.
    pub fn new(item: &'a CatalogItem, quantity: i64) -> CoreResult<Self> {
        validate_entry_quantity(&item.name, quantity)?;
        Ok(SelectionEntry { item, quantity })
    }

    /// Weight this entry contributes to the load (`weight_score × quantity`),
    /// `None` on overflow.
    #[inline]
    pub fn weight(&self) -> Option<i64> {
        (self.item.weight_score as i64).checked_mul(self.quantity)
    }
}

// =============================================================================
// Invoice Line Item
// =============================================================================

/// A priced line in an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceLineItem {
    /// Item name at time of pricing (frozen).
    pub name: String,
    pub quantity: i64,
    /// Weight score at time of pricing (frozen).
    pub weight_score: u32,
    /// Cost for the whole quantity, whole units.
    pub item_cost: Money,
}

// =============================================================================
// Invoice
// =============================================================================

/// The complete result of one pricing calculation.
///
/// Fields are private so that `total_cost == subtotal + trailer_cost` cannot
/// be broken after construction. Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Invoice {
    origin: String,
    destination: String,
    distance_km: f64,
    items: Vec<InvoiceLineItem>,
    subtotal: Money,
    trailer_required: bool,
    trailer_cost: Money,
    total_cost: Money,
}

impl Invoice {
    /// Assembles an invoice. The subtotal is the exact sum of the lines and
    /// the total is derived, so the invariant holds by construction.
    pub(crate) fn assemble(
        origin: &str,
        destination: &str,
        distance_km: f64,
        items: Vec<InvoiceLineItem>,
        trailer_required: bool,
        trailer_cost: Money,
    ) -> CoreResult<Self> {
        let subtotal = Money::checked_sum(items.iter().map(|line| line.item_cost))
            .ok_or_else(|| ValidationError::overflow("subtotal"))?;
        let total_cost = subtotal
            .checked_add(trailer_cost)
            .ok_or_else(|| ValidationError::overflow("total cost"))?;

        Ok(Invoice {
            origin: origin.to_string(),
            destination: destination.to_string(),
            distance_km: round_one_decimal(distance_km),
            items,
            subtotal,
            trailer_required,
            trailer_cost,
            total_cost,
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Distance rounded to one decimal place.
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Line items in request order.
    pub fn items(&self) -> &[InvoiceLineItem] {
        &self.items
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn trailer_required(&self) -> bool {
        self.trailer_required
    }

    /// Zero unless [`Invoice::trailer_required`].
    pub fn trailer_cost(&self) -> Money {
        self.trailer_cost
    }

    pub fn total_cost(&self) -> Money {
        self.total_cost
    }
}

/// Rounds a distance to one decimal place.
#[inline]
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn desk() -> CatalogItem {
        CatalogItem::new("Desk", "Furniture", 3, Money::from_units(2800))
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Large Sofa"), "large-sofa");
        assert_eq!(slugify("Dining Table (6-seater)"), "dining-table-6-seater");
        assert_eq!(slugify("Box (Small)"), "box-small");
        assert_eq!(slugify("  Lamp  "), "lamp");
    }

    #[test]
    fn test_selection_entry_rejects_zero_quantity() {
        let item = desk();
        assert!(SelectionEntry::new(&item, 0).is_err());
        assert!(SelectionEntry::new(&item, -2).is_err());

        let entry = SelectionEntry::new(&item, 4).unwrap();
        assert_eq!(entry.weight(), Some(12));

        let unchecked = SelectionEntry {
            item: &item,
            quantity: i64::MAX,
        };
        assert_eq!(unchecked.weight(), None);
    }

    #[test]
    fn test_invoice_assemble_invariant() {
        let lines = vec![
            InvoiceLineItem {
                name: "Desk".to_string(),
                quantity: 1,
                weight_score: 3,
                item_cost: Money::from_units(8400),
            },
            InvoiceLineItem {
                name: "Lamp".to_string(),
                quantity: 2,
                weight_score: 1,
                item_cost: Money::from_units(1800),
            },
        ];

        let invoice =
            Invoice::assemble("A", "B", 123.456, lines, true, Money::from_units(10000)).unwrap();

        assert_eq!(invoice.subtotal().units(), 10200);
        assert_eq!(invoice.total_cost().units(), 20200);
        assert_eq!(
            Some(invoice.total_cost()),
            invoice.subtotal().checked_add(invoice.trailer_cost())
        );
        assert!((invoice.distance_km() - 123.5).abs() < 1e-9);
    }

    #[test]
    fn test_invoice_assemble_overflow_is_an_error() {
        let line = |name: &str| InvoiceLineItem {
            name: name.to_string(),
            quantity: 1,
            weight_score: 1,
            item_cost: Money::from_units(i64::MAX / 2 + 1),
        };

        let err = Invoice::assemble("A", "B", 1.0, vec![line("X"), line("Y")], false, Money::zero())
            .unwrap_err();
        assert!(err.to_string().contains("subtotal"));

        let err = Invoice::assemble("A", "B", 1.0, vec![line("X")], true, Money::from_units(i64::MAX))
            .unwrap_err();
        assert!(err.to_string().contains("total cost"));
    }

    #[test]
    fn test_round_one_decimal() {
        assert!((round_one_decimal(299.0) - 299.0).abs() < 1e-9);
        assert!((round_one_decimal(12.34) - 12.3).abs() < 1e-9);
        assert!((round_one_decimal(12.35001) - 12.4).abs() < 1e-9);
    }
}
