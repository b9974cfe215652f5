//! # Item Catalog
//!
//! The read-only list of items a customer can move.
//!
//! ## Lifetime
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  startup:  Catalog::builtin()  or  Catalog::from_json_str(file)         │
//! │               │                                                         │
//! │               ▼  validated once (names, ids, weights, prices)           │
//! │           Arc<Catalog>  ──► shared by every quote, never mutated        │
//! │               │                                                         │
//! │               ▼                                                         │
//! │  per quote: find("Desk") → &CatalogItem → SelectionEntry                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeSet, HashSet};

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::CatalogItem;
use crate::validation::{validate_reference_price, validate_weight_score};

/// (name, category, weight score, reference price) for the built-in catalog.
const BUILTIN_ITEMS: &[(&str, &str, u32, i64)] = &[
    // Heavy
    ("Large Sofa", "Furniture", 4, 4500),
    ("Dining Table (6-seater)", "Furniture", 4, 4200),
    ("King Size Bed", "Furniture", 4, 4800),
    ("Large Wardrobe", "Furniture", 4, 5000),
    ("Refrigerator", "Appliances", 4, 3800),
    ("Washing Machine", "Appliances", 4, 3600),
    // Medium-heavy
    ("Queen Size Bed", "Furniture", 3, 3800),
    ("Medium Wardrobe", "Furniture", 3, 3500),
    ("Desk", "Furniture", 3, 2800),
    ("Bookcase", "Furniture", 3, 2700),
    ("Dining Chairs (set of 4)", "Furniture", 3, 2500),
    ("TV Stand", "Furniture", 3, 2200),
    ("Dishwasher", "Appliances", 3, 3200),
    ("Tumble Dryer", "Appliances", 3, 3100),
    ("Oven", "Appliances", 3, 3300),
    // Medium
    ("Single Bed", "Furniture", 2, 2400),
    ("Coffee Table", "Furniture", 2, 1800),
    ("Side Table", "Furniture", 2, 1500),
    ("Office Chair", "Furniture", 2, 1600),
    ("Small Wardrobe", "Furniture", 2, 2000),
    ("TV (55 inch)", "Electronics", 2, 1900),
    ("Microwave", "Appliances", 2, 1700),
    ("Piano (Upright)", "Furniture", 2, 4200),
    // Light
    ("Box (Small)", "Boxes", 1, 800),
    ("Box (Medium)", "Boxes", 1, 1000),
    ("Box (Large)", "Boxes", 1, 1200),
    ("Lamp", "Furniture", 1, 900),
    ("Picture Frame", "Decor", 1, 600),
    ("Plant Pot", "Decor", 1, 700),
    ("Small Appliance", "Appliances", 1, 1100),
    ("Bicycle", "Miscellaneous", 1, 1500),
    ("Suitcase", "Miscellaneous", 1, 950),
    ("TV (32 inch)", "Electronics", 1, 1300),
];

/// An immutable, validated set of catalog items.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// The household catalog shipped with the calculator.
    pub fn builtin() -> Self {
        let items = BUILTIN_ITEMS
            .iter()
            .map(|&(name, category, weight, price)| {
                CatalogItem::new(name, category, weight, Money::from_units(price))
            })
            .collect();

        Catalog { items }
    }

    /// Builds a catalog from arbitrary items.
    ///
    /// ## Rules
    /// - Names and ids non-blank and unique (case-insensitive)
    /// - Weight score within 1-5
    /// - Reference price positive
    pub fn from_items(items: Vec<CatalogItem>) -> CoreResult<Self> {
        let mut names = HashSet::new();
        let mut ids = HashSet::new();

        for item in &items {
            if item.name.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: "catalog item name".to_string(),
                }
                .into());
            }
            if item.id.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: format!("id for \"{}\"", item.name),
                }
                .into());
            }
            validate_weight_score(&item.name, item.weight_score)?;
            validate_reference_price(&item.name, item.reference_price)?;

            if !names.insert(normalize(&item.name)) {
                return Err(ValidationError::Duplicate {
                    field: "item name".to_string(),
                    value: item.name.clone(),
                }
                .into());
            }
            if !ids.insert(normalize(&item.id)) {
                return Err(ValidationError::Duplicate {
                    field: "item id".to_string(),
                    value: item.id.clone(),
                }
                .into());
            }
        }

        Ok(Catalog { items })
    }

    /// Parses a JSON array of [`CatalogItem`] documents.
    ///
    /// ## Example
    /// ```rust
    /// use movequote_core::catalog::Catalog;
    ///
    /// let catalog = Catalog::from_json_str(r#"[
    ///     {"id": "crate", "name": "Crate", "category": "Boxes",
    ///      "weight_score": 1, "reference_price": 500}
    /// ]"#).unwrap();
    /// assert_eq!(catalog.len(), 1);
    /// ```
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let items: Vec<CatalogItem> =
            serde_json::from_str(json).map_err(|e| ValidationError::InvalidFormat {
                field: "catalog".to_string(),
                reason: e.to_string(),
            })?;
        Catalog::from_items(items)
    }

    /// All items, in catalog order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Case-insensitive lookup by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&CatalogItem> {
        let wanted = normalize(name);
        self.items.iter().find(|item| normalize(&item.name) == wanted)
    }

    /// Lookup by id first, then by name.
    pub fn find(&self, reference: &str) -> Option<&CatalogItem> {
        let wanted = normalize(reference);
        self.items
            .iter()
            .find(|item| normalize(&item.id) == wanted)
            .or_else(|| self.find_by_name(reference))
    }

    /// Items in exactly this category.
    pub fn by_category(&self, category: &str) -> Vec<&CatalogItem> {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .collect()
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        self.items
            .iter()
            .map(|item| item.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Items whose name or category contains `term` (case-insensitive).
    pub fn search(&self, term: &str) -> Vec<&CatalogItem> {
        let term = normalize(term);
        self.items
            .iter()
            .filter(|item| {
                item.name.to_lowercase().contains(&term)
                    || item.category.to_lowercase().contains(&term)
            })
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

// =============================================================================
// Unit Tests
// =============================================================================
