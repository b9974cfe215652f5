//! # Pricing Engine
//!
//! Prices a selection of catalog items over a distance.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      calculate_invoice()                                │
//! │                                                                         │
//! │  1. Validate   origin, destination, selection, distance, quantities,   │
//! │                reference prices            (fail fast, no invoice)      │
//! │                                                                         │
//! │  2. Per line   rate     = reference_price / reference_distance          │
//! │                cost     = round(rate × km × weight × factor × qty)      │
//! │                                                                         │
//! │  3. Subtotal   Σ line costs                (exact, already whole)       │
//! │                                                                         │
//! │  4. Trailer    Σ weight × qty > capacity ?                              │
//! │                  yes → round(max(minimum, km × trailer rate))           │
//! │                  no  → 0                                                │
//! │                                                                         │
//! │  5. Total      subtotal + trailer                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Trailer Policies
//! Two ways of pricing the trailer exist. The policy is part of the
//! configuration and never inferred:
//!
//! | Policy            | Trailer rate per km                                 |
//! |-------------------|-----------------------------------------------------|
//! | `FlatRate`        | `trailer_rate_per_km` (R35)                         |
//! | `AverageItemRate` | mean per-km rate of the selected items × capacity   |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::rate::per_km_rate;
use crate::types::{CatalogItem, Invoice, InvoiceLineItem, SelectionEntry};
use crate::validation::{
    validate_distance_km, validate_entry_quantity, validate_location, validate_reference_price,
    validate_selection_len, ValidationResult,
};
use crate::{
    DEFAULT_WEIGHT_FACTOR, MIN_TRAILER_COST, REFERENCE_DISTANCE_KM, TRAILER_RATE_PER_KM,
    VEHICLE_CAPACITY,
};

// =============================================================================
// Trailer Policy
// =============================================================================

/// How the trailer surcharge rate is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TrailerPolicy {
    /// Fixed rate per kilometer.
    #[default]
    FlatRate,

    /// Average per-km rate of the selected items, scaled by vehicle capacity.
    AverageItemRate,
}

impl fmt::Display for TrailerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrailerPolicy::FlatRate => write!(f, "flat_rate"),
            TrailerPolicy::AverageItemRate => write!(f, "average_item_rate"),
        }
    }
}

impl FromStr for TrailerPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "flat_rate" | "flat" => Ok(TrailerPolicy::FlatRate),
            "average_item_rate" | "average" => Ok(TrailerPolicy::AverageItemRate),
            other => Err(ValidationError::InvalidFormat {
                field: "trailer_policy".to_string(),
                reason: format!(
                    "unknown policy '{}'. Valid options: flat_rate, average_item_rate",
                    other
                ),
            }),
        }
    }
}

// =============================================================================
// Pricing Configuration
// =============================================================================

/// Process-wide pricing constants, fixed at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    /// Distance the reference prices are quoted for.
    pub reference_distance_km: f64,

    /// Load (Σ weight × quantity) the vehicle carries without a trailer.
    pub vehicle_capacity: i64,

    /// Smallest trailer surcharge ever charged.
    pub min_trailer_cost: Money,

    /// Trailer rate under [`TrailerPolicy::FlatRate`].
    pub trailer_rate_per_km: f64,

    /// Extra multiplier on weight score. 1.0 means weight score is used as-is.
    pub weight_factor: f64,

    pub trailer_policy: TrailerPolicy,
}

impl PricingConfig {
    /// Weight score used directly, flat R35/km trailer.
    pub fn flat_rate() -> Self {
        PricingConfig {
            reference_distance_km: REFERENCE_DISTANCE_KM,
            vehicle_capacity: VEHICLE_CAPACITY,
            min_trailer_cost: MIN_TRAILER_COST,
            trailer_rate_per_km: TRAILER_RATE_PER_KM,
            weight_factor: DEFAULT_WEIGHT_FACTOR,
            trailer_policy: TrailerPolicy::FlatRate,
        }
    }

    /// Weight score used directly, trailer priced from the average item rate.
    pub fn average_item_rate() -> Self {
        PricingConfig {
            trailer_policy: TrailerPolicy::AverageItemRate,
            ..PricingConfig::flat_rate()
        }
    }

    /// Checks every constant is usable.
    pub fn validate(&self) -> ValidationResult<()> {
        positive_finite("reference_distance_km", self.reference_distance_km)?;
        positive_finite("weight_factor", self.weight_factor)?;

        if !self.trailer_rate_per_km.is_finite() || self.trailer_rate_per_km < 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "trailer_rate_per_km".to_string(),
                min: 0,
                max: i64::MAX,
            });
        }

        if self.vehicle_capacity < 0 {
            return Err(ValidationError::OutOfRange {
                field: "vehicle_capacity".to_string(),
                min: 0,
                max: i64::MAX,
            });
        }

        if self.min_trailer_cost.units() < 0 {
            return Err(ValidationError::OutOfRange {
                field: "min_trailer_cost".to_string(),
                min: 0,
                max: i64::MAX,
            });
        }

        Ok(())
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig::flat_rate()
    }
}

fn positive_finite(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Pricing Engine
// =============================================================================

/// Stateless pricing service.
///
/// Holds only its configuration; every method is a pure function of its
/// arguments, so one engine can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    /// Creates an engine after validating the configuration.
    pub fn new(config: PricingConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(PricingEngine { config })
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Per-km rate for a catalog item.
    pub fn per_km_rate(&self, item: &CatalogItem) -> CoreResult<f64> {
        validate_reference_price(&item.name, item.reference_price)?;
        Ok(per_km_rate(
            item.reference_price,
            self.config.reference_distance_km,
        )?)
    }

    /// Cost of moving `quantity` of `item` over `distance_km`.
    ///
    /// Returns zero for a non-positive quantity or distance: nothing moves,
    /// nothing is charged. Request validation rejects those values earlier.
    ///
    /// ## Example
    /// ```rust
    /// use movequote_core::money::Money;
    /// use movequote_core::pricing::PricingEngine;
    /// use movequote_core::types::CatalogItem;
    ///
    /// let engine = PricingEngine::default();
    /// let sofa = CatalogItem::new("Large Sofa", "Furniture", 2, Money::from_units(4500));
    ///
    /// // On the reference route the rate cancels out: 4500 × weight 2.
    /// assert_eq!(engine.item_cost(&sofa, 1, 299.0).unwrap().units(), 9000);
    /// assert!(engine.item_cost(&sofa, 0, 299.0).unwrap().is_zero());
    /// ```
    pub fn item_cost(&self, item: &CatalogItem, quantity: i64, distance_km: f64) -> CoreResult<Money> {
        if quantity <= 0 || distance_km.is_nan() || distance_km <= 0.0 {
            return Ok(Money::zero());
        }

        let rate = self.per_km_rate(item)?;
        let distance_cost = rate * distance_km;
        let weight_multiplier = item.weight_score as f64 * self.config.weight_factor;

        let cost = Money::round_from(distance_cost * weight_multiplier * quantity as f64)
            .ok_or_else(|| ValidationError::overflow(format!("cost for \"{}\"", item.name)))?;
        Ok(cost)
    }

    /// Σ `weight_score × quantity` over the selection.
    pub fn total_weight_score(&self, selection: &[SelectionEntry<'_>]) -> CoreResult<i64> {
        let mut total: i64 = 0;
        for entry in selection {
            total = entry
                .weight()
                .and_then(|weight| total.checked_add(weight))
                .ok_or_else(|| ValidationError::overflow("total weight score"))?;
        }
        Ok(total)
    }

    /// Whether the load exceeds vehicle capacity. Exactly at capacity fits.
    #[inline]
    pub fn trailer_required(&self, total_weight_score: i64) -> bool {
        total_weight_score > self.config.vehicle_capacity
    }

    /// Trailer surcharge for the distance, never below the minimum.
    ///
    /// The selection is only consulted under
    /// [`TrailerPolicy::AverageItemRate`].
    pub fn trailer_cost(&self, distance_km: f64, selection: &[SelectionEntry<'_>]) -> CoreResult<Money> {
        let rate = self.trailer_rate_per_km(selection)?;
        let calculated = distance_km * rate;
        let minimum = self.config.min_trailer_cost.as_f64();

        let cost = Money::round_from(calculated.max(minimum))
            .ok_or_else(|| ValidationError::overflow("trailer cost"))?;
        Ok(cost)
    }

    fn trailer_rate_per_km(&self, selection: &[SelectionEntry<'_>]) -> CoreResult<f64> {
        match self.config.trailer_policy {
            TrailerPolicy::FlatRate => Ok(self.config.trailer_rate_per_km),
            TrailerPolicy::AverageItemRate => {
                if selection.is_empty() {
                    return Ok(0.0);
                }
                let mut sum = 0.0;
                for entry in selection {
                    sum += self.per_km_rate(entry.item)?;
                }
                let average = sum / selection.len() as f64;
                Ok(average * self.config.vehicle_capacity as f64)
            }
        }
    }

    /// Prices a complete move.
    ///
    /// ## Preconditions (checked in order, before any costing)
    /// 1. origin non-blank
    /// 2. destination non-blank
    /// 3. at least one selection entry
    /// 4. distance positive and finite
    /// 5. every quantity ≥ 1 and every reference price > 0
    ///
    /// ## Example
    /// ```rust
    /// use movequote_core::catalog::Catalog;
    /// use movequote_core::pricing::PricingEngine;
    /// use movequote_core::types::SelectionEntry;
    ///
    /// let catalog = Catalog::builtin();
    /// let desk = catalog.find_by_name("desk").unwrap();
    /// let selection = [SelectionEntry::new(desk, 2).unwrap()];
    ///
    /// let invoice = PricingEngine::default()
    ///     .calculate_invoice("Pretoria", "Polokwane", 299.0, &selection)
    ///     .unwrap();
    ///
    /// assert_eq!(invoice.subtotal().units(), 2800 * 3 * 2);
    /// assert!(!invoice.trailer_required());
    /// ```
    pub fn calculate_invoice(
        &self,
        origin: &str,
        destination: &str,
        distance_km: f64,
        selection: &[SelectionEntry<'_>],
    ) -> CoreResult<Invoice> {
        validate_location("origin", origin)?;
        validate_location("destination", destination)?;
        validate_selection_len(selection.len())?;
        validate_distance_km(distance_km)?;
        for entry in selection {
            validate_entry_quantity(&entry.item.name, entry.quantity)?;
            validate_reference_price(&entry.item.name, entry.item.reference_price)?;
        }

        let mut lines = Vec::with_capacity(selection.len());
        for entry in selection {
            lines.push(InvoiceLineItem {
                name: entry.item.name.clone(),
                quantity: entry.quantity,
                weight_score: entry.item.weight_score,
                item_cost: self.item_cost(entry.item, entry.quantity, distance_km)?,
            });
        }

        let total_weight = self.total_weight_score(selection)?;
        let trailer_required = self.trailer_required(total_weight);
        let trailer_cost = if trailer_required {
            self.trailer_cost(distance_km, selection)?
        } else {
            Money::zero()
        };

        debug!(
            lines = lines.len(),
            total_weight,
            capacity = self.config.vehicle_capacity,
            trailer_required,
            trailer_cost = trailer_cost.units(),
            "priced move"
        );

        Invoice::assemble(
            origin,
            destination,
            distance_km,
            lines,
            trailer_required,
            trailer_cost,
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
