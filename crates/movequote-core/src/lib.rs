//! # movequote-core: Pure Pricing Logic for MoveQuote
//!
//! This crate is the **heart** of MoveQuote. It prices household moves as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MoveQuote Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    movequote-cli                                │   │
//! │  │    args / request file ──► config ──► output / export           │   │
//! │  └──────────────┬──────────────────────────────────┬───────────────┘   │
//! │                 │                                  │                    │
//! │  ┌──────────────▼───────────────┐  ┌───────────────▼───────────────┐   │
//! │  │  movequote-distance          │  │  ★ movequote-core (THIS) ★    │   │
//! │  │  manual / great-circle /     │  │                               │   │
//! │  │  default estimate            │  │  catalog   rate   pricing     │   │
//! │  │  (never fails hard)          │  │  quote     money  format      │   │
//! │  └──────────────────────────────┘  │                               │   │
//! │                 │   distance_km    │  NO I/O • PURE FUNCTIONS      │   │
//! │                 └─────────────────►└───────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogItem, SelectionEntry, Invoice)
//! - [`money`] - Whole-unit Money type
//! - [`rate`] - Reference price → per-km rate
//! - [`pricing`] - Item costing, trailer surcharge, invoice assembly
//! - [`catalog`] - Read-only item catalog
//! - [`quote`] - Raw request validation and resolution
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use movequote_core::catalog::Catalog;
//! use movequote_core::pricing::PricingEngine;
//! use movequote_core::quote::{ItemRequest, QuoteRequest};
//!
//! let catalog = Catalog::builtin();
//! let engine = PricingEngine::default();
//!
//! let request = QuoteRequest {
//!     origin: "The Reeds, Centurion".into(),
//!     destination: "Tzaneen".into(),
//!     items: vec![ItemRequest::new("Desk", 1.0), ItemRequest::new("Lamp", 2.0)],
//! };
//!
//! let invoice = request.price(&catalog, &engine, 299.0).unwrap();
//! assert_eq!(
//!     Some(invoice.total_cost()),
//!     invoice.subtotal().checked_add(invoice.trailer_cost())
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
mod format;
pub mod money;
pub mod pricing;
pub mod quote;
pub mod rate;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use pricing::{PricingConfig, PricingEngine, TrailerPolicy};
pub use quote::{ItemRequest, QuoteRequest};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Distance (km) the catalog reference prices are quoted for.
///
/// The reference route is The Reeds, Centurion → Tzaneen.
pub const REFERENCE_DISTANCE_KM: f64 = 299.0;

/// Load the standard vehicle carries before a trailer is needed
/// (Σ weight score × quantity).
pub const VEHICLE_CAPACITY: i64 = 50;

/// Minimum trailer surcharge.
pub const MIN_TRAILER_COST: Money = Money::from_units(10_000);

/// Trailer rate per km under the flat-rate policy.
pub const TRAILER_RATE_PER_KM: f64 = 35.0;

/// Multiplier applied on top of an item's weight score.
pub const DEFAULT_WEIGHT_FACTOR: f64 = 1.0;

/// Weight score bounds for catalog items.
pub const MIN_WEIGHT_SCORE: u32 = 1;
pub const MAX_WEIGHT_SCORE: u32 = 5;

/// Largest quantity of a single item one quote accepts.
pub const MAX_QUANTITY: i64 = 10_000;
