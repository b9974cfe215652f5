//! # movequote-distance: Distance Collaborator for MoveQuote
//!
//! Resolves the distance between an origin and a destination before the
//! pricing core runs. The core only ever sees a positive number of km.
//!
//! ## Modules
//!
//! - [`source`] - The `DistanceSource` trait and the built-in sources
//! - [`resolver`] - Ordered fallback across sources
//! - [`error`] - Per-source failures
//!
//! ## Example
//! ```rust
//! use movequote_distance::{Coordinates, DistanceResolver, GreatCircleDistance};
//!
//! let centurion: Coordinates = "-25.8601,28.1894".parse().unwrap();
//! let tzaneen: Coordinates = "-23.8332,30.1635".parse().unwrap();
//!
//! let resolver = DistanceResolver::default()
//!     .with_source(GreatCircleDistance::new(centurion, tzaneen));
//!
//! let resolution = resolver.resolve("Centurion", "Tzaneen");
//! assert!(resolution.distance_km > 0.0);
//! ```

pub mod error;
pub mod resolver;
pub mod source;

pub use error::{DistanceError, DistanceResult};
pub use resolver::{DistanceResolver, Resolution, DEFAULT_ESTIMATE_KM};
pub use source::{Coordinates, DistanceSource, GreatCircleDistance, ManualDistance};

/// Rounds a distance to one decimal place.
#[inline]
pub fn round_one_decimal(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}
