//! # Distance Resolver
//!
//! Asks each configured source in turn and never fails.
//!
//! ## Fallback Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  resolve("Centurion", "Tzaneen")                                        │
//! │     │                                                                   │
//! │     ├─► manual        ── Err ──► warn!, next                            │
//! │     ├─► great-circle  ── Ok(300.8) ──► Resolution { fallback: false }   │
//! │     │                                                                   │
//! │     └─► (all failed)  ──► default estimate ──► Resolution {             │
//! │                                                  fallback: true }       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{info, warn};

use crate::round_one_decimal;
use crate::source::DistanceSource;

/// Distance used when no source answers.
pub const DEFAULT_ESTIMATE_KM: f64 = 250.0;

/// The outcome of resolving a distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Distance in km, one decimal place, always positive.
    pub distance_km: f64,

    /// Name of the source that answered, or `"default-estimate"`.
    pub source: String,

    /// True when every configured source failed.
    pub fallback_used: bool,
}

/// Ordered list of distance sources with a default estimate behind them.
pub struct DistanceResolver {
    sources: Vec<Box<dyn DistanceSource + Send + Sync>>,
    default_estimate_km: f64,
}

impl DistanceResolver {
    /// Creates a resolver with no sources.
    ///
    /// A non-positive default estimate is replaced by [`DEFAULT_ESTIMATE_KM`].
    pub fn new(default_estimate_km: f64) -> Self {
        let default_estimate_km = if default_estimate_km.is_finite() && default_estimate_km > 0.0 {
            default_estimate_km
        } else {
            warn!(
                configured = default_estimate_km,
                using = DEFAULT_ESTIMATE_KM,
                "Unusable default distance estimate"
            );
            DEFAULT_ESTIMATE_KM
        };

        DistanceResolver {
            sources: Vec::new(),
            default_estimate_km,
        }
    }

    /// Appends a source; sources are tried in insertion order.
    pub fn with_source(mut self, source: impl DistanceSource + Send + Sync + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Number of configured sources.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn default_estimate_km(&self) -> f64 {
        self.default_estimate_km
    }

    /// Resolves the distance between two locations.
    ///
    /// ## Example
    /// ```rust
    /// use movequote_distance::{DistanceResolver, ManualDistance};
    ///
    /// let resolver = DistanceResolver::new(250.0)
    ///     .with_source(ManualDistance(-1.0))
    ///     .with_source(ManualDistance(299.04));
    ///
    /// let resolution = resolver.resolve("Centurion", "Tzaneen");
    /// assert_eq!(resolution.distance_km, 299.0);
    /// assert!(!resolution.fallback_used);
    /// ```
    pub fn resolve(&self, origin: &str, destination: &str) -> Resolution {
        for source in &self.sources {
            match source.distance_km(origin, destination) {
                Ok(km) if round_one_decimal(km) <= 0.0 => {
                    warn!(source = source.name(), km, "Distance rounds to zero, trying next");
                }
                Ok(km) => {
                    let distance_km = round_one_decimal(km);
                    info!(
                        source = source.name(),
                        distance_km,
                        origin,
                        destination,
                        "Distance resolved"
                    );
                    return Resolution {
                        distance_km,
                        source: source.name().to_string(),
                        fallback_used: false,
                    };
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Distance source failed, trying next");
                }
            }
        }

        warn!(
            distance_km = self.default_estimate_km,
            origin,
            destination,
            "No distance source answered, using default estimate"
        );
        Resolution {
            distance_km: round_one_decimal(self.default_estimate_km),
            source: "default-estimate".to_string(),
            fallback_used: true,
        }
    }
}

impl Default for DistanceResolver {
    fn default() -> Self {
        DistanceResolver::new(DEFAULT_ESTIMATE_KM)
    }
}

impl std::fmt::Debug for DistanceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("DistanceResolver")
            .field("sources", &names)
            .field("default_estimate_km", &self.default_estimate_km)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DistanceError, DistanceResult};
    use crate::source::{Coordinates, GreatCircleDistance, ManualDistance};

    struct Offline;

    impl DistanceSource for Offline {
        fn name(&self) -> &str {
            "offline"
        }

        fn distance_km(&self, _origin: &str, _destination: &str) -> DistanceResult<f64> {
            Err(DistanceError::NotConfigured {
                source_name: "offline".to_string(),
            })
        }
    }

    #[test]
    fn test_first_successful_source_wins() {
        let resolver = DistanceResolver::default()
            .with_source(ManualDistance(120.0))
            .with_source(ManualDistance(999.0));

        let resolution = resolver.resolve("a", "b");
        assert_eq!(resolution.distance_km, 120.0);
        assert_eq!(resolution.source, "manual");
        assert!(!resolution.fallback_used);
    }

    #[test]
    fn test_failing_sources_are_skipped() {
        let a = Coordinates::new(0.0, 0.0).unwrap();
        let b = Coordinates::new(0.0, 1.0).unwrap();
        let resolver = DistanceResolver::default()
            .with_source(Offline)
            .with_source(ManualDistance(0.0))
            .with_source(GreatCircleDistance::new(a, b));

        let resolution = resolver.resolve("a", "b");
        assert_eq!(resolution.source, "great-circle");
        assert!((resolution.distance_km - 111.2).abs() < 1e-9);
    }

    #[test]
    fn test_default_estimate_when_everything_fails() {
        let resolver = DistanceResolver::new(180.0).with_source(Offline);
        let resolution = resolver.resolve("a", "b");

        assert_eq!(resolution.distance_km, 180.0);
        assert_eq!(resolution.source, "default-estimate");
        assert!(resolution.fallback_used);

        let empty = DistanceResolver::default();
        assert_eq!(empty.resolve("a", "b").distance_km, DEFAULT_ESTIMATE_KM);
    }

    #[test]
    fn test_bad_default_estimate_is_replaced() {
        assert_eq!(DistanceResolver::new(0.0).default_estimate_km(), DEFAULT_ESTIMATE_KM);
        assert_eq!(DistanceResolver::new(f64::NAN).default_estimate_km(), DEFAULT_ESTIMATE_KM);
    }

    #[test]
    fn test_result_is_rounded_to_one_decimal() {
        let resolver = DistanceResolver::default().with_source(ManualDistance(87.36));
        assert!((resolver.resolve("a", "b").distance_km - 87.4).abs() < 1e-9);
    }

    #[test]
    fn test_distance_rounding_to_zero_is_skipped() {
        let resolver = DistanceResolver::default()
            .with_source(ManualDistance(0.04))
            .with_source(ManualDistance(12.0));
        assert_eq!(resolver.resolve("a", "b").distance_km, 12.0);
    }

    #[test]
    fn test_debug_lists_source_names() {
        let resolver = DistanceResolver::default()
            .with_source(ManualDistance(1.0))
            .with_source(Offline);
        let debug = format!("{:?}", resolver);
        assert!(debug.contains("[\"manual\", \"offline\"]"));
        assert_eq!(resolver.source_count(), 2);
    }
}
