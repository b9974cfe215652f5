//! # CLI Configuration
//!
//! Pricing constants and distance settings, loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MOVEQUOTE_TRAILER_POLICY=average_item_rate                         │
//! │     MOVEQUOTE_WEIGHT_FACTOR=1.2                                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/movequote/movequote.toml (Linux)                         │
//! │     ~/Library/Application Support/com.movequote.movequote/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     299 km reference route, capacity 50, R10 000 min trailer, R35/km   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [pricing]
//! reference_distance_km = 299.0
//! vehicle_capacity = 50
//! min_trailer_cost = 10000
//! trailer_rate_per_km = 35.0
//! weight_factor = 1.0
//! trailer_policy = "flat_rate"   # flat_rate | average_item_rate
//!
//! [distance]
//! default_estimate_km = 250.0
//!
//! [catalog]
//! path = "/etc/movequote/catalog.json"
//! ```

use movequote_core::{
    Money, PricingConfig, TrailerPolicy, DEFAULT_WEIGHT_FACTOR, MIN_TRAILER_COST,
    REFERENCE_DISTANCE_KM, TRAILER_RATE_PER_KM, VEHICLE_CAPACITY,
};
use movequote_distance::DEFAULT_ESTIMATE_KM;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

// =============================================================================
// Pricing Settings
// =============================================================================

/// `[pricing]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    #[serde(default = "default_reference_distance")]
    pub reference_distance_km: f64,

    #[serde(default = "default_vehicle_capacity")]
    pub vehicle_capacity: i64,

    /// Whole currency units.
    #[serde(default = "default_min_trailer_cost")]
    pub min_trailer_cost: i64,

    #[serde(default = "default_trailer_rate")]
    pub trailer_rate_per_km: f64,

    #[serde(default = "default_weight_factor")]
    pub weight_factor: f64,

    #[serde(default)]
    pub trailer_policy: TrailerPolicy,
}

fn default_reference_distance() -> f64 {
    REFERENCE_DISTANCE_KM
}

fn default_vehicle_capacity() -> i64 {
    VEHICLE_CAPACITY
}

fn default_min_trailer_cost() -> i64 {
    MIN_TRAILER_COST.units()
}

fn default_trailer_rate() -> f64 {
    TRAILER_RATE_PER_KM
}

fn default_weight_factor() -> f64 {
    DEFAULT_WEIGHT_FACTOR
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            reference_distance_km: default_reference_distance(),
            vehicle_capacity: default_vehicle_capacity(),
            min_trailer_cost: default_min_trailer_cost(),
            trailer_rate_per_km: default_trailer_rate(),
            weight_factor: default_weight_factor(),
            trailer_policy: TrailerPolicy::default(),
        }
    }
}

// =============================================================================
// Distance Settings
// =============================================================================

/// `[distance]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceSettings {
    /// Used when neither a manual distance nor coordinates are usable.
    #[serde(default = "default_estimate")]
    pub default_estimate_km: f64,
}

fn default_estimate() -> f64 {
    DEFAULT_ESTIMATE_KM
}

impl Default for DistanceSettings {
    fn default() -> Self {
        DistanceSettings {
            default_estimate_km: default_estimate(),
        }
    }
}

// =============================================================================
// Catalog Settings
// =============================================================================

/// `[catalog]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// JSON catalog file. The built-in catalog is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub distance: DistanceSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    ///
    /// An explicitly given path must exist; the default path may be absent.
    pub fn load(config_path: Option<&Path>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `MOVEQUOTE_*` overrides from `lookup`.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T: std::str::FromStr>(key: &str, raw: Option<String>) -> Option<T> {
            let raw = raw?;
            match raw.trim().parse() {
                Ok(value) => {
                    debug!(key, value = %raw, "Overriding config from environment");
                    Some(value)
                }
                Err(_) => {
                    warn!(key, value = %raw, "Ignoring unparseable environment override");
                    None
                }
            }
        }

        let key = "MOVEQUOTE_REFERENCE_DISTANCE_KM";
        if let Some(v) = parsed(key, lookup(key)) {
            self.pricing.reference_distance_km = v;
        }
        let key = "MOVEQUOTE_VEHICLE_CAPACITY";
        if let Some(v) = parsed(key, lookup(key)) {
            self.pricing.vehicle_capacity = v;
        }
        let key = "MOVEQUOTE_MIN_TRAILER_COST";
        if let Some(v) = parsed(key, lookup(key)) {
            self.pricing.min_trailer_cost = v;
        }
        let key = "MOVEQUOTE_TRAILER_RATE_PER_KM";
        if let Some(v) = parsed(key, lookup(key)) {
            self.pricing.trailer_rate_per_km = v;
        }
        let key = "MOVEQUOTE_WEIGHT_FACTOR";
        if let Some(v) = parsed(key, lookup(key)) {
            self.pricing.weight_factor = v;
        }
        let key = "MOVEQUOTE_TRAILER_POLICY";
        if let Some(v) = parsed(key, lookup(key)) {
            self.pricing.trailer_policy = v;
        }
        let key = "MOVEQUOTE_DEFAULT_DISTANCE_KM";
        if let Some(v) = parsed(key, lookup(key)) {
            self.distance.default_estimate_km = v;
        }
        if let Some(path) = lookup("MOVEQUOTE_CATALOG") {
            self.catalog.path = Some(PathBuf::from(path));
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        self.to_pricing_config()
            .validate()
            .map_err(|e| CliError::InvalidConfig(e.to_string()))?;

        let estimate = self.distance.default_estimate_km;
        if !estimate.is_finite() || estimate <= 0.0 {
            return Err(CliError::InvalidConfig(
                "default_estimate_km must be positive".into(),
            ));
        }

        Ok(())
    }

    /// The pricing constants as the core expects them.
    pub fn to_pricing_config(&self) -> PricingConfig {
        PricingConfig {
            reference_distance_km: self.pricing.reference_distance_km,
            vehicle_capacity: self.pricing.vehicle_capacity,
            min_trailer_cost: Money::from_units(self.pricing.min_trailer_cost),
            trailer_rate_per_km: self.pricing.trailer_rate_per_km,
            weight_factor: self.pricing.weight_factor,
            trailer_policy: self.pricing.trailer_policy,
        }
    }

    /// Renders the effective configuration as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "movequote", "movequote")
            .map(|dirs| dirs.config_dir().join("movequote.toml"))
    }
}
