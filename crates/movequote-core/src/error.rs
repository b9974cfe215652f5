//! # Error Types
//!
//! Domain-specific error types for movequote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  movequote-core errors (this file)                                     │
//! │  ├── CoreError        - Pricing / lookup failures                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  movequote-distance errors (separate crate)                            │
//! │  └── DistanceError    - A single distance source failed                │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the user sees                             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Kinds
//! Callers that only need to tell "bad request" apart from "unknown item"
//! use [`CoreError::kind`]:
//!
//! | Kind           | Raised for                                          |
//! |----------------|-----------------------------------------------------|
//! | `InvalidInput` | blank origin/destination, empty selection, bad      |
//! |                | quantity, non-positive distance or reference price  |
//! | `NotFound`     | an item name/id that is not in the catalog          |

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Pricing and lookup errors.
///
/// Every variant is raised before any cost is computed, so an error always
/// means "no invoice", never "partial invoice".
#[derive(Debug, Error)]
pub enum CoreError {
    /// A selected item does not exist in the catalog.
    ///
    /// ## User Workflow
    /// ```text
    /// --item "Grand Piano=1"
    ///      │
    ///      ▼
    /// catalog.find("Grand Piano") → None
    ///      │
    ///      ▼
    /// ItemNotFound("Grand Piano")
    ///      │
    ///      ▼
    /// CLI shows: Item "Grand Piano" not found in catalog
    /// ```
    #[error("Item \"{0}\" not found in catalog")]
    ItemNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

/// Coarse classification of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself is malformed.
    InvalidInput,
    /// The request names something that does not exist.
    NotFound,
}

impl CoreError {
    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::ItemNotFound(_) => ErrorKind::NotFound,
            CoreError::Validation(_) => ErrorKind::InvalidInput,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Each variant names the offending field (or item) so the message can be
/// shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// A list that must contain at least one entry is empty.
    #[error("At least one {field} must be selected")]
    Empty { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be a whole number.
    #[error("{field} must be a whole number")]
    NotWholeNumber { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. malformed catalog document).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. two catalog items with the same name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// A computed amount that does not fit in an `i64`.
    pub(crate) fn overflow(field: impl Into<String>) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min: 0,
            max: i64::MAX,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
