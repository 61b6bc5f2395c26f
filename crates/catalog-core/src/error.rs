//! # Error Types
//!
//! Domain-specific error types for catalog-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  catalog-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  catalog-cli errors (in app)                                           │
//! │  └── AppError         - What decides the exit status                   │
//! │                                                                         │
//! │  Flow: ValidationError → DbError → AppError → stderr + exit code       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before an album reaches the database, so a malformed insert is
/// reported without a round trip.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long for its column.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Price is negative, NaN, infinite or above the column's range.
    #[error("price must be a finite amount between 0 and 999.99 (got {value})")]
    InvalidPrice { value: f64 },
}

// =============================================================================
// Unit Tests
// =============================================================================
