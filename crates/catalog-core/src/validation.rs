//! # Validation Module
//!
//! Input validation for albums about to be inserted.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE                                                  │
//! │  ├── Required fields (title, artist)                                   │
//! │  ├── Column length limits                                              │
//! │  └── Price within 0..=MAX_PRICE                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (PostgreSQL)                                        │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (if the schema defines any)                    │
//! │  └── DECIMAL(5,2) precision                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::validation::{validate_price, validate_title};
//!
//! validate_title("The Low End Theory").unwrap();
//! assert!(validate_price(-3.0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::NewAlbum;
use crate::{MAX_ARTIST_LEN, MAX_PRICE, MAX_TITLE_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates an album title.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_TITLE_LEN`] characters, surrounding whitespace included
pub fn validate_title(title: &str) -> ValidationResult<()> {
    validate_text("title", title, MAX_TITLE_LEN)
}

/// Validates an artist name.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_ARTIST_LEN`] characters, surrounding whitespace included
pub fn validate_artist(artist: &str) -> ValidationResult<()> {
    validate_text("artist", artist, MAX_ARTIST_LEN)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price.
///
/// Zero is allowed (free promo releases); NaN, infinities, negative
/// amounts and anything above [`MAX_PRICE`] are not.
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() || !(0.0..=MAX_PRICE).contains(&price) {
        return Err(ValidationError::InvalidPrice { value: price });
    }
    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates every field of an insert payload, reporting the first failure.
pub fn validate_new_album(album: &NewAlbum) -> ValidationResult<()> {
    validate_title(&album.title)?;
    validate_artist(&album.artist)?;
    validate_price(album.price)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
