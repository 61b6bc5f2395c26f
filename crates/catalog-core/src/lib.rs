//! # catalog-core: Pure Album Types
//!
//! This crate holds the album catalog's domain values and the rules that
//! apply to them, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Album Catalog Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 catalog-cli (one-shot run)                      │   │
//! │  │     list albums ──► fetch featured ──► insert literal albums    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    catalog-db (Database Layer)                  │   │
//! │  │             PgPool, AlbumRepository, MemoryAlbumStore           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ catalog-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌──────────────┐  ┌─────────────┐             │   │
//! │  │   │   types   │  │  validation  │  │    error    │             │   │
//! │  │   │   Album   │  │  title/price │  │ Validation  │             │   │
//! │  │   │  NewAlbum │  │    checks    │  │    Error    │             │   │
//! │  │   └───────────┘  └──────────────┘  └─────────────┘             │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Album, NewAlbum, AlbumListing)
//! - [`validation`] - Input rules applied before an insert
//! - [`error`] - Validation error types
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::{validation::validate_new_album, NewAlbum};
//!
//! let album = NewAlbum::new("Still Bill", "Bill Withers", 56.99);
//! assert!(validate_new_album(&album).is_ok());
//!
//! let stored = album.with_id(7);
//! assert_eq!(stored.to_string(), "#7 \"Still Bill\" by Bill Withers ($56.99)");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum title length, matching the `VARCHAR(128)` column.
pub const MAX_TITLE_LEN: usize = 128;

/// Maximum artist length, matching the `VARCHAR(255)` column.
pub const MAX_ARTIST_LEN: usize = 255;

/// Largest price the `DECIMAL(5,2)` column holds.
pub const MAX_PRICE: f64 = 999.99;
