//! # Domain Types
//!
//! Core domain types used throughout the album catalog.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    NewAlbum     │   │      Album      │   │  AlbumListing   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  title          │──►│  id (store)     │──►│  albums         │       │
//! │  │  artist         │   │  title          │   │  skipped rows   │       │
//! │  │  price          │   │  artist, price  │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │    insert payload        read / created         read-all result         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! The identifier is assigned by the store. A [`NewAlbum`] has no id field
//! at all, so an unsaved album can never be mistaken for a stored one.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Album
// =============================================================================

/// An album as stored in the `album` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Album {
    /// Identifier assigned by the database.
    pub id: i64,

    /// Album title.
    pub title: String,

    /// Performing artist.
    pub artist: String,

    /// Retail price.
    pub price: f64,
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} \"{}\" by {} (${:.2})",
            self.id, self.title, self.artist, self.price
        )
    }
}

// =============================================================================
// New Album
// =============================================================================

/// An album that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAlbum {
    pub title: String,
    pub artist: String,
    pub price: f64,
}

impl NewAlbum {
    /// Creates an insert payload.
    pub fn new(title: impl Into<String>, artist: impl Into<String>, price: f64) -> Self {
        NewAlbum {
            title: title.into(),
            artist: artist.into(),
            price,
        }
    }

    /// Pairs this payload with the identifier the store assigned to it.
    pub fn with_id(self, id: i64) -> Album {
        Album {
            id,
            title: self.title,
            artist: self.artist,
            price: self.price,
        }
    }
}

// =============================================================================
// Album Listing
// =============================================================================

/// A row that could not be decoded during a full listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// Zero-based position of the row in the result set.
    pub index: usize,

    /// Decode failure text.
    pub reason: String,
}

/// Result of reading every album.
///
/// Rows that fail to decode do not abort the listing; they are dropped
/// from `albums` and recorded in `skipped` so the caller can tell a
/// complete listing from a partial one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumListing {
    /// Decoded albums, in result-set order.
    pub albums: Vec<Album>,

    /// Rows that were dropped.
    pub skipped: Vec<SkippedRow>,
}

impl AlbumListing {
    /// Collects per-row decode results, keeping the good rows in order.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::{AlbumListing, NewAlbum};
    ///
    /// let rows: Vec<Result<_, String>> = vec![
    ///     Ok(NewAlbum::new("A", "B", 1.0).with_id(1)),
    ///     Err("price is NULL".to_string()),
    ///     Ok(NewAlbum::new("C", "D", 2.0).with_id(3)),
    /// ];
    ///
    /// let listing = AlbumListing::from_rows(rows);
    /// assert_eq!(listing.len(), 2);
    /// assert_eq!(listing.skipped[0].index, 1);
    /// ```
    pub fn from_rows<E, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Result<Album, E>>,
        E: fmt::Display,
    {
        let mut listing = AlbumListing::default();

        for (index, row) in rows.into_iter().enumerate() {
            match row {
                Ok(album) => listing.albums.push(album),
                Err(err) => listing.skipped.push(SkippedRow {
                    index,
                    reason: err.to_string(),
                }),
            }
        }

        listing
    }

    /// Number of albums decoded.
    pub fn len(&self) -> usize {
        self.albums.len()
    }

    /// True if no album was decoded.
    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    /// True if every row decoded.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
