//! # Repository Module
//!
//! Album storage behind a single seam.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  catalog-cli::run<S: AlbumStore>                                       │
//! │       │                                                                 │
//! │       │  store.fetch_all() / fetch_by_id(9) / insert(&album)           │
//! │       ▼                                                                 │
//! │  AlbumStore (trait)                                                    │
//! │  ├── AlbumRepository   ──► PostgreSQL (production)                     │
//! │  └── MemoryAlbumStore  ──► Vec in a Mutex (tests)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Stores
//!
//! - [`AlbumRepository`](album::AlbumRepository) - PostgreSQL-backed
//! - [`MemoryAlbumStore`](memory::MemoryAlbumStore) - in-memory fake

use async_trait::async_trait;
use catalog_core::{Album, AlbumListing, NewAlbum};

use crate::error::DbResult;

pub mod album;
pub mod memory;

/// Entity name used in not-found and multiple-row errors.
pub const ALBUM_ENTITY: &str = "album";

/// Read and write access to the album table.
#[async_trait]
pub trait AlbumStore: Send + Sync {
    /// Reads every album.
    ///
    /// Rows that fail to decode are skipped and reported in
    /// [`AlbumListing::skipped`]; a failing query is an error.
    async fn fetch_all(&self) -> DbResult<AlbumListing>;

    /// Reads exactly one album by id.
    ///
    /// ## Returns
    /// * `Ok(Album)` - Exactly one row matched and decoded
    /// * `Err(DbError::NotFound)` - No row matched
    /// * `Err(DbError::MultipleRows)` - More than one row matched
    /// * `Err(DbError::Decode)` - The row could not be decoded
    async fn fetch_by_id(&self, id: i64) -> DbResult<Album>;

    /// Inserts an album and returns the number of affected rows.
    async fn insert(&self, album: &NewAlbum) -> DbResult<u64>;

    /// Inserts an album and returns it with its assigned id.
    async fn create(&self, album: &NewAlbum) -> DbResult<Album>;
}
