//! # catalog-db: Database Layer for the Album Catalog
//!
//! This crate provides database access for the album catalog.
//! It uses PostgreSQL with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Album Catalog Data Flow                          │
//! │                                                                         │
//! │  catalog-cli::run (fetch_all, fetch_by_id, insert)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    catalog-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌─────────────┐   │   │
//! │  │   │   Database    │    │  AlbumStore    │    │   schema    │   │   │
//! │  │   │   (pool.rs)   │    │  AlbumRepo     │    │  album DDL  │   │   │
//! │  │   │   PgPool      │◄───│  MemoryStore   │    │             │   │   │
//! │  │   └───────────────┘    └────────────────┘    └─────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PostgreSQL (DATABASE_URL) ── table `album`                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`schema`] - Reference DDL for the album table
//! - [`error`] - Database error types
//! - [`repository`] - The `AlbumStore` seam and its implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_db::{AlbumStore, Database, DbConfig};
//!
//! let db = Database::connect(DbConfig::new(database_url)).await?;
//!
//! let listing = db.albums().fetch_all().await?;
//! let album = db.albums().fetch_by_id(9).await?;
//!
//! db.close().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pool;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::album::AlbumRepository;
pub use repository::memory::MemoryAlbumStore;
pub use repository::AlbumStore;
