//! # Album Repository
//!
//! PostgreSQL operations for the `album` table.
//!
//! ## Column Decoding
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  column   stored as        selected as           decoded into           │
//! │  ──────   ─────────────    ───────────────────   ─────────────          │
//! │  id       SERIAL (int4)    id::int8              i64                    │
//! │  title    VARCHAR(128)     title                 String                 │
//! │  artist   VARCHAR(255)     artist                String                 │
//! │  price    DECIMAL(5,2)     price::float8         f64                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Listing rows are decoded one at a time so a single bad row (a NULL
//! price, say) is skipped instead of failing the whole listing.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{debug, warn};

use catalog_core::validation::validate_new_album;
use catalog_core::{Album, AlbumListing, NewAlbum};

use super::{AlbumStore, ALBUM_ENTITY};
use crate::error::{DbError, DbResult};

const SELECT_ALL: &str = r#"
    SELECT id::int8 AS id, title, artist, price::float8 AS price
    FROM album
    ORDER BY id
"#;

// LIMIT 2 is enough to tell "one" from "more than one".
const SELECT_BY_ID: &str = r#"
    SELECT id::int8 AS id, title, artist, price::float8 AS price
    FROM album
    WHERE id = $1
    LIMIT 2
"#;

const INSERT: &str = "INSERT INTO album (title, artist, price) VALUES ($1, $2, $3)";

const INSERT_RETURNING_ID: &str =
    "INSERT INTO album (title, artist, price) VALUES ($1, $2, $3) RETURNING id::int8";

/// Repository for album database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = AlbumRepository::new(pool);
///
/// let listing = repo.fetch_all().await?;
/// let album = repo.fetch_by_id(9).await?;
/// let affected = repo.insert(&NewAlbum::new("Still Bill", "Bill Withers", 56.99)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct AlbumRepository {
    pool: PgPool,
}

impl AlbumRepository {
    /// Creates a new AlbumRepository.
    pub fn new(pool: PgPool) -> Self {
        AlbumRepository { pool }
    }

    /// Counts rows in the album table (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM album")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl AlbumStore for AlbumRepository {
    async fn fetch_all(&self) -> DbResult<AlbumListing> {
        debug!("Fetching all albums");

        let rows = sqlx::query(SELECT_ALL).fetch_all(&self.pool).await?;
        let listing = AlbumListing::from_rows(rows.iter().map(Album::from_row));

        for skipped in &listing.skipped {
            warn!(
                row = skipped.index,
                reason = %skipped.reason,
                "Skipping album row that failed to decode"
            );
        }

        debug!(
            count = listing.len(),
            skipped = listing.skipped.len(),
            "Fetched albums"
        );
        Ok(listing)
    }

    async fn fetch_by_id(&self, id: i64) -> DbResult<Album> {
        debug!(id = %id, "Fetching album");

        let rows = sqlx::query(SELECT_BY_ID)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        match rows.as_slice() {
            [] => Err(DbError::not_found(ALBUM_ENTITY, id)),
            [row] => Ok(Album::from_row(row)?),
            _ => Err(DbError::multiple_rows(ALBUM_ENTITY, id)),
        }
    }

    async fn insert(&self, album: &NewAlbum) -> DbResult<u64> {
        validate_new_album(album)?;

        debug!(title = %album.title, artist = %album.artist, "Inserting album");

        let result = sqlx::query(INSERT)
            .bind(&album.title)
            .bind(&album.artist)
            .bind(album.price)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn create(&self, album: &NewAlbum) -> DbResult<Album> {
        validate_new_album(album)?;

        debug!(title = %album.title, artist = %album.artist, "Creating album");

        let id: i64 = sqlx::query_scalar(INSERT_RETURNING_ID)
            .bind(&album.title)
            .bind(&album.artist)
            .bind(album.price)
            .fetch_one(&self.pool)
            .await?;

        Ok(album.clone().with_id(id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use sqlx::postgres::PgPoolOptions;

    /// A pool that never connects; only usable for paths that fail first.
    fn lazy_repository() -> AlbumRepository {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://catalog@localhost/unused")
            .expect("lazy pool");
        AlbumRepository::new(pool)
    }

    #[tokio::test]
    async fn test_invalid_album_rejected_before_query() {
        let repo = lazy_repository();

        let err = repo
            .insert(&NewAlbum::new("  ", "Mos Def", 32.99))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        let err = repo
            .create(&NewAlbum::new("Still Bill", "Bill Withers", -1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    async fn live_database() -> Database {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for live tests");
        Database::connect(DbConfig::new(url).max_connections(1).ensure_schema(true))
            .await
            .expect("connect to live database")
    }

    // Runs every live check in one test so row counts are not disturbed by
    // other tests inserting in parallel.
    #[tokio::test]
    #[ignore = "requires a PostgreSQL server at DATABASE_URL"]
    async fn test_live_album_repository() {
        let db = live_database().await;
        let repo = db.albums();

        // Listing length equals the row count
        let listing = repo.fetch_all().await.unwrap();
        let count = repo.count().await.unwrap();
        assert_eq!(listing.len() + listing.skipped.len(), count as usize);

        // Insert reports one affected row
        let affected = repo
            .insert(&NewAlbum::new("The Blueprint", "Jay-Z", 24.99))
            .await
            .unwrap();
        assert_eq!(affected, 1);

        // Round trip through the assigned id
        let created = repo.create(&NewAlbum::new("X", "Y", 9.99)).await.unwrap();
        assert!(created.id > 0);

        let fetched = repo.fetch_by_id(created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.title, "X");
        assert_eq!(fetched.artist, "Y");
        assert!((fetched.price - 9.99).abs() < 1e-9);

        // Unknown id
        let err = repo.fetch_by_id(i64::from(i32::MAX)).await.unwrap_err();
        assert!(err.is_not_found());

        db.close().await;
        assert!(db.is_closed());
    }
}
