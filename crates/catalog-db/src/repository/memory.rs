//! # In-Memory Album Store
//!
//! An [`AlbumStore`] backed by a `Vec`, used to exercise the catalog run
//! without a PostgreSQL server.
//!
//! Besides well-formed albums it can hold rows that fail to decode, enforce
//! a unique-title constraint, and go offline, so the failure paths of the
//! run can be driven deterministically.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use catalog_core::validation::validate_new_album;
use catalog_core::{Album, AlbumListing, NewAlbum};

use super::{AlbumStore, ALBUM_ENTITY};
use crate::error::{DbError, DbResult};

/// Constraint name reported for duplicate titles.
pub const UNIQUE_TITLE_CONSTRAINT: &str = "album_title_key";

#[derive(Debug, Clone)]
enum StoredRow {
    Valid(Album),
    Malformed { id: i64, reason: String },
}

impl StoredRow {
    fn id(&self) -> i64 {
        match self {
            StoredRow::Valid(album) => album.id,
            StoredRow::Malformed { id, .. } => *id,
        }
    }

    fn decode(&self) -> Result<Album, DbError> {
        match self {
            StoredRow::Valid(album) => Ok(album.clone()),
            StoredRow::Malformed { reason, .. } => Err(DbError::Decode(reason.clone())),
        }
    }
}

#[derive(Debug)]
struct State {
    rows: Vec<StoredRow>,
    next_id: i64,
    unique_titles: bool,
    offline: bool,
}

impl State {
    fn ensure_online(&self) -> DbResult<()> {
        if self.offline {
            return Err(DbError::ConnectionFailed("store is offline".to_string()));
        }
        Ok(())
    }

    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn insert(&mut self, album: &NewAlbum) -> DbResult<Album> {
        self.ensure_online()?;
        validate_new_album(album)?;

        if self.unique_titles {
            let taken = self.rows.iter().any(|row| {
                matches!(row, StoredRow::Valid(existing) if existing.title == album.title)
            });
            if taken {
                return Err(DbError::UniqueViolation {
                    constraint: UNIQUE_TITLE_CONSTRAINT.to_string(),
                    message: format!(
                        "duplicate key value violates unique constraint \"{}\"",
                        UNIQUE_TITLE_CONSTRAINT
                    ),
                });
            }
        }

        let id = self.allocate_id();
        let stored = album.clone().with_id(id);
        self.rows.push(StoredRow::Valid(stored.clone()));
        Ok(stored)
    }
}

/// In-memory album store.
///
/// ## Usage
/// ```rust
/// use catalog_core::NewAlbum;
/// use catalog_db::{AlbumStore, MemoryAlbumStore};
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// rt.block_on(async {
///     let store = MemoryAlbumStore::new();
///     let affected = store.insert(&NewAlbum::new("Still Bill", "Bill Withers", 56.99)).await;
///     assert_eq!(affected.unwrap(), 1);
/// });
/// ```
#[derive(Debug)]
pub struct MemoryAlbumStore {
    state: Mutex<State>,
}

impl Default for MemoryAlbumStore {
    fn default() -> Self {
        MemoryAlbumStore::new()
    }
}

impl MemoryAlbumStore {
    /// Creates an empty store; the first assigned id is 1.
    pub fn new() -> Self {
        MemoryAlbumStore {
            state: Mutex::new(State {
                rows: Vec::new(),
                next_id: 1,
                unique_titles: false,
                offline: false,
            }),
        }
    }

    /// Rejects inserts whose title is already stored.
    pub fn with_unique_titles(mut self) -> Self {
        self.state.get_mut().unique_titles = true;
        self
    }

    /// Stores an album as existing data, skipping validation and constraints.
    pub async fn seed(&self, album: NewAlbum) -> Album {
        let mut state = self.state.lock().await;
        let id = state.allocate_id();
        let stored = album.with_id(id);
        state.rows.push(StoredRow::Valid(stored.clone()));
        stored
    }

    /// Stores a row verbatim, keeping its id even if that id is taken.
    pub async fn seed_row(&self, album: Album) {
        let mut state = self.state.lock().await;
        state.next_id = state.next_id.max(album.id + 1);
        state.rows.push(StoredRow::Valid(album));
    }

    /// Stores a row that fails to decode with the given reason.
    ///
    /// Returns the id the row occupies.
    pub async fn seed_malformed(&self, reason: impl Into<String>) -> i64 {
        let mut state = self.state.lock().await;
        let id = state.allocate_id();
        state.rows.push(StoredRow::Malformed {
            id,
            reason: reason.into(),
        });
        id
    }

    /// Makes every operation fail with a connection error while set.
    pub async fn set_offline(&self, offline: bool) {
        self.state.lock().await.offline = offline;
    }

    /// Number of stored rows, malformed ones included.
    pub async fn len(&self) -> usize {
        self.state.lock().await.rows.len()
    }

    /// True if no row is stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AlbumStore for MemoryAlbumStore {
    async fn fetch_all(&self) -> DbResult<AlbumListing> {
        let state = self.state.lock().await;
        state.ensure_online()?;

        let listing = AlbumListing::from_rows(state.rows.iter().map(StoredRow::decode));
        for skipped in &listing.skipped {
            warn!(
                row = skipped.index,
                reason = %skipped.reason,
                "Skipping album row that failed to decode"
            );
        }

        Ok(listing)
    }

    async fn fetch_by_id(&self, id: i64) -> DbResult<Album> {
        let state = self.state.lock().await;
        state.ensure_online()?;

        let mut hits = state.rows.iter().filter(|row| row.id() == id);
        match (hits.next(), hits.next()) {
            (None, _) => Err(DbError::not_found(ALBUM_ENTITY, id)),
            (Some(row), None) => row.decode(),
            (Some(_), Some(_)) => Err(DbError::multiple_rows(ALBUM_ENTITY, id)),
        }
    }

    async fn insert(&self, album: &NewAlbum) -> DbResult<u64> {
        self.state.lock().await.insert(album)?;
        Ok(1)
    }

    async fn create(&self, album: &NewAlbum) -> DbResult<Album> {
        self.state.lock().await.insert(album)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_reports_one_row() {
        let store = MemoryAlbumStore::new();

        let affected = store
            .insert(&NewAlbum::new("Capital Punishment", "Big Pun", 19.99))
            .await
            .unwrap();

        assert_eq!(affected, 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_then_fetch_round_trip() {
        let store = MemoryAlbumStore::new();
        store.seed(NewAlbum::new("Existing", "Someone", 1.0)).await;

        let created = store.create(&NewAlbum::new("X", "Y", 9.99)).await.unwrap();
        assert_eq!(created.id, 2);

        let fetched = store.fetch_by_id(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_fetch_missing_id_is_not_found() {
        let store = MemoryAlbumStore::new();

        let err = store.fetch_by_id(9).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_fetch_duplicate_id_is_multiple_rows() {
        let store = MemoryAlbumStore::new();
        store.seed_row(NewAlbum::new("A", "a", 1.0).with_id(4)).await;
        store.seed_row(NewAlbum::new("B", "b", 2.0).with_id(4)).await;

        let err = store.fetch_by_id(4).await.unwrap_err();
        assert!(matches!(err, DbError::MultipleRows { .. }));

        // Ids keep increasing past seeded rows
        let created = store.create(&NewAlbum::new("C", "c", 3.0)).await.unwrap();
        assert_eq!(created.id, 5);
    }

    #[tokio::test]
    async fn test_malformed_row_skipped_in_listing_but_fails_lookup() {
        let store = MemoryAlbumStore::new();
        store.seed(NewAlbum::new("A", "a", 1.0)).await;
        let bad = store.seed_malformed("price is NULL").await;
        store.seed(NewAlbum::new("C", "c", 3.0)).await;

        let listing = store.fetch_all().await.unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing.skipped.len(), 1);
        assert_eq!(listing.skipped[0].index, 1);

        let err = store.fetch_by_id(bad).await.unwrap_err();
        assert!(matches!(err, DbError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unique_titles() {
        let store = MemoryAlbumStore::new().with_unique_titles();
        let album = NewAlbum::new("Still Bill", "Bill Withers", 56.99);

        assert_eq!(store.insert(&album).await.unwrap(), 1);

        let err = store.insert(&album).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_offline_store_fails_every_operation() {
        let store = MemoryAlbumStore::new();
        store.set_offline(true).await;

        assert!(matches!(
            store.fetch_all().await,
            Err(DbError::ConnectionFailed(_))
        ));
        assert!(store
            .insert(&NewAlbum::new("A", "a", 1.0))
            .await
            .is_err());

        store.set_offline(false).await;
        assert!(store.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listing_count_matches_rows() {
        let store = MemoryAlbumStore::new();
        for i in 0..4 {
            store
                .insert(&NewAlbum::new(format!("Album {i}"), "Artist", 10.0))
                .await
                .unwrap();
        }

        assert_eq!(store.fetch_all().await.unwrap().len(), 4);
        assert_eq!(store.fetch_all().await.unwrap().len(), 4);
    }
}
