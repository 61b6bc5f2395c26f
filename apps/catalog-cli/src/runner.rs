//! # Catalog Run
//!
//! The one-shot sequence, generic over [`AlbumStore`] so it runs the same
//! way against PostgreSQL and against [`catalog_db::MemoryAlbumStore`].
//!
//! ```text
//! fetch_all ──► print listing        (failure: reported, run continues)
//!     │
//!     ▼
//! fetch_by_id(featured) ──► print    (failure: AppError::FetchAlbum)
//!     │
//!     ▼
//! insert × N ──► print each outcome  (failure: reported, next insert runs)
//! ```

use std::fmt;
use std::io::Write;

use catalog_core::Album;
use catalog_db::{AlbumStore, DbResult};
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::plan::RunPlan;

/// Result of one insert attempt.
#[derive(Debug)]
pub struct InsertOutcome {
    pub title: String,
    pub result: DbResult<u64>,
}

impl InsertOutcome {
    /// Rows affected; zero when the insert failed.
    pub fn affected(&self) -> u64 {
        match self.result {
            Ok(rows) => rows,
            Err(_) => 0,
        }
    }
}

impl fmt::Display for InsertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(rows) => write!(f, "Inserted \"{}\": {} row(s) affected", self.title, rows),
            Err(e) => write!(
                f,
                "Inserted \"{}\": 0 row(s) affected, error: {}",
                self.title, e
            ),
        }
    }
}

/// Everything a completed run observed.
#[derive(Debug)]
pub struct RunReport {
    /// Albums listed, or `None` when the listing query failed.
    pub listed: Option<usize>,

    /// Rows dropped from the listing because they did not decode.
    pub skipped: usize,

    /// The album fetched by id.
    pub featured: Album,

    /// One outcome per attempted insert, in plan order.
    pub inserts: Vec<InsertOutcome>,
}

impl RunReport {
    /// Total rows inserted.
    pub fn inserted(&self) -> u64 {
        self.inserts.iter().map(InsertOutcome::affected).sum()
    }

    /// Number of inserts that returned an error.
    pub fn failed_inserts(&self) -> usize {
        self.inserts.iter().filter(|o| o.result.is_err()).count()
    }
}

/// Runs the catalog sequence against `store`.
///
/// Human-readable results go to `out`; non-fatal diagnostics go to `err`.
/// Only a failed featured-album fetch (or a failed write to `out`/`err`)
/// ends the run early.
pub async fn run<S, O, E>(
    store: &S,
    plan: &RunPlan,
    out: &mut O,
    err: &mut E,
) -> Result<RunReport, AppError>
where
    S: AlbumStore + ?Sized,
    O: Write,
    E: Write,
{
    info!("Listing albums");

    let (listed, skipped) = match store.fetch_all().await {
        Ok(listing) => {
            writeln!(out, "Albums ({}):", listing.len())?;
            for album in &listing.albums {
                writeln!(out, "  {album}")?;
            }
            if !listing.is_complete() {
                writeln!(
                    out,
                    "  ({} row(s) skipped: could not be decoded)",
                    listing.skipped.len()
                )?;
            }
            (Some(listing.len()), listing.skipped.len())
        }
        Err(e) => {
            error!(error = %e, "Listing albums failed");
            writeln!(err, "Listing albums failed: {e}")?;
            (None, 0)
        }
    };

    info!(id = plan.featured_id, "Fetching featured album");

    let featured = store
        .fetch_by_id(plan.featured_id)
        .await
        .map_err(|source| AppError::FetchAlbum {
            id: plan.featured_id,
            source,
        })?;
    writeln!(out, "Album {}: {featured}", plan.featured_id)?;

    info!(count = plan.albums.len(), "Inserting albums");

    let mut inserts = Vec::with_capacity(plan.albums.len());
    for album in &plan.albums {
        let result = store.insert(album).await;
        if let Err(e) = &result {
            warn!(title = %album.title, error = %e, "Insert failed");
        }

        let outcome = InsertOutcome {
            title: album.title.clone(),
            result,
        };
        writeln!(out, "{outcome}")?;
        inserts.push(outcome);
    }

    let report = RunReport {
        listed,
        skipped,
        featured,
        inserts,
    };

    info!(
        inserted = report.inserted(),
        failed = report.failed_inserts(),
        "Catalog run complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog_core::{AlbumListing, NewAlbum};
    use catalog_db::{DbError, MemoryAlbumStore};

    fn featured_album() -> Album {
        NewAlbum::new("Capital Punishment", "Big Pun", 19.99).with_id(9)
    }

    async fn run_to_strings<S: AlbumStore>(
        store: &S,
        plan: &RunPlan,
    ) -> (Result<RunReport, AppError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = run(store, plan, &mut out, &mut err).await;
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_default_plan_inserts_every_album_once() {
        let store = MemoryAlbumStore::new();
        store.seed_row(featured_album()).await;

        let (result, out, err) = run_to_strings(&store, &RunPlan::default()).await;
        let report = result.unwrap();

        assert_eq!(report.listed, Some(1));
        assert_eq!(report.featured, featured_album());
        assert_eq!(report.inserts.len(), 6);
        assert!(report.inserts.iter().all(|o| matches!(o.result, Ok(1))));
        assert_eq!(report.inserted(), 6);
        assert_eq!(store.len().await, 7);

        assert!(out.starts_with("Albums (1):\n"));
        assert!(out.contains("Album 9: #9 \"Capital Punishment\" by Big Pun ($19.99)"));
        assert!(out.contains("Inserted \"Still Bill\": 1 row(s) affected"));
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_failed_insert_does_not_stop_later_inserts() {
        let store = MemoryAlbumStore::new().with_unique_titles();
        store.seed_row(featured_album()).await;

        let (result, out, _) = run_to_strings(&store, &RunPlan::default()).await;
        let report = result.unwrap();

        // "Capital Punishment" is already stored
        assert_eq!(report.failed_inserts(), 1);
        assert!(matches!(
            report.inserts[2].result,
            Err(DbError::UniqueViolation { .. })
        ));
        assert_eq!(report.inserts[2].affected(), 0);
        for i in [0, 1, 3, 4, 5] {
            assert!(matches!(report.inserts[i].result, Ok(1)));
        }
        assert_eq!(report.inserted(), 5);
        assert!(out.contains("Inserted \"Capital Punishment\": 0 row(s) affected, error:"));
        assert!(out.contains("Inserted \"The Blueprint\": 1 row(s) affected"));
    }

    #[tokio::test]
    async fn test_missing_featured_album_is_fatal() {
        let store = MemoryAlbumStore::new();

        let (result, out, _) = run_to_strings(&store, &RunPlan::default()).await;

        match result {
            Err(AppError::FetchAlbum { id, source }) => {
                assert_eq!(id, 9);
                assert!(source.is_not_found());
            }
            other => panic!("expected FetchAlbum error, got {other:?}"),
        }
        // Nothing inserted after the fatal lookup
        assert!(store.is_empty().await);
        assert!(!out.contains("Inserted"));
    }

    #[tokio::test]
    async fn test_malformed_row_is_skipped() {
        let store = MemoryAlbumStore::new();
        store.seed(NewAlbum::new("Still Bill", "Bill Withers", 56.99)).await;
        store.seed_malformed("price is NULL").await;
        store.seed_row(featured_album()).await;

        let (result, out, _) = run_to_strings(&store, &RunPlan::default()).await;
        let report = result.unwrap();

        assert_eq!(report.listed, Some(2));
        assert_eq!(report.skipped, 1);
        assert!(out.contains("(1 row(s) skipped: could not be decoded)"));
    }

    #[tokio::test]
    async fn test_custom_plan() {
        let store = MemoryAlbumStore::new();
        let existing = store.seed(NewAlbum::new("X", "Y", 9.99)).await;
        let plan = RunPlan {
            featured_id: existing.id,
            albums: vec![NewAlbum::new("", "Nobody", 1.0)],
        };

        let (result, _, _) = run_to_strings(&store, &plan).await;
        let report = result.unwrap();

        assert_eq!(report.featured, existing);
        assert!(matches!(
            report.inserts[0].result,
            Err(DbError::Validation(_))
        ));
    }

    /// Delegates to a memory store but fails every listing.
    struct ListingFails(MemoryAlbumStore);

    #[async_trait]
    impl AlbumStore for ListingFails {
        async fn fetch_all(&self) -> DbResult<AlbumListing> {
            Err(DbError::QueryFailed("relation \"album\" is locked".to_string()))
        }

        async fn fetch_by_id(&self, id: i64) -> DbResult<Album> {
            self.0.fetch_by_id(id).await
        }

        async fn insert(&self, album: &NewAlbum) -> DbResult<u64> {
            self.0.insert(album).await
        }

        async fn create(&self, album: &NewAlbum) -> DbResult<Album> {
            self.0.create(album).await
        }
    }

    #[tokio::test]
    async fn test_listing_failure_is_reported_and_run_continues() {
        let memory = MemoryAlbumStore::new();
        memory.seed_row(featured_album()).await;
        let store = ListingFails(memory);

        let (result, out, err) = run_to_strings(&store, &RunPlan::default()).await;
        let report = result.unwrap();

        assert_eq!(report.listed, None);
        assert_eq!(report.inserted(), 6);
        assert!(err.starts_with("Listing albums failed: Query failed:"));
        assert!(!out.contains("Albums ("));
    }
}
