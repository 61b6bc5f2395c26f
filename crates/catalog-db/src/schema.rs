//! # Album Schema
//!
//! Reference DDL for the `album` table the catalog reads and writes.
//!
//! The program expects this table to exist already. [`ensure_album_table`]
//! creates it on an empty development database and is what the live
//! integration tests run first; it never alters an existing table.
//!
//! ```text
//! album
//! ├── id      SERIAL         PRIMARY KEY   (assigned by the store)
//! ├── title   VARCHAR(128)   NOT NULL
//! ├── artist  VARCHAR(255)   NOT NULL
//! └── price   DECIMAL(5,2)   NOT NULL
//! ```

use sqlx::PgPool;
use tracing::info;

use crate::error::DbResult;

/// `CREATE TABLE` statement for the album table.
pub const ALBUM_TABLE_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS album (
    id      SERIAL PRIMARY KEY,
    title   VARCHAR(128) NOT NULL,
    artist  VARCHAR(255) NOT NULL,
    price   DECIMAL(5,2) NOT NULL
)
"#;

/// Creates the `album` table if it is missing.
pub async fn ensure_album_table(pool: &PgPool) -> DbResult<()> {
    sqlx::query(ALBUM_TABLE_DDL).execute(pool).await?;

    info!("Album table is present");
    Ok(())
}
