//! # catalog-cli
//!
//! One-shot album catalog program: list every album, fetch the featured
//! album, insert the literal albums, then release the pool.
//!
//! The binary in `main.rs` only wires configuration, the database and the
//! console together; the sequence itself is [`run`], which takes any
//! [`catalog_db::AlbumStore`].

pub mod config;
pub mod error;
pub mod plan;
pub mod runner;

pub use config::{AppConfig, ConfigError};
pub use error::AppError;
pub use plan::{literal_albums, RunPlan, FEATURED_ALBUM_ID};
pub use runner::{run, InsertOutcome, RunReport};
