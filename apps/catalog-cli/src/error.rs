//! Error types for the catalog program.

use catalog_db::DbError;

use crate::config::ConfigError;

/// Failures that end a catalog run.
///
/// Everything else (undecodable rows, a failed listing, failed inserts) is
/// reported in the run output and does not surface here.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unable to connect to database: {0}")]
    Connect(#[source] DbError),

    #[error("Fetching album {id} failed: {source}")]
    FetchAlbum {
        id: i64,
        #[source]
        source: DbError,
    },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl AppError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = AppError::Connect(DbError::ConnectionFailed("refused".to_string()));
        assert_eq!(
            err.to_string(),
            "Unable to connect to database: Connection failed: refused"
        );

        let err = AppError::FetchAlbum {
            id: 9,
            source: DbError::not_found("album", 9),
        };
        assert_eq!(err.to_string(), "Fetching album 9 failed: album not found: 9");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_missing_database_url_is_configuration_error() {
        let err = AppError::from(ConfigError::MissingRequired("DATABASE_URL".to_string()));
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required configuration: DATABASE_URL"
        );
        assert_eq!(err.exit_code(), 1);
    }
}
