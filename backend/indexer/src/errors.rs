//! Error type shared by the poll loop, the database layer, and the API.
//!
//! Everything funnels into one enum so handlers can `?` across layer
//! boundaries; the API serialises the `Display` form into its error body.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("rpc transport: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration: {0}")]
    Config(String),

    #[error("event decoding: {0}")]
    EventParse(String),
}

pub type Result<T> = std::result::Result<T, IndexerError>;
