//! Error type for database persistence

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
