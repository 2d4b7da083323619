//! Error types for record construction and external validation

use thiserror::Error;

use crate::order::OrderError;
use crate::records::RecordError;
use crate::table::TableError;

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Crate-level errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Order validation failed: {0}")]
    Order(#[from] OrderError),

    #[error("Table validation failed: {0}")]
    Table(#[from] TableError),

    #[error("Invalid record: {0}")]
    Record(#[from] RecordError),
}
