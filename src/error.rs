//! Error types for engine operations.

use crate::storage::StoreError;
use crate::types::{BookId, NodeId};
use thiserror::Error;

/// Errors surfaced by the canvas engine and the durability subsystem
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage operation failed; not retried
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Backup document failed validation
    #[error("invalid backup: {0}")]
    InvalidBackup(String),

    #[error("unknown book: {0}")]
    UnknownBook(BookId),

    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// A canvas operation was requested while no book is open
    #[error("no book is open")]
    NoOpenBook,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for engine operations
pub type CoreResult<T> = Result<T, CoreError>;
