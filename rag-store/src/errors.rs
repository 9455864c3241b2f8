//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for rag-store operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The store could not be reached (client build or health probe failed).
    #[error("connection error: {0}")]
    Connection(String),

    /// Qdrant client errors while querying (wrapped).
    #[error("qdrant error: {0}")]
    Qdrant(String),

    /// The store handle was closed at shutdown; no new connections are handed out.
    #[error("document store is closed")]
    Closed,
}
