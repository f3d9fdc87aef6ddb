//! Error types for pathgraph

use thiserror::Error;

/// Result type alias for pathgraph operations
pub type Result<T> = std::result::Result<T, PathgraphError>;

/// Main error type for pathgraph
#[derive(Error, Debug)]
pub enum PathgraphError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pathway document: {0}")]
    InvalidDocument(String),
}
