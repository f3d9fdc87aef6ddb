//! pathgraph Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging, and error handling for the pathgraph workspace.
//!
//! # Overview
//!
//! - **Types**: pathway graph nodes/edges, extraction results and stored
//!   pathway records
//! - **Error Handling**: workspace error type and result alias
//! - **Logging**: `tracing` subscriber setup shared by all binaries
//!
//! # Example
//!
//! ```no_run
//! use pathgraph_common::types::PathwayDocument;
//! use pathgraph_common::Result;
//!
//! fn pathway_name(path: &str) -> Result<Option<String>> {
//!     let doc = PathwayDocument::from_json_file(path)?;
//!     Ok(doc.name)
//! }
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{PathgraphError, Result};
pub use types::{GraphEdge, GraphNode, ParseResult, PathwayDocument, PathwayMetadata};
