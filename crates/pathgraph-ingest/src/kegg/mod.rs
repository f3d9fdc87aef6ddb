// KEGG Ingestion Module
//
// Downloads pathway maps for one organism from the KEGG REST API
// (https://www.kegg.jp/kegg/rest/keggapi.html) and stores each map as a
// JSON pathway document carrying its raw KGML.
//
// - config: endpoints, pacing and retry settings
// - client: HTTP client with paced, multiplicative-backoff retries
// - download: sequential per-organism download pipeline
//
// Endpoints used:
// - list/pathway/<org>      tab-separated pathway listing
// - get/<pathway_id>/kgml   KGML markup
// - get/<pathway_id>/genes  gene listing (400 when not applicable)

pub mod client;
pub mod config;
pub mod download;

pub use client::{parse_gene_list, parse_pathway_list, FetchPolicy, KeggClient};
pub use config::KeggConfig;
pub use download::{DownloadStats, PathwayDownloader};

/// Result type for KEGG operations
pub type Result<T> = std::result::Result<T, KeggError>;

/// Error types for KEGG ingestion
#[derive(Debug, thiserror::Error)]
pub enum KeggError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}
