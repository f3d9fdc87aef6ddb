//! Sequential download of every pathway map of one organism

use crate::kegg::{KeggClient, KeggConfig, Result};
use indicatif::{ProgressBar, ProgressStyle};
use pathgraph_common::types::PathwayDocument;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Download statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DownloadStats {
    /// Pathways listed for the organism (after the limit)
    pub total: usize,
    /// Documents written to disk
    pub saved: usize,
    /// Documents that could not be written
    pub failed: usize,
    /// Saved documents without KGML (fetch failed or over the size limit)
    pub missing_kgml: usize,
}

/// Downloads pathway documents into a directory, one JSON file per map
pub struct PathwayDownloader {
    client: KeggClient,
    limit: Option<usize>,
}

impl PathwayDownloader {
    pub fn new(config: KeggConfig) -> Result<Self> {
        Ok(Self {
            client: KeggClient::new(config)?,
            limit: None,
        })
    }

    /// Only download the first `limit` pathways of the listing
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Download every pathway of the configured organism into `output_dir`.
    ///
    /// A pathway whose KGML or gene list cannot be fetched is still saved
    /// (with `kgml_data: null` or an empty gene list); so is one whose KGML
    /// exceeds `max_kgml_bytes`, without the markup. A file that cannot be
    /// written is counted as failed and the run carries on.
    pub async fn run(&self, output_dir: impl AsRef<Path>) -> Result<DownloadStats> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        let organism = self.client.config().organism_code.clone();
        let max_kgml_bytes = self.client.config().max_kgml_bytes;
        info!(organism = %organism, output = %output_dir.display(), "Starting KEGG pathway download");

        let mut pathways = self.client.list_pathways(&organism).await;
        if let Some(limit) = self.limit {
            pathways.truncate(limit);
        }

        let mut stats = DownloadStats {
            total: pathways.len(),
            ..Default::default()
        };

        if pathways.is_empty() {
            warn!(organism = %organism, "No pathways found");
            return Ok(stats);
        }

        info!(organism = %organism, count = pathways.len(), "Found pathways");
        let progress = progress_bar(pathways.len() as u64);

        for meta in &pathways {
            progress.set_message(meta.pathway_id.clone());

            let mut document = PathwayDocument::from_metadata(meta);
            document.kgml_raw = match self.client.pathway_kgml(&meta.pathway_id).await {
                Some(kgml) if kgml.len() > max_kgml_bytes => {
                    warn!(
                        pathway_id = %meta.pathway_id,
                        bytes = kgml.len(),
                        limit = max_kgml_bytes,
                        "KGML exceeds size limit, not stored"
                    );
                    None
                },
                Some(kgml) => Some(kgml),
                None => {
                    warn!(pathway_id = %meta.pathway_id, "KGML download failed");
                    None
                },
            };
            document.genes = self.client.pathway_genes(&meta.pathway_id).await;

            let path = document_path(output_dir, &meta.pathway_id);
            match write_document(&path, &document) {
                Ok(()) => {
                    stats.saved += 1;
                    if document.kgml_raw.is_none() {
                        stats.missing_kgml += 1;
                    }
                    info!(
                        pathway_id = %meta.pathway_id,
                        genes = document.genes.len(),
                        path = %path.display(),
                        "Saved pathway document"
                    );
                },
                Err(e) => {
                    stats.failed += 1;
                    warn!(pathway_id = %meta.pathway_id, path = %path.display(), error = %e, "Failed to save pathway document");
                },
            }

            progress.inc(1);
        }

        progress.finish_with_message("done");

        info!(
            total = stats.total,
            saved = stats.saved,
            failed = stats.failed,
            missing_kgml = stats.missing_kgml,
            "KEGG pathway download complete"
        );

        Ok(stats)
    }
}

/// `<output_dir>/<pathway_id>.json`
pub fn document_path(output_dir: &Path, pathway_id: &str) -> PathBuf {
    output_dir.join(format!("{}.json", pathway_id))
}

fn write_document(path: &Path, document: &PathwayDocument) -> Result<()> {
    let json = serde_json::to_string_pretty(document)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}
