//! Pathway graph assembly
//!
//! Combines a stored [`PathwayDocument`] with the graph extracted from its
//! KGML into the payload a viewer renders.

use crate::kgml::GraphExtractor;
use pathgraph_common::types::{GraphEdge, GraphNode, PathwayDocument};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const UNKNOWN_PATHWAY_NAME: &str = "Unknown pathway";
const UNKNOWN_ORGANISM: &str = "N/A";

/// Result type for pathway graph assembly
pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("KGML data not found in pathway document '{0}'")]
    MissingKgml(String),

    #[error("Failed to extract graph for '{pathway_id}': {message}")]
    Extraction { pathway_id: String, message: String },
}

/// Pathway metadata plus its rendered graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayGraph {
    #[serde(rename = "pathwayId")]
    pub pathway_id: String,

    pub name: String,

    #[serde(rename = "pathwayName")]
    pub pathway_name: String,

    pub organism_code: String,

    pub image_url: Option<String>,

    pub nodes: Vec<GraphNode>,

    pub edges: Vec<GraphEdge>,
}

/// Build the graph payload for one stored pathway.
///
/// Missing metadata falls back to placeholders; missing or unparsable KGML
/// is an error because there is nothing to draw.
pub fn build_pathway_graph(
    document: &PathwayDocument,
    extractor: &GraphExtractor,
) -> Result<PathwayGraph> {
    let kgml = match document.kgml_raw.as_deref() {
        Some(kgml) if !kgml.trim().is_empty() => kgml,
        _ => {
            warn!(pathway_id = %document.id, "Pathway document has no KGML");
            return Err(GraphError::MissingKgml(document.id.clone()));
        },
    };

    let parsed = extractor.extract(kgml, &document.id);
    if let Some(message) = parsed.error {
        return Err(GraphError::Extraction {
            pathway_id: document.id.clone(),
            message,
        });
    }

    let name = document
        .name
        .clone()
        .unwrap_or_else(|| UNKNOWN_PATHWAY_NAME.to_string());
    let pathway_name = document.pathway_name.clone().unwrap_or_else(|| name.clone());

    info!(
        pathway_id = %document.id,
        nodes = parsed.nodes.len(),
        edges = parsed.edges.len(),
        "Built pathway graph"
    );

    Ok(PathwayGraph {
        pathway_id: document.id.clone(),
        name,
        pathway_name,
        organism_code: document
            .organism_code
            .clone()
            .unwrap_or_else(|| UNKNOWN_ORGANISM.to_string()),
        image_url: document.image_url.clone(),
        nodes: parsed.nodes,
        edges: parsed.edges,
    })
}
