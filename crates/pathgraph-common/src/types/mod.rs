//! Common types used across pathgraph

use crate::error::{PathgraphError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Graph Types
// ============================================================================

/// A node of a pathway graph, derived from one KGML `entry` element.
///
/// `id` is the external cross reference (gene, compound or pathway
/// accession), never the document-local entry number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// External accession, e.g. "BC5335" or "C00031"
    pub id: String,

    /// Display label
    pub label: String,

    /// Entry type ("gene", "compound", "map", ...), "unknown" when absent
    #[serde(rename = "type")]
    pub kind: String,

    /// Horizontal diagram coordinate
    pub x: Option<i64>,

    /// Vertical diagram coordinate
    pub y: Option<i64>,
}

/// A directed edge of a pathway graph, derived from one KGML `relation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Id of the source [`GraphNode`]
    pub source: String,

    /// Id of the target [`GraphNode`]
    pub target: String,

    /// Relation subtypes joined with ", " (empty when there are none)
    pub label: String,
}

/// Outcome of extracting a graph from KGML markup.
///
/// Never partially valid: when `error` is set both collections are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub error: Option<String>,
}

impl ParseResult {
    /// Successful extraction
    pub fn success(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self {
            nodes,
            edges,
            error: None,
        }
    }

    /// Failed extraction, with empty collections
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

// ============================================================================
// Pathway Records
// ============================================================================

/// A stored pathway record as written by the downloader.
///
/// # Examples
///
/// ```rust,ignore
/// use pathgraph_common::types::PathwayDocument;
///
/// let doc = PathwayDocument::from_json_file("data/bce00010.json")?;
/// assert_eq!(doc.id, "bce00010");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayDocument {
    /// Pathway map id (e.g., "bce00010")
    #[serde(rename = "_id")]
    pub id: String,

    /// Pathway name as listed by KEGG
    #[serde(default)]
    pub name: Option<String>,

    /// Alternative display name, when the store carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathway_name: Option<String>,

    /// KEGG organism code (e.g., "bce")
    #[serde(default)]
    pub organism_code: Option<String>,

    /// URL of the rendered pathway map
    #[serde(default)]
    pub image_url: Option<String>,

    /// Raw KGML markup; `None` when the download failed
    #[serde(rename = "kgml_data", default)]
    pub kgml_raw: Option<String>,

    /// KEGG gene ids linked to the pathway
    #[serde(rename = "kegg_genes_in_pathway", default)]
    pub genes: Vec<String>,
}

impl PathwayDocument {
    /// Create a document from listing metadata, without KGML or genes
    pub fn from_metadata(meta: &PathwayMetadata) -> Self {
        Self {
            id: meta.pathway_id.clone(),
            name: Some(meta.name.clone()),
            pathway_name: None,
            organism_code: Some(meta.organism_code.clone()),
            image_url: Some(meta.image_url.clone()),
            kgml_raw: None,
            genes: Vec::new(),
        }
    }

    /// Load a document from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| PathgraphError::InvalidDocument(format!("{}: {}", path.display(), e)))
    }

    /// Whether the record carries non-blank KGML
    pub fn has_kgml(&self) -> bool {
        self.kgml_raw
            .as_deref()
            .is_some_and(|kgml| !kgml.trim().is_empty())
    }
}

/// One line of a KEGG `list/pathway/<org>` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayMetadata {
    /// Pathway id without the "path:" prefix (e.g., "bce00010")
    pub pathway_id: String,

    /// Pathway name
    pub name: String,

    /// KEGG organism code
    pub organism_code: String,

    /// URL of the rendered pathway map
    pub image_url: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_node_serializes_kind_as_type() {
        let node = GraphNode {
            id: "C00031".to_string(),
            label: "D-Glucose".to_string(),
            kind: "compound".to_string(),
            x: Some(120),
            y: None,
        };

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "compound");
        assert_eq!(json["x"], 120);
        assert!(json["y"].is_null());
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_failure_has_empty_collections() {
        let result = ParseResult::failure("boom");
        assert!(!result.is_ok());
        assert!(result.nodes.is_empty());
        assert!(result.edges.is_empty());
        assert_eq!(result.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_document_field_names() {
        let json = r#"{
            "_id": "bce00010",
            "name": "Glycolysis / Gluconeogenesis - Bacillus cereus ATCC 14579",
            "organism_code": "bce",
            "image_url": "http://www.kegg.jp/kegg/pathway/bce/bce00010.png",
            "kgml_data": "<pathway/>",
            "kegg_genes_in_pathway": ["bce:BC5335"]
        }"#;

        let doc: PathwayDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.id, "bce00010");
        assert_eq!(doc.organism_code.as_deref(), Some("bce"));
        assert_eq!(doc.kgml_raw.as_deref(), Some("<pathway/>"));
        assert_eq!(doc.genes, vec!["bce:BC5335".to_string()]);
        assert!(doc.has_kgml());
    }

    #[test]
    fn test_document_tolerates_null_kgml() {
        let json = r#"{"_id": "bce01100", "kgml_data": null}"#;
        let doc: PathwayDocument = serde_json::from_str(json).unwrap();
        assert!(doc.kgml_raw.is_none());
        assert!(doc.genes.is_empty());
        assert!(!doc.has_kgml());
    }

    #[test]
    fn test_from_metadata() {
        let meta = PathwayMetadata {
            pathway_id: "bce00020".to_string(),
            name: "Citrate cycle (TCA cycle)".to_string(),
            organism_code: "bce".to_string(),
            image_url: "http://www.kegg.jp/kegg/pathway/bce/bce00020.png".to_string(),
        };

        let doc = PathwayDocument::from_metadata(&meta);
        assert_eq!(doc.id, "bce00020");
        assert_eq!(doc.name.as_deref(), Some("Citrate cycle (TCA cycle)"));
        assert!(doc.kgml_raw.is_none());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bce00010.json");
        std::fs::write(&path, r#"{"_id": "bce00010", "name": "Glycolysis"}"#).unwrap();

        let doc = PathwayDocument::from_json_file(&path).unwrap();
        assert_eq!(doc.id, "bce00010");
        assert_eq!(doc.name.as_deref(), Some("Glycolysis"));
    }

    #[test]
    fn test_from_json_file_rejects_missing_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"{"name": "Glycolysis"}"#).unwrap();

        let err = PathwayDocument::from_json_file(&path).unwrap_err();
        assert!(matches!(err, PathgraphError::InvalidDocument(_)));
    }
}
