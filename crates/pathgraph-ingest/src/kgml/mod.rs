// KGML (KEGG Markup Language) Module
//
// Converts KEGG pathway diagrams into node/edge graphs for rendering.
//
// - document: conforming XML parse (roxmltree) into a typed raw model
// - extractor: raw model -> GraphNode/GraphEdge lists, wrapped in ParseResult
//
// Reference: https://www.kegg.jp/kegg/xml/docs/

pub mod document;
pub mod extractor;

pub use document::{
    KgmlDocument, PathwayHeader, RawEntry, RawGraphics, RawRelation, RawSubtype,
};
pub use extractor::{build_graph, parse_kgml_to_graph, BuiltGraph, GraphExtractor};

/// Reasons an extraction fails as a whole
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KgmlError {
    #[error("no data provided for {0}")]
    Empty(String),

    #[error("parse failure: {0}")]
    Malformed(String),

    #[error("markup for {pathway_id} exceeds {limit} bytes")]
    TooLarge { pathway_id: String, limit: usize },
}
