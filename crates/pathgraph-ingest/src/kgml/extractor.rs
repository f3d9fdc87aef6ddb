//! KGML → pathway graph
//!
//! Entries become nodes keyed by their external accession, relations become
//! edges between those accessions. Irregular elements (missing attributes,
//! unresolvable relation endpoints, unparsable coordinates) are dropped
//! silently; only empty or malformed markup fails the whole extraction.

use super::document::{KgmlDocument, RawEntry, RawGraphics, RawRelation};
use super::KgmlError;
use pathgraph_common::types::{GraphEdge, GraphNode, ParseResult};
use std::collections::HashMap;
use tracing::debug;

/// Entry type used when an entry carries no `type` attribute
pub const UNKNOWN_KIND: &str = "unknown";

/// Placeholder KEGG uses for entries whose label was truncated
const ELLIPSIS_LABEL: &str = "...";

/// Extract a graph from KGML markup without a size bound.
///
/// `pathway_id` only appears in error messages.
pub fn parse_kgml_to_graph(kgml_markup: &str, pathway_id: &str) -> ParseResult {
    GraphExtractor::new().extract(kgml_markup, pathway_id)
}

/// Graph extraction with an optional bound on the markup size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphExtractor {
    max_markup_bytes: Option<usize>,
}

impl GraphExtractor {
    /// Unbounded extractor
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractor rejecting markup longer than `limit` bytes
    pub fn with_max_markup_bytes(limit: usize) -> Self {
        Self {
            max_markup_bytes: Some(limit),
        }
    }

    pub fn max_markup_bytes(&self) -> Option<usize> {
        self.max_markup_bytes
    }

    /// Extract a graph; failures are reported through [`ParseResult::error`]
    pub fn extract(&self, kgml_markup: &str, pathway_id: &str) -> ParseResult {
        match self.try_extract(kgml_markup, pathway_id) {
            Ok((nodes, edges)) => ParseResult::success(nodes, edges),
            Err(err) => {
                debug!(pathway_id, error = %err, "KGML extraction failed");
                ParseResult::failure(err.to_string())
            },
        }
    }

    fn try_extract(
        &self,
        kgml_markup: &str,
        pathway_id: &str,
    ) -> Result<(Vec<GraphNode>, Vec<GraphEdge>), KgmlError> {
        if kgml_markup.trim().is_empty() {
            return Err(KgmlError::Empty(pathway_id.to_string()));
        }

        if let Some(limit) = self.max_markup_bytes {
            if kgml_markup.len() > limit {
                return Err(KgmlError::TooLarge {
                    pathway_id: pathway_id.to_string(),
                    limit,
                });
            }
        }

        let document = KgmlDocument::parse(kgml_markup)?;
        let graph = build_graph(&document);

        debug!(
            pathway_id,
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            skipped_entries = graph.skipped_entries,
            skipped_relations = graph.skipped_relations,
            "Extracted KGML graph"
        );

        Ok((graph.nodes, graph.edges))
    }
}

/// Nodes and edges of one document, plus what was dropped on the way
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuiltGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// Entries without a usable id or name
    pub skipped_entries: usize,
    /// Relations with an endpoint that did not resolve
    pub skipped_relations: usize,
}

/// Turn a parsed document into nodes and edges.
///
/// Node ids are not de-duplicated: an accession drawn twice on a map yields
/// two nodes with the same id.
pub fn build_graph(document: &KgmlDocument) -> BuiltGraph {
    let mut graph = BuiltGraph::default();

    // Scoped to this call; relations resolve against every entry, including
    // ones that appear after the relation in the document.
    let mut external_ids: HashMap<&str, String> = HashMap::new();

    for entry in &document.entries {
        match entry_node(entry) {
            Some((internal_id, node)) => {
                external_ids.insert(internal_id, node.id.clone());
                graph.nodes.push(node);
            },
            None => graph.skipped_entries += 1,
        }
    }

    for relation in &document.relations {
        match relation_edge(relation, &external_ids) {
            Some(edge) => graph.edges.push(edge),
            None => graph.skipped_relations += 1,
        }
    }

    graph
}

fn entry_node(entry: &RawEntry) -> Option<(&str, GraphNode)> {
    let internal_id = non_empty(entry.id.as_deref())?;
    let name = non_empty(entry.name.as_deref())?;
    let id = match external_id(name) {
        stripped if stripped.is_empty() => name.to_string(),
        stripped => stripped,
    };

    let kind = entry.kind.clone().unwrap_or_else(|| UNKNOWN_KIND.to_string());
    let graphics = entry.graphics.as_ref();
    let label = graphics
        .and_then(graphics_label)
        .unwrap_or_else(|| id.clone());
    let (x, y) = graphics.map(coordinates).unwrap_or((None, None));

    Some((
        internal_id,
        GraphNode {
            id,
            label,
            kind,
            x,
            y,
        },
    ))
}

fn relation_edge(relation: &RawRelation, external_ids: &HashMap<&str, String>) -> Option<GraphEdge> {
    let source = external_ids.get(relation.entry1.as_deref()?)?;
    let target = external_ids.get(relation.entry2.as_deref()?)?;

    let label = relation
        .subtypes
        .iter()
        .filter_map(|subtype| non_empty(subtype.name.as_deref()))
        .collect::<Vec<_>>()
        .join(", ");

    Some(GraphEdge {
        source: source.clone(),
        target: target.clone(),
        label,
    })
}

/// Strip the database prefix from each accession token.
///
/// `"org:A"` → `"A"`, `"bce:BC1 bce:BC2"` → `"BC1 BC2"`. Tokens without a
/// colon, or with nothing after it, are kept as written.
pub fn external_id(name: &str) -> String {
    name.split_whitespace()
        .map(|token| match token.split_once(':') {
            Some((_, accession)) if !accession.is_empty() => accession,
            _ => token,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// First comma-separated segment of the graphics name, unless it is blank
/// or the "..." placeholder
fn graphics_label(graphics: &RawGraphics) -> Option<String> {
    let first = graphics.name.as_deref()?.split(',').next()?.trim();
    if first.is_empty() || first == ELLIPSIS_LABEL {
        None
    } else {
        Some(first.to_string())
    }
}

/// How one raw coordinate reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Coordinate {
    /// Absent, or not digits at all
    Missing,
    Value(i64),
    /// Digits behind more than one leading `-`: spoils the whole pair
    Malformed,
}

fn read_coordinate(raw: Option<&str>) -> Coordinate {
    let Some(raw) = raw else {
        return Coordinate::Missing;
    };
    let trimmed = raw.trim();
    let digits = trimmed.trim_start_matches('-');
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Coordinate::Missing;
    }
    if trimmed.len() - digits.len() > 1 {
        return Coordinate::Malformed;
    }
    trimmed
        .parse()
        .map(Coordinate::Value)
        .unwrap_or(Coordinate::Missing)
}

/// Accept only an optionally negative run of ASCII digits
pub fn parse_coordinate(raw: Option<&str>) -> Option<i64> {
    value(read_coordinate(raw))
}

/// `(x, y)` of a graphics element; a malformed coordinate nulls both
fn coordinates(graphics: &RawGraphics) -> (Option<i64>, Option<i64>) {
    match (
        read_coordinate(graphics.x.as_deref()),
        read_coordinate(graphics.y.as_deref()),
    ) {
        (Coordinate::Malformed, _) | (_, Coordinate::Malformed) => (None, None),
        (x, y) => (value(x), value(y)),
    }
}

fn value(coordinate: Coordinate) -> Option<i64> {
    match coordinate {
        Coordinate::Value(value) => Some(value),
        Coordinate::Missing | Coordinate::Malformed => None,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
