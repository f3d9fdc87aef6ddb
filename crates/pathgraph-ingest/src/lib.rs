//! pathgraph Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! KEGG pathway maps: download, KGML parsing and graph extraction.
//!
//! # Modules
//!
//! - **kgml**: KGML markup → node/edge graph ([`parse_kgml_to_graph`])
//! - **pathway**: stored pathway document → renderable [`PathwayGraph`]
//! - **kegg**: KEGG REST client and per-organism download pipeline
//!
//! # Example
//!
//! ```no_run
//! use pathgraph_ingest::parse_kgml_to_graph;
//!
//! let kgml = std::fs::read_to_string("bce00010.xml").unwrap_or_default();
//! let result = parse_kgml_to_graph(&kgml, "bce00010");
//! match result.error {
//!     Some(error) => eprintln!("{}", error),
//!     None => println!("{} nodes, {} edges", result.nodes.len(), result.edges.len()),
//! }
//! ```

pub mod kegg;
pub mod kgml;
pub mod pathway;

pub use kgml::{parse_kgml_to_graph, GraphExtractor, KgmlDocument, KgmlError};
pub use pathway::{build_pathway_graph, GraphError, PathwayGraph};
