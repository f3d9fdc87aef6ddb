//! pathgraph - KEGG pathway graph tool

use anyhow::{bail, Context, Result};
use clap::Parser;
use pathgraph_common::logging::{init_logging, LogConfig, LogLevel};
use pathgraph_common::types::PathwayDocument;
use pathgraph_ingest::kegg::{KeggConfig, PathwayDownloader};
use pathgraph_ingest::kgml::{build_graph, KgmlDocument, PathwayHeader};
use pathgraph_ingest::{build_pathway_graph, GraphExtractor};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "pathgraph")]
#[command(author, version, about = "KEGG pathway graph extraction tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Parser, Debug)]
enum Command {
    /// Extract the node/edge graph of a pathway and print it as JSON
    Graph {
        /// Stored pathway document (.json) or raw KGML file
        file: PathBuf,

        /// Pathway id used in messages (defaults to the file stem)
        #[arg(long)]
        pathway_id: Option<String>,

        /// Reject markup larger than this many bytes (defaults to KGML_MAX_BYTES)
        #[arg(long)]
        max_bytes: Option<usize>,
    },

    /// Summarise a KGML file
    Inspect {
        /// Raw KGML file
        file: PathBuf,
    },

    /// Download every pathway map of an organism from KEGG
    Download {
        /// KEGG organism code (overrides KEGG_ORGANISM_CODE)
        #[arg(long)]
        organism: Option<String>,

        /// Output directory
        #[arg(short, long, default_value = "./data/kegg")]
        output: PathBuf,

        /// Only download the first N pathways
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Debug, Serialize)]
struct InspectReport {
    header: Option<PathwayHeader>,
    entries: usize,
    relations: usize,
    nodes: usize,
    edges: usize,
    skipped_entries: usize,
    skipped_relations: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables take precedence over flags
    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("pathgraph")
        .build()
        .merge_env()?;

    init_logging(&log_config)?;

    match cli.command {
        Command::Graph {
            file,
            pathway_id,
            max_bytes,
        } => graph(&file, pathway_id, max_bytes),
        Command::Inspect { file } => inspect(&file),
        Command::Download {
            organism,
            output,
            limit,
        } => download(organism, &output, limit).await,
    }
}

fn graph(file: &Path, pathway_id: Option<String>, max_bytes: Option<usize>) -> Result<()> {
    let extractor = match max_bytes {
        Some(limit) => GraphExtractor::with_max_markup_bytes(limit),
        None => KeggConfig::from_env()
            .map_err(anyhow::Error::msg)?
            .graph_extractor(),
    };

    if file.extension().is_some_and(|ext| ext == "json") {
        let document = PathwayDocument::from_json_file(file)?;
        let graph = build_pathway_graph(&document, &extractor)?;
        println!("{}", serde_json::to_string_pretty(&graph)?);
        return Ok(());
    }

    let markup = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let pathway_id = pathway_id.unwrap_or_else(|| file_stem(file));

    let result = extractor.extract(&markup, &pathway_id);
    println!("{}", serde_json::to_string_pretty(&result)?);

    if let Some(error) = result.error {
        bail!(error);
    }
    Ok(())
}

fn inspect(file: &Path) -> Result<()> {
    let markup = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let document = KgmlDocument::parse(&markup)?;
    let graph = build_graph(&document);

    let report = InspectReport {
        header: document.header.clone(),
        entries: document.entries.len(),
        relations: document.relations.len(),
        nodes: graph.nodes.len(),
        edges: graph.edges.len(),
        skipped_entries: graph.skipped_entries,
        skipped_relations: graph.skipped_relations,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn download(organism: Option<String>, output: &Path, limit: Option<usize>) -> Result<()> {
    let mut config = KeggConfig::from_env().map_err(anyhow::Error::msg)?;
    if let Some(organism) = organism {
        config.organism_code = organism;
    }

    let mut downloader = PathwayDownloader::new(config)?;
    if let Some(limit) = limit {
        downloader = downloader.with_limit(limit);
    }

    let stats = downloader.run(output).await?;
    info!(
        total = stats.total,
        saved = stats.saved,
        failed = stats.failed,
        missing_kgml = stats.missing_kgml,
        "Download finished"
    );
    println!("{}", serde_json::to_string_pretty(&stats)?);

    if stats.failed > 0 {
        bail!("{} of {} pathway documents could not be saved", stats.failed, stats.total);
    }
    Ok(())
}

fn file_stem(file: &Path) -> String {
    file.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}
