// KEGG REST Client

use crate::kegg::{KeggConfig, KeggError, Result};
use pathgraph_common::types::PathwayMetadata;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Per-request tweaks to the retry behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Treat HTTP 400 as "nothing here" instead of retrying
    pub ignore_bad_request: bool,
}

impl FetchPolicy {
    pub fn ignoring_bad_request() -> Self {
        Self {
            ignore_bad_request: true,
        }
    }
}

/// Outcome of a single attempt
enum Attempt {
    Body(String),
    /// Definitive absence; stop retrying
    Absent,
    /// Worth another attempt
    Retry(String),
}

/// HTTP client for the KEGG REST API
pub struct KeggClient {
    client: Client,
    config: KeggConfig,
}

impl KeggClient {
    /// Create new client with configuration
    pub fn new(config: KeggConfig) -> Result<Self> {
        config.validate().map_err(KeggError::Validation)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("pathgraph/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(KeggClient { client, config })
    }

    /// Fetch `base_url/endpoint`, retrying transient failures.
    ///
    /// Every attempt is preceded by a pause that starts at the configured
    /// request delay and grows by the delay multiplier after each failure.
    /// Returns `None` for 404, for 400 when the policy ignores it, for a body
    /// that stays empty, and once all attempts have failed.
    pub async fn fetch_with_retry(&self, endpoint: &str, policy: FetchPolicy) -> Option<String> {
        let url = self.config.endpoint_url(endpoint);
        let max_attempts = self.config.max_retries;
        let mut delay = self.config.request_delay();

        for attempt in 1..=max_attempts {
            tokio::time::sleep(delay).await;

            match self.attempt(&url, policy).await {
                Attempt::Body(body) => return Some(body),
                Attempt::Absent => return None,
                Attempt::Retry(reason) => {
                    warn!(url = %url, attempt, max_attempts, reason = %reason, "KEGG request failed");
                },
            }

            if attempt < max_attempts {
                delay = delay.mul_f64(self.config.delay_multiplier);
            }
        }

        warn!(url = %url, max_attempts, "Giving up on KEGG request");
        None
    }

    async fn attempt(&self, url: &str, policy: FetchPolicy) -> Attempt {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return Attempt::Retry(format!("request error: {}", e)),
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            info!(url = %url, "Resource not found (404)");
            return Attempt::Absent;
        }

        if status == StatusCode::BAD_REQUEST && policy.ignore_bad_request {
            info!(url = %url, "Bad request (400), treating as no data");
            return Attempt::Absent;
        }

        if !status.is_success() {
            return Attempt::Retry(format!("HTTP {}", status));
        }

        match response.text().await {
            Ok(body) if body.trim().is_empty() => Attempt::Retry("empty response body".to_string()),
            Ok(body) => Attempt::Body(body),
            Err(e) => Attempt::Retry(format!("failed to read body: {}", e)),
        }
    }

    /// List the pathway maps of an organism
    pub async fn list_pathways(&self, organism_code: &str) -> Vec<PathwayMetadata> {
        info!(organism = organism_code, "Fetching pathway list");

        let endpoint = format!("list/pathway/{}", organism_code);
        match self.fetch_with_retry(&endpoint, FetchPolicy::default()).await {
            Some(body) => {
                parse_pathway_list(&body, organism_code, |org, id| self.config.image_url(org, id))
            },
            None => Vec::new(),
        }
    }

    /// KEGG gene ids linked to a pathway
    pub async fn pathway_genes(&self, pathway_id: &str) -> Vec<String> {
        debug!(pathway_id, "Fetching pathway genes");

        let endpoint = format!("get/{}/genes", pathway_id);
        self.fetch_with_retry(&endpoint, FetchPolicy::ignoring_bad_request())
            .await
            .map(|body| parse_gene_list(&body))
            .unwrap_or_default()
    }

    /// KGML markup of a pathway
    pub async fn pathway_kgml(&self, pathway_id: &str) -> Option<String> {
        debug!(pathway_id, "Fetching KGML");

        let endpoint = format!("get/{}/kgml", pathway_id);
        self.fetch_with_retry(&endpoint, FetchPolicy::default()).await
    }

    /// Get configuration
    pub fn config(&self) -> &KeggConfig {
        &self.config
    }
}

/// Parse a `list/pathway/<org>` body.
///
/// Each line is `[path:]<pathway_id>\t<name>`; blank lines are skipped and
/// lines with fewer than two fields are skipped with a warning.
pub fn parse_pathway_list(
    body: &str,
    organism_code: &str,
    image_url: impl Fn(&str, &str) -> String,
) -> Vec<PathwayMetadata> {
    let mut pathways = Vec::new();

    for line in body.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split('\t');
        let (Some(raw_id), Some(name)) = (fields.next(), fields.next()) else {
            warn!(line, "Could not parse pathway list line");
            continue;
        };

        let pathway_id = raw_id.replace("path:", "");
        pathways.push(PathwayMetadata {
            image_url: image_url(organism_code, &pathway_id),
            pathway_id,
            name: name.to_string(),
            organism_code: organism_code.to_string(),
        });
    }

    pathways
}

/// Parse a gene listing: the first tab-separated field of each non-blank line
pub fn parse_gene_list(body: &str) -> Vec<String> {
    body.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| line.split('\t').next())
        .map(|gene| gene.to_string())
        .collect()
}
