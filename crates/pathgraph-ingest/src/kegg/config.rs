// KEGG REST Configuration

use crate::kgml::GraphExtractor;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://rest.kegg.jp";
pub const DEFAULT_IMAGE_BASE_URL: &str = "http://www.kegg.jp/kegg/pathway";
pub const DEFAULT_ORGANISM_CODE: &str = "bce";
/// KEGG asks clients to stay at roughly three requests per second
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 340;
pub const DEFAULT_DELAY_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_KGML_BYTES: usize = 16 * 1024 * 1024;

/// Configuration for KEGG REST downloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeggConfig {
    /// Base URL of the KEGG REST API
    pub base_url: String,

    /// Base URL of rendered pathway images
    pub image_base_url: String,

    /// KEGG organism code (e.g., "bce" for Bacillus cereus ATCC 14579)
    pub organism_code: String,

    /// Delay before the first attempt of every request, in milliseconds
    pub request_delay_ms: u64,

    /// Factor applied to the delay after each failed attempt
    pub delay_multiplier: f64,

    /// Attempts per request
    pub max_retries: u32,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Upper bound for KGML markup handed to the extractor
    pub max_kgml_bytes: usize,
}

impl Default for KeggConfig {
    fn default() -> Self {
        KeggConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            organism_code: DEFAULT_ORGANISM_CODE.to_string(),
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            delay_multiplier: DEFAULT_DELAY_MULTIPLIER,
            max_retries: DEFAULT_MAX_RETRIES,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_kgml_bytes: DEFAULT_MAX_KGML_BYTES,
        }
    }
}

impl KeggConfig {
    /// Create new config with builder pattern
    pub fn builder() -> KeggConfigBuilder {
        KeggConfigBuilder::default()
    }

    /// Load configuration from the environment (and `.env`), over defaults
    ///
    /// - `KEGG_API_BASE_URL`
    /// - `KEGG_ORGANISM_CODE`
    /// - `KEGG_REQUEST_DELAY` (seconds, fractional)
    /// - `KEGG_MAX_RETRIES`
    /// - `KGML_MAX_BYTES`
    ///
    /// Unparsable numeric values keep their defaults.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let mut config = KeggConfig::default();

        if let Ok(url) = std::env::var("KEGG_API_BASE_URL") {
            config.base_url = url;
        }

        if let Ok(code) = std::env::var("KEGG_ORGANISM_CODE") {
            config.organism_code = code;
        }

        if let Some(delay) = std::env::var("KEGG_REQUEST_DELAY")
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
        {
            config.request_delay_ms = (delay * 1000.0).round() as u64;
        }

        if let Some(retries) = std::env::var("KEGG_MAX_RETRIES")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.max_retries = retries;
        }

        if let Some(limit) = std::env::var("KGML_MAX_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.max_kgml_bytes = limit;
        }

        config.validate()?;
        Ok(config)
    }

    /// Delay before the first attempt of a request
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// URL of an endpoint relative to the API base
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// URL of the rendered map for a pathway
    pub fn image_url(&self, organism_code: &str, pathway_id: &str) -> String {
        format!(
            "{}/{}/{}.png",
            self.image_base_url.trim_end_matches('/'),
            organism_code,
            pathway_id
        )
    }

    /// Graph extractor bounded by `max_kgml_bytes`
    pub fn graph_extractor(&self) -> GraphExtractor {
        GraphExtractor::with_max_markup_bytes(self.max_kgml_bytes)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid KEGG base URL '{}': {}", self.base_url, e))?;

        url::Url::parse(&self.image_base_url)
            .map_err(|e| format!("Invalid image base URL '{}': {}", self.image_base_url, e))?;

        if self.organism_code.trim().is_empty() {
            return Err("Organism code cannot be empty".to_string());
        }

        if self.max_retries == 0 {
            return Err("Max retries must be greater than 0".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if !(self.delay_multiplier >= 1.0 && self.delay_multiplier.is_finite()) {
            return Err(format!(
                "Delay multiplier must be at least 1, got {}",
                self.delay_multiplier
            ));
        }

        if self.max_kgml_bytes == 0 {
            return Err("KGML size limit must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Builder for KeggConfig
#[derive(Debug, Default)]
pub struct KeggConfigBuilder {
    base_url: Option<String>,
    image_base_url: Option<String>,
    organism_code: Option<String>,
    request_delay_ms: Option<u64>,
    delay_multiplier: Option<f64>,
    max_retries: Option<u32>,
    timeout_secs: Option<u64>,
    max_kgml_bytes: Option<usize>,
}

impl KeggConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = Some(url.into());
        self
    }

    pub fn organism_code(mut self, code: impl Into<String>) -> Self {
        self.organism_code = Some(code.into());
        self
    }

    pub fn request_delay_ms(mut self, millis: u64) -> Self {
        self.request_delay_ms = Some(millis);
        self
    }

    pub fn delay_multiplier(mut self, multiplier: f64) -> Self {
        self.delay_multiplier = Some(multiplier);
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn max_kgml_bytes(mut self, limit: usize) -> Self {
        self.max_kgml_bytes = Some(limit);
        self
    }

    pub fn build(self) -> KeggConfig {
        let default = KeggConfig::default();

        KeggConfig {
            base_url: self.base_url.unwrap_or(default.base_url),
            image_base_url: self.image_base_url.unwrap_or(default.image_base_url),
            organism_code: self.organism_code.unwrap_or(default.organism_code),
            request_delay_ms: self.request_delay_ms.unwrap_or(default.request_delay_ms),
            delay_multiplier: self.delay_multiplier.unwrap_or(default.delay_multiplier),
            max_retries: self.max_retries.unwrap_or(default.max_retries),
            timeout_secs: self.timeout_secs.unwrap_or(default.timeout_secs),
            max_kgml_bytes: self.max_kgml_bytes.unwrap_or(default.max_kgml_bytes),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = KeggConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.request_delay(), Duration::from_millis(340));
        assert_eq!(
            config.endpoint_url("list/pathway/bce"),
            "http://rest.kegg.jp/list/pathway/bce"
        );
        assert_eq!(
            config.image_url("bce", "bce00010"),
            "http://www.kegg.jp/kegg/pathway/bce/bce00010.png"
        );
    }

    #[test]
    fn test_builder_overrides() {
        let config = KeggConfig::builder()
            .base_url("http://localhost:8080")
            .organism_code("eco")
            .max_retries(5)
            .build();

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.organism_code, "eco");
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_endpoint_and_image_urls() {
        let config = KeggConfig::builder().base_url("http://fake-kegg-api/").build();
        assert_eq!(
            config.endpoint_url("list/pathway/bce"),
            "http://fake-kegg-api/list/pathway/bce"
        );
        assert_eq!(
            config.image_url("bce", "bce00010"),
            "http://www.kegg.jp/kegg/pathway/bce/bce00010.png"
        );
    }

    #[test]
    fn test_graph_extractor_uses_kgml_limit() {
        let config = KeggConfig::builder().max_kgml_bytes(32).build();
        let extractor = config.graph_extractor();
        assert_eq!(extractor.max_markup_bytes(), Some(32));

        let markup = format!("<pathway>{}</pathway>", " ".repeat(40));
        let result = extractor.extract(&markup, "bce00010");
        assert_eq!(
            result.error.as_deref(),
            Some("markup for bce00010 exceeds 32 bytes")
        );
    }

    #[test]
    fn test_invalid_configs() {
        let invalid = [
            KeggConfig::builder().base_url("not a url").build(),
            KeggConfig::builder().organism_code(" ").build(),
            KeggConfig::builder().max_retries(0).build(),
            KeggConfig::builder().timeout_secs(0).build(),
            KeggConfig::builder().delay_multiplier(0.5).build(),
            KeggConfig::builder().delay_multiplier(f64::NAN).build(),
            KeggConfig::builder().max_kgml_bytes(0).build(),
        ];

        for config in invalid {
            assert!(config.validate().is_err(), "expected invalid: {:?}", config);
        }
    }
}
