//! TOML-based configuration for SiteQA
//!
//! Infrastructure settings (listen address, log level), the hosted assistant
//! platform settings, and the scrape cleanup rules all live in one TOML file
//! (`siteqa.toml` by default). Every section has defaults, so a missing file
//! or a partial file is valid; only the API key has to come from the
//! environment.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure loaded from siteqa.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteQaConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub openai: OpenAiConfig,

    #[serde(default)]
    pub scrape: ScrapeConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// `"pretty"` or `"json"`
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

// ============= Assistant Platform Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Environment variable containing the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_openai_base")]
    pub api_base: String,

    /// Model the assistant runs on
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,

    #[serde(default = "default_assistant_description")]
    pub assistant_description: String,

    /// Persona the assistant is created with
    #[serde(default = "default_instructions")]
    pub instructions: String,

    #[serde(default = "default_vector_store_name")]
    pub vector_store_name: String,

    /// Delay between status polls for ingestion and runs
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_openai_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_assistant_name() -> String {
    "Question-Answer Assistant".to_string()
}

fn default_assistant_description() -> String {
    "You are the question answer bot who answers the user question with precise \
     response by using only the vector store's content"
        .to_string()
}

fn default_instructions() -> String {
    "Answer only from the stored content. If you cannot find the answer in the \
     stored content, say explicitly that you could not find the answer."
        .to_string()
}

fn default_vector_store_name() -> String {
    "Scraped Content".to_string()
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            api_base: default_openai_base(),
            model: default_model(),
            assistant_name: default_assistant_name(),
            assistant_description: default_assistant_description(),
            instructions: default_instructions(),
            vector_store_name: default_vector_store_name(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

// ============= Scrape Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Inserted between the cleaned pages of one batch
    #[serde(default = "default_separator")]
    pub separator: String,

    #[serde(default)]
    pub include_images: bool,

    /// Optional CSS selector narrowing what is converted to Markdown
    #[serde(default)]
    pub selector: Option<String>,

    /// Ordered boilerplate removal rules. Replaces the defaults when present.
    #[serde(default = "default_cleanup_rules")]
    pub cleanup: Vec<CleanupRuleConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupRuleConfig {
    pub name: String,
    pub pattern: String,
}

pub const DEFAULT_SEPARATOR: &str = "\n\n---\n\n";

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

/// The newsletter footer and storefront cart banner rules.
pub fn default_cleanup_rules() -> Vec<CleanupRuleConfig> {
    vec![
        CleanupRuleConfig {
            name: "newsletter-footer".to_string(),
            pattern: r"##  Subscribe to our emails.*?\* Opens in a new window\.".to_string(),
        },
        CleanupRuleConfig {
            name: "storefront-cart-banner".to_string(),
            pattern: r"Skip to content.*?View cart Check out  Continue shopping".to_string(),
        },
    ]
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            include_images: false,
            selector: None,
            cleanup: default_cleanup_rules(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),

    #[error("Cleanup rule '{name}' has an invalid pattern: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}

impl SiteQaConfig {
    /// Load configuration from a TOML file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Load from `path` when it exists, otherwise validate and return the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Parse without validating.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Startup checks: the API key must be present and every cleanup pattern must compile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api_key()?;

        if self.openai.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "openai.poll_interval_ms must be greater than zero".to_string(),
            ));
        }

        if !matches!(self.server.log_format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "server.log_format must be \"pretty\" or \"json\", got \"{}\"",
                self.server.log_format
            )));
        }

        if self.openai.api_base.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "openai.api_base must not be empty".to_string(),
            ));
        }

        crate::scrape::CleanupRules::from_config(&self.scrape.cleanup)?;

        Ok(())
    }

    /// Get the platform API key from the environment
    pub fn api_key(&self) -> Result<String, ConfigError> {
        std::env::var(&self.openai.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(self.openai.api_key_env.clone()))
    }

    /// Socket address string the server binds to
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
