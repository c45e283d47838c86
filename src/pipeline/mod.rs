//! Scrape → index → query orchestration
//!
//! [`Pipeline`] ties the pieces together for the HTTP handlers:
//!
//! - [`Pipeline::scrape_and_index`] - fetch and clean the URLs, assemble one
//!   Markdown document, hand it to the platform as a fresh assistant + vector
//!   store pair
//! - [`Pipeline::ask`] - answer a question through a previously provisioned
//!   pair, with citations rewritten to `[i]` markers
//!
//! The pipeline is stateless between requests. The caller owns the returned
//! identifiers and must send them back with every question.

pub mod provision;
pub mod query;

pub use provision::{provision, AssistantProfile, Provisioned};
pub use query::{apply_citations, ask};

use crate::platform::QaPlatform;
use crate::scrape::{assemble_corpus, scrape_urls, CleanupRules, CorpusFile, PageFetcher};
use crate::types::Result;
use crate::utils::toml_config::{ConfigError, SiteQaConfig, DEFAULT_SEPARATOR};
use std::sync::Arc;

/// Shared, immutable pipeline wiring.
#[derive(Clone)]
pub struct Pipeline {
    fetcher: Arc<dyn PageFetcher>,
    platform: Arc<dyn QaPlatform>,
    rules: CleanupRules,
    separator: String,
    profile: AssistantProfile,
}

impl Pipeline {
    pub fn new(fetcher: Arc<dyn PageFetcher>, platform: Arc<dyn QaPlatform>) -> Self {
        Self {
            fetcher,
            platform,
            rules: CleanupRules::defaults(),
            separator: DEFAULT_SEPARATOR.to_string(),
            profile: AssistantProfile::default(),
        }
    }

    pub fn from_config(
        config: &SiteQaConfig,
        fetcher: Arc<dyn PageFetcher>,
        platform: Arc<dyn QaPlatform>,
    ) -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            fetcher,
            platform,
            rules: CleanupRules::from_config(&config.scrape.cleanup)?,
            separator: config.scrape.separator.clone(),
            profile: AssistantProfile::from_config(&config.openai),
        })
    }

    pub fn rules(&self) -> &CleanupRules {
        &self.rules
    }

    /// Scrape `urls` and provision an assistant over the combined content.
    ///
    /// A failing URL stops the request before anything is created remotely.
    pub async fn scrape_and_index(&self, urls: &[String]) -> Result<Provisioned> {
        let pages = scrape_urls(self.fetcher.as_ref(), &self.rules, urls).await?;
        let corpus = assemble_corpus(&pages, &self.separator);
        let corpus_file = CorpusFile::write(&corpus)?;

        provision(self.platform.as_ref(), &self.profile, corpus_file.path()).await
    }

    pub async fn ask(
        &self,
        assistant_id: &str,
        vector_store_id: &str,
        question: &str,
    ) -> Result<String> {
        ask(self.platform.as_ref(), assistant_id, vector_store_id, question).await
    }
}
