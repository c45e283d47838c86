//! # SiteQA
//!
//! Scrape web pages into a hosted assistant, then answer questions over them.
//!
//! ## Overview
//!
//! A request to `POST /scrape_and_upsert` fetches each URL as Markdown,
//! strips known boilerplate with configurable regex rules, joins the pages
//! into one document, and hands that document to the OpenAI Assistants API
//! as a new assistant with its own file-search vector store. The caller gets
//! back both identifiers and passes them to `POST /ask_question`, which runs
//! the question through that assistant and returns the answer with citation
//! markers (`[0]`, `[1]`, ...) and a list of the cited files.
//!
//! No state is kept between requests; the hosted platform owns everything.
//!
//! ## Library usage
//!
//! ```rust,ignore
//! use siteqa::{AppState, Pipeline, SiteQaConfig};
//! use siteqa::platform::OpenAiPlatform;
//! use siteqa::scrape::DaedraFetcher;
//! use std::sync::Arc;
//!
//! let config = SiteQaConfig::load_or_default("siteqa.toml")?;
//! let platform = OpenAiPlatform::from_config(&config.openai, config.api_key()?)?;
//! let fetcher = DaedraFetcher::new(config.scrape.include_images, config.scrape.selector.clone());
//! let pipeline = Pipeline::from_config(&config, Arc::new(fetcher), Arc::new(platform))?;
//!
//! let ids = pipeline.scrape_and_index(&["https://example.com".to_string()]).await?;
//! let answer = pipeline.ask(&ids.assistant_id, &ids.vector_store_id, "What is this?").await?;
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST handlers and routes
//! - [`scrape`] - page fetching, boilerplate cleanup, corpus assembly
//! - [`platform`] - hosted assistant platform client
//! - [`pipeline`] - scrape → index → query orchestration
//! - [`types`] - request/response types and errors
//! - [`utils`] - TOML configuration

/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface.
pub mod cli;
/// Scrape, index and query orchestration.
pub mod pipeline;
/// Hosted assistant platform clients.
pub mod platform;
/// Page fetching and cleanup.
pub mod scrape;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

pub use pipeline::{Pipeline, Provisioned};
pub use platform::{OpenAiPlatform, QaPlatform};
pub use scrape::{CleanupRules, DaedraFetcher, PageFetcher};
pub use types::{AppError, Result};
pub use utils::toml_config::{ConfigError, SiteQaConfig};

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Resolved configuration
    pub config: Arc<SiteQaConfig>,
    /// Scrape / index / query pipeline
    pub pipeline: Arc<Pipeline>,
}
