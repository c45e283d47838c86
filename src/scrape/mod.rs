//! Content acquisition
//!
//! Turns a list of URLs into one Markdown document:
//!
//! 1. **Fetch** - each URL is fetched sequentially through a [`PageFetcher`]
//! 2. **Clean** - boilerplate is removed with the configured [`CleanupRules`]
//! 3. **Assemble** - cleaned pages are joined with a separator, in input order
//! 4. **Hand off** - the document is written to a [`CorpusFile`] for upload
//!
//! The first failing URL aborts the whole batch. Nothing is retried and no
//! partial document is produced.

pub mod cleanup;
pub mod fetcher;

pub use cleanup::{CleanupRule, CleanupRules};
pub use fetcher::{DaedraFetcher, FetchError, PageFetcher};

use crate::types::{AppError, Result};
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tempfile::NamedTempFile;
use tracing::instrument;

/// Fetch and clean every URL in order.
#[instrument(skip(fetcher, rules), fields(url_count = urls.len()))]
pub async fn scrape_urls(
    fetcher: &dyn PageFetcher,
    rules: &CleanupRules,
    urls: &[String],
) -> Result<Vec<String>> {
    let start = Instant::now();

    fetcher.warmup().await.map_err(|e| {
        AppError::Internal(format!("Failed to warm up page fetcher: {}", e))
    })?;

    let mut pages = Vec::with_capacity(urls.len());
    for url in urls {
        let raw = fetcher
            .fetch_markdown(url)
            .await
            .map_err(|e| {
                tracing::error!(url = %url, error = %e, "Fetch failed, aborting batch");
                AppError::Scrape {
                    url: url.clone(),
                    message: e.to_string(),
                }
            })?;

        let cleaned = rules.apply(&raw);
        tracing::debug!(
            url = %url,
            raw_len = raw.len(),
            cleaned_len = cleaned.len(),
            "Page cleaned"
        );
        pages.push(cleaned);
    }

    tracing::info!(
        pages = pages.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Scrape complete"
    );

    Ok(pages)
}

/// Join cleaned pages with `separator`, preserving order.
pub fn assemble_corpus(pages: &[String], separator: &str) -> String {
    pages.join(separator)
}

/// Transient Markdown document handed to the indexing step.
///
/// The file is deleted when this handle is dropped.
#[derive(Debug)]
pub struct CorpusFile {
    file: NamedTempFile,
}

impl CorpusFile {
    pub fn write(content: &str) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("siteqa-")
            .suffix(".md")
            .tempfile()?;
        file.write_all(content.as_bytes())?;
        file.flush()?;

        tracing::debug!(path = %file.path().display(), bytes = content.len(), "Corpus written");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
