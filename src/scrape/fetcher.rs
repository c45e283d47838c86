//! Page fetching.
//!
//! [`PageFetcher`] is the seam to the external crawler: it turns a URL into
//! rendered Markdown. The production implementation uses daedra, which fetches
//! the page and converts the HTML to Markdown.

use async_trait::async_trait;

/// Failure to retrieve a single page.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct FetchError(pub String);

/// External crawler contract.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Precondition the crawler before a batch. Called once per scrape request.
    async fn warmup(&self) -> Result<(), FetchError> {
        Ok(())
    }

    /// Fetch `url` and return its content as Markdown.
    async fn fetch_markdown(&self, url: &str) -> Result<String, FetchError>;
}

/// Page fetcher powered by daedra
#[derive(Debug, Clone, Default)]
pub struct DaedraFetcher {
    include_images: bool,
    selector: Option<String>,
}

impl DaedraFetcher {
    pub fn new(include_images: bool, selector: Option<String>) -> Self {
        Self {
            include_images,
            selector,
        }
    }
}

#[async_trait]
impl PageFetcher for DaedraFetcher {
    async fn fetch_markdown(&self, url: &str) -> Result<String, FetchError> {
        let fetch_args = daedra::VisitPageArgs {
            url: url.to_string(),
            include_images: self.include_images,
            selector: self.selector.clone(),
        };

        match daedra::tools::fetch::fetch_page(&fetch_args).await {
            Ok(page_content) => {
                tracing::debug!(
                    url,
                    title = ?page_content.title,
                    word_count = ?page_content.word_count,
                    "Fetched page"
                );
                Ok(page_content.content)
            }
            Err(e) => Err(FetchError(e.to_string())),
        }
    }
}
