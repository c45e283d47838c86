//! API request handlers.

/// Question answering against a provisioned assistant.
pub mod ask;
/// Liveness check.
pub mod health;
/// Scrape and index handler.
pub mod scrape;
