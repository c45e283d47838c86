//! HTTP API Handlers and Routes
//!
//! The REST surface of SiteQA, built on Axum.
//!
//! # Endpoints
//!
//! - `POST /scrape_and_upsert` - scrape `{"urls": ...}` (one URL or a list)
//!   into a new assistant + vector store; returns both identifiers
//! - `POST /ask_question?assistant_id=..&vector_store_id=..` - answer
//!   `{"question": ...}` from the scraped content, with `[i]` citation markers
//! - `GET /health` - liveness check
//! - `GET /api-docs/openapi.json` - OpenAPI document
//!
//! Failures are reported as `{"detail": "..."}`: 422 for malformed requests,
//! 500 for everything else.

/// Request handlers.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

pub use routes::{ApiDoc, create_router};
