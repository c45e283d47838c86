//! Hosted Assistant Platform Clients
//!
//! Everything that talks to the remote document-QA platform lives here:
//!
//! - [`QaPlatform`] - the remote call contract (assistants, vector stores,
//!   file ingestion, threads, runs, messages, file metadata)
//! - [`OpenAiPlatform`] - implementation over the OpenAI Assistants v2 REST API
//! - [`types`] - the subset of the platform's objects this service reads
//!
//! The platform owns all durable state. This service keeps no record of the
//! assistants or vector stores it creates; callers hold the identifiers.

/// Platform trait definition.
pub mod client;
/// OpenAI Assistants v2 client.
pub mod openai;
/// Platform object types.
pub mod types;

pub use client::QaPlatform;
pub use openai::OpenAiPlatform;
