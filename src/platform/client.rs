//! Assistant platform abstraction
//!
//! The hosted document-QA platform is reached through [`QaPlatform`]. Each
//! method maps to one remote operation; the `*_and_poll` methods block until
//! the remote side reports a terminal state.

use crate::platform::types::{
    Assistant, AssistantSpec, FileBatch, FileObject, Run, Thread, ThreadMessage, VectorStore,
};
use crate::types::Result;
use async_trait::async_trait;
use std::path::Path;

/// Remote assistant / vector store / thread operations.
///
/// Implementations must not retry; a failed call surfaces as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QaPlatform: Send + Sync {
    /// Create an assistant with the file search tool enabled
    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<Assistant>;

    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant>;

    async fn create_vector_store(&self, name: &str) -> Result<VectorStore>;

    async fn retrieve_vector_store(&self, vector_store_id: &str) -> Result<VectorStore>;

    /// Upload a file into a vector store and wait until ingestion finishes
    async fn upload_and_poll(&self, vector_store_id: &str, path: &Path) -> Result<FileBatch>;

    /// Make `vector_store_id` the assistant's only file search resource
    async fn attach_vector_store(
        &self,
        assistant_id: &str,
        vector_store_id: &str,
    ) -> Result<Assistant>;

    /// Create a thread seeded with one user message
    async fn create_thread(&self, question: &str) -> Result<Thread>;

    /// Start a run and wait for it to complete
    async fn run_and_poll(&self, thread_id: &str, assistant_id: &str) -> Result<Run>;

    /// Messages produced by `run_id`, newest first
    async fn list_messages(&self, thread_id: &str, run_id: &str) -> Result<Vec<ThreadMessage>>;

    async fn retrieve_file(&self, file_id: &str) -> Result<FileObject>;
}
