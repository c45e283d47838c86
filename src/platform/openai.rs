//! OpenAI Assistants v2 implementation of [`QaPlatform`].

use crate::platform::client::QaPlatform;
use crate::platform::types::{
    ApiErrorBody, Assistant, AssistantSpec, BatchStatus, FileBatch, FileObject, ListResponse, Run,
    RunStatus, Thread, ThreadMessage, VectorStore,
};
use crate::types::{AppError, Result};
use crate::utils::toml_config::OpenAiConfig;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const ASSISTANTS_BETA: &str = "assistants=v2";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// HTTP client for the OpenAI Assistants API
#[derive(Clone)]
pub struct OpenAiPlatform {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    poll_interval: Duration,
}

impl std::fmt::Debug for OpenAiPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiPlatform")
            .field("api_base", &self.api_base)
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

impl OpenAiPlatform {
    pub fn new(api_key: String, api_base: String) -> Result<Self> {
        Self::with_options(
            api_key,
            api_base,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        )
    }

    pub fn from_config(config: &OpenAiConfig, api_key: String) -> Result<Self> {
        Self::with_options(
            api_key,
            config.api_base.clone(),
            Duration::from_secs(config.request_timeout_secs),
            Duration::from_millis(config.poll_interval_ms),
        )
    }

    fn with_options(
        api_key: String,
        api_base: String,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            poll_interval,
        })
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.api_base, path.trim_start_matches('/'));
        self.client
            .request(method, url)
            .bearer_auth(&self.api_key)
            .header("OpenAI-Beta", ASSISTANTS_BETA)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!("Sending GET request to {}", path);
        self.execute(self.request(Method::GET, path)).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        debug!("Sending POST request to {}", path);
        self.execute(self.request(Method::POST, path).json(body))
            .await
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|parsed| parsed.error.message)
                .unwrap_or(body);
            warn!(status = %status, "Platform request failed");
            return Err(AppError::Platform(format!("{} (HTTP {})", message, status.as_u16())));
        }

        Ok(response.json::<T>().await?)
    }

    async fn upload_file(&self, path: &Path) -> Result<FileObject> {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("corpus.md")
            .to_string();

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename)
            .mime_str("text/markdown")?;
        let form = reqwest::multipart::Form::new()
            .text("purpose", "assistants")
            .part("file", part);

        debug!("Sending multipart upload to files");
        self.execute(self.request(Method::POST, "files").multipart(form))
            .await
    }
}

#[async_trait]
impl QaPlatform for OpenAiPlatform {
    #[instrument(skip(self, spec), fields(name = %spec.name, model = %spec.model))]
    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<Assistant> {
        let body = json!({
            "name": spec.name,
            "description": spec.description,
            "instructions": spec.instructions,
            "model": spec.model,
            "tools": [{ "type": "file_search" }],
        });
        self.post("assistants", &body).await
    }

    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant> {
        self.get(&format!("assistants/{}", assistant_id)).await
    }

    #[instrument(skip(self))]
    async fn create_vector_store(&self, name: &str) -> Result<VectorStore> {
        self.post("vector_stores", &json!({ "name": name })).await
    }

    async fn retrieve_vector_store(&self, vector_store_id: &str) -> Result<VectorStore> {
        self.get(&format!("vector_stores/{}", vector_store_id))
            .await
    }

    #[instrument(skip(self, path), fields(path = %path.display()))]
    async fn upload_and_poll(&self, vector_store_id: &str, path: &Path) -> Result<FileBatch> {
        let file = self.upload_file(path).await?;
        debug!(file_id = %file.id, "File uploaded");

        let batches = format!("vector_stores/{}/file_batches", vector_store_id);
        let mut batch: FileBatch = self
            .post(&batches, &json!({ "file_ids": [file.id] }))
            .await?;

        while batch.status == BatchStatus::InProgress {
            tokio::time::sleep(self.poll_interval).await;
            batch = self.get(&format!("{}/{}", batches, batch.id)).await?;
            debug!(batch_id = %batch.id, status = ?batch.status, "Polled file batch");
        }

        info!(
            batch_id = %batch.id,
            status = ?batch.status,
            completed = batch.file_counts.completed,
            failed = batch.file_counts.failed,
            total = batch.file_counts.total,
            "File batch finished"
        );

        match batch.status {
            BatchStatus::Completed => Ok(batch),
            status => Err(AppError::Platform(format!(
                "File batch {} finished with status {:?} ({} of {} files failed)",
                batch.id, status, batch.file_counts.failed, batch.file_counts.total
            ))),
        }
    }

    #[instrument(skip(self))]
    async fn attach_vector_store(
        &self,
        assistant_id: &str,
        vector_store_id: &str,
    ) -> Result<Assistant> {
        let body = json!({
            "tool_resources": {
                "file_search": { "vector_store_ids": [vector_store_id] }
            }
        });
        self.post(&format!("assistants/{}", assistant_id), &body)
            .await
    }

    async fn create_thread(&self, question: &str) -> Result<Thread> {
        let body = json!({
            "messages": [{ "role": "user", "content": question }]
        });
        self.post("threads", &body).await
    }

    #[instrument(skip(self))]
    async fn run_and_poll(&self, thread_id: &str, assistant_id: &str) -> Result<Run> {
        let runs = format!("threads/{}/runs", thread_id);
        let mut run: Run = self
            .post(&runs, &json!({ "assistant_id": assistant_id }))
            .await?;

        while !run.status.is_terminal() {
            tokio::time::sleep(self.poll_interval).await;
            run = self.get(&format!("{}/{}", runs, run.id)).await?;
            debug!(run_id = %run.id, status = ?run.status, "Polled run");
        }

        if run.status == RunStatus::Completed {
            info!(run_id = %run.id, "Run completed");
            return Ok(run);
        }

        let reason = run
            .last_error
            .as_ref()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "no error details".to_string());
        Err(AppError::Platform(format!(
            "Run {} ended with status {:?}: {}",
            run.id, run.status, reason
        )))
    }

    async fn list_messages(&self, thread_id: &str, run_id: &str) -> Result<Vec<ThreadMessage>> {
        debug!("Sending GET request to threads/{}/messages", thread_id);
        let request = self
            .request(Method::GET, &format!("threads/{}/messages", thread_id))
            .query(&[("run_id", run_id)]);
        let list: ListResponse<ThreadMessage> = self.execute(request).await?;
        Ok(list.data)
    }

    async fn retrieve_file(&self, file_id: &str) -> Result<FileObject> {
        self.get(&format!("files/{}", file_id)).await
    }
}
