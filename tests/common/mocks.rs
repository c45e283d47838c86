//! Hand-written fakes shared by the integration tests.
//!
//! `MockFetcher` serves fixed Markdown per URL. `MockPlatform` is an
//! in-memory stand-in for the hosted assistant platform that records what it
//! was asked to do.

#![allow(dead_code)]

use async_trait::async_trait;
use siteqa::platform::types::{
    Annotation, Assistant, AssistantSpec, BatchStatus, FileBatch, FileCounts, FileObject,
    MessageContent, MessageText, Run, RunStatus, Thread, ThreadMessage, VectorStore,
};
use siteqa::scrape::{FetchError, PageFetcher};
use siteqa::types::{AppError, Result};
use siteqa::QaPlatform;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Serves fixed content per URL; unknown URLs fail.
#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, String>,
    pub warmups: AtomicUsize,
    pub fetched: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, content: &str) -> Self {
        self.pages.insert(url.to_string(), content.to_string());
        self
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn warmup(&self) -> std::result::Result<(), FetchError> {
        self.warmups.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn fetch_markdown(&self, url: &str) -> std::result::Result<String, FetchError> {
        self.fetched.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError("connection refused".to_string()))
    }
}

/// In-memory assistant platform.
pub struct MockPlatform {
    answer: MessageText,
    files: HashMap<String, String>,
    pub assistants: Mutex<Vec<String>>,
    pub vector_stores: Mutex<Vec<String>>,
    pub uploads: Mutex<Vec<String>>,
    pub attached: Mutex<Vec<(String, String)>>,
    pub questions: Mutex<Vec<String>>,
}

impl MockPlatform {
    /// Platform whose runs answer with `answer` and no annotations.
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: MessageText {
                value: answer.to_string(),
                annotations: Vec::new(),
            },
            files: HashMap::new(),
            assistants: Mutex::new(Vec::new()),
            vector_stores: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
            attached: Mutex::new(Vec::new()),
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Add a file citation to the answer, resolving `file_id` to `filename`.
    pub fn with_citation(mut self, text: &str, file_id: &str, filename: &str) -> Self {
        self.answer.annotations.push(Annotation::citation(text, file_id));
        self.files.insert(file_id.to_string(), filename.to_string());
        self
    }

    fn known(list: &Mutex<Vec<String>>, id: &str) -> bool {
        list.lock().unwrap().iter().any(|known| known == id)
    }
}

#[async_trait]
impl QaPlatform for MockPlatform {
    async fn create_assistant(&self, spec: &AssistantSpec) -> Result<Assistant> {
        let mut assistants = self.assistants.lock().unwrap();
        let id = format!("asst_{}", assistants.len() + 1);
        assistants.push(id.clone());
        Ok(Assistant {
            id,
            name: Some(spec.name.clone()),
            model: Some(spec.model.clone()),
        })
    }

    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant> {
        if !Self::known(&self.assistants, assistant_id) {
            return Err(AppError::Platform(format!(
                "No assistant found with id '{}'. (HTTP 404)",
                assistant_id
            )));
        }
        Ok(Assistant {
            id: assistant_id.to_string(),
            name: None,
            model: None,
        })
    }

    async fn create_vector_store(&self, name: &str) -> Result<VectorStore> {
        let mut stores = self.vector_stores.lock().unwrap();
        let id = format!("vs_{}", stores.len() + 1);
        stores.push(id.clone());
        Ok(VectorStore {
            id,
            name: Some(name.to_string()),
        })
    }

    async fn retrieve_vector_store(&self, vector_store_id: &str) -> Result<VectorStore> {
        if !Self::known(&self.vector_stores, vector_store_id) {
            return Err(AppError::Platform(format!(
                "No vector store found with id '{}'. (HTTP 404)",
                vector_store_id
            )));
        }
        Ok(VectorStore {
            id: vector_store_id.to_string(),
            name: None,
        })
    }

    async fn upload_and_poll(&self, _vector_store_id: &str, path: &Path) -> Result<FileBatch> {
        let content = std::fs::read_to_string(path)?;
        self.uploads.lock().unwrap().push(content);
        Ok(FileBatch {
            id: "vsfb_1".to_string(),
            status: BatchStatus::Completed,
            file_counts: FileCounts {
                completed: 1,
                total: 1,
                ..Default::default()
            },
        })
    }

    async fn attach_vector_store(
        &self,
        assistant_id: &str,
        vector_store_id: &str,
    ) -> Result<Assistant> {
        self.attached
            .lock()
            .unwrap()
            .push((assistant_id.to_string(), vector_store_id.to_string()));
        self.retrieve_assistant(assistant_id).await
    }

    async fn create_thread(&self, question: &str) -> Result<Thread> {
        self.questions.lock().unwrap().push(question.to_string());
        Ok(Thread {
            id: "thread_1".to_string(),
        })
    }

    async fn run_and_poll(&self, _thread_id: &str, _assistant_id: &str) -> Result<Run> {
        Ok(Run {
            id: "run_1".to_string(),
            status: RunStatus::Completed,
            last_error: None,
        })
    }

    async fn list_messages(&self, _thread_id: &str, _run_id: &str) -> Result<Vec<ThreadMessage>> {
        Ok(vec![ThreadMessage {
            id: "msg_1".to_string(),
            role: Some("assistant".to_string()),
            content: vec![MessageContent::Text {
                text: self.answer.clone(),
            }],
        }])
    }

    async fn retrieve_file(&self, file_id: &str) -> Result<FileObject> {
        let filename = self
            .files
            .get(file_id)
            .cloned()
            .ok_or_else(|| AppError::Platform(format!("No such File object: {}", file_id)))?;
        Ok(FileObject {
            id: file_id.to_string(),
            filename,
        })
    }
}
