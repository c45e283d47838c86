//! Corpus assembly on the remote platform.

use crate::platform::types::AssistantSpec;
use crate::platform::QaPlatform;
use crate::types::Result;
use crate::utils::toml_config::OpenAiConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// How new assistants and vector stores are created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantProfile {
    pub assistant: AssistantSpec,
    pub vector_store_name: String,
}

impl AssistantProfile {
    pub fn from_config(config: &OpenAiConfig) -> Self {
        Self {
            assistant: AssistantSpec {
                name: config.assistant_name.clone(),
                description: config.assistant_description.clone(),
                instructions: config.instructions.clone(),
                model: config.model.clone(),
            },
            vector_store_name: config.vector_store_name.clone(),
        }
    }
}

impl Default for AssistantProfile {
    fn default() -> Self {
        Self::from_config(&OpenAiConfig::default())
    }
}

/// Identifiers of a freshly provisioned assistant / vector store pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provisioned {
    pub assistant_id: String,
    pub vector_store_id: String,
}

/// Create an assistant and a vector store, ingest the corpus, and bind the two.
///
/// Resources created before a failing step are left on the platform.
#[instrument(skip(platform, profile, corpus_path))]
pub async fn provision(
    platform: &dyn QaPlatform,
    profile: &AssistantProfile,
    corpus_path: &Path,
) -> Result<Provisioned> {
    let start = Instant::now();

    let assistant = platform.create_assistant(&profile.assistant).await?;
    info!(assistant_id = %assistant.id, "Assistant created");

    let vector_store = platform
        .create_vector_store(&profile.vector_store_name)
        .await
        .inspect_err(|_| {
            warn!(assistant_id = %assistant.id, "Vector store creation failed; assistant left in place");
        })?;
    info!(vector_store_id = %vector_store.id, "Vector store created");

    let leaked = |stage: &str| {
        warn!(
            assistant_id = %assistant.id,
            vector_store_id = %vector_store.id,
            stage,
            "Provisioning failed; remote resources left in place"
        );
    };

    let batch = platform
        .upload_and_poll(&vector_store.id, corpus_path)
        .await
        .inspect_err(|_| leaked("ingestion"))?;
    info!(
        batch_id = %batch.id,
        files = batch.file_counts.completed,
        "Corpus ingested"
    );

    platform
        .attach_vector_store(&assistant.id, &vector_store.id)
        .await
        .inspect_err(|_| leaked("attach"))?;

    info!(
        assistant_id = %assistant.id,
        vector_store_id = %vector_store.id,
        duration_ms = start.elapsed().as_millis() as u64,
        "Assistant provisioned"
    );

    Ok(Provisioned {
        assistant_id: assistant.id,
        vector_store_id: vector_store.id,
    })
}
