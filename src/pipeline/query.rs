//! Question answering against a provisioned assistant.

use crate::platform::types::MessageText;
use crate::platform::QaPlatform;
use crate::types::{AppError, Result};
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Ask `question` through the given assistant and return the answer with
/// citation markers rewritten and the reference list appended.
#[instrument(skip(platform, question), fields(question_len = question.len()))]
pub async fn ask(
    platform: &dyn QaPlatform,
    assistant_id: &str,
    vector_store_id: &str,
    question: &str,
) -> Result<String> {
    let start = Instant::now();

    // Unknown identifiers are rejected here by the platform.
    let assistant = platform.retrieve_assistant(assistant_id).await?;
    let vector_store = platform.retrieve_vector_store(vector_store_id).await?;
    debug!(assistant_id = %assistant.id, vector_store_id = %vector_store.id, "Identifiers resolved");

    let thread = platform.create_thread(question).await?;
    let run = platform.run_and_poll(&thread.id, &assistant.id).await?;
    let messages = platform.list_messages(&thread.id, &run.id).await?;

    let message = messages.first().ok_or_else(|| {
        AppError::Platform(format!("Run {} produced no messages", run.id))
    })?;
    let text = message.first_text().ok_or_else(|| {
        AppError::Platform(format!("Message {} has no text content", message.id))
    })?;

    let answer = apply_citations(platform, text).await?;

    info!(
        thread_id = %thread.id,
        run_id = %run.id,
        annotations = text.annotations.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Question answered"
    );

    Ok(answer)
}

/// Replace each annotation's text with `[i]` and append `"[i] filename"` for
/// every file citation, in annotation order.
pub async fn apply_citations(platform: &dyn QaPlatform, text: &MessageText) -> Result<String> {
    let mut value = text.value.clone();
    let mut references = Vec::with_capacity(text.annotations.len());

    for (index, annotation) in text.annotations.iter().enumerate() {
        if !annotation.text.is_empty() {
            value = value.replace(&annotation.text, &format!("[{}]", index));
        }

        if let Some(citation) = &annotation.file_citation {
            let file = platform.retrieve_file(&citation.file_id).await?;
            references.push(format!("[{}] {}", index, file.filename));
        }
    }

    Ok(format!("{}\n\n{}", value, references.join("\n")))
}
