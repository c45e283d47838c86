//! OpenAiPlatform against a mocked Assistants API.

use serde_json::json;
use siteqa::platform::types::{AssistantSpec, BatchStatus, RunStatus};
use siteqa::{OpenAiPlatform, QaPlatform};
use std::io::Write;
use std::time::Duration;
use wiremock::matchers::{bearer_token, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "sk-test";

fn platform(server: &MockServer) -> OpenAiPlatform {
    OpenAiPlatform::new(API_KEY.to_string(), server.uri())
        .expect("client should build")
        .with_poll_interval(Duration::from_millis(5))
}

fn spec() -> AssistantSpec {
    AssistantSpec {
        name: "Question-Answer Assistant".to_string(),
        description: "Answers from scraped pages".to_string(),
        instructions: "Answer only from the stored content.".to_string(),
        model: "gpt-4o-mini".to_string(),
    }
}

#[tokio::test]
async fn test_create_assistant_sends_beta_header_and_file_search_tool() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/assistants"))
        .and(bearer_token(API_KEY))
        .and(header("OpenAI-Beta", "assistants=v2"))
        .and(body_partial_json(json!({
            "name": "Question-Answer Assistant",
            "model": "gpt-4o-mini",
            "tools": [{ "type": "file_search" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "asst_abc",
            "object": "assistant",
            "name": "Question-Answer Assistant",
            "model": "gpt-4o-mini"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let assistant = platform(&server).create_assistant(&spec()).await.unwrap();

    assert_eq!(assistant.id, "asst_abc");
    assert_eq!(assistant.model.as_deref(), Some("gpt-4o-mini"));
}

#[tokio::test]
async fn test_api_error_message_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/assistants/asst_missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "message": "No assistant found with id 'asst_missing'.",
                "type": "invalid_request_error"
            }
        })))
        .mount(&server)
        .await;

    let err = platform(&server)
        .retrieve_assistant("asst_missing")
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Platform error: No assistant found with id 'asst_missing'. (HTTP 404)"
    );
}

#[tokio::test]
async fn test_rate_limited_create_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/assistants"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "message": "Rate limit reached for requests",
                "type": "requests"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = platform(&server).create_assistant(&spec()).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Platform error: Rate limit reached for requests (HTTP 429)"
    );
}

#[tokio::test]
async fn test_upload_and_poll_waits_for_batch_completion() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "file-1",
            "object": "file",
            "filename": "siteqa-corpus.md",
            "purpose": "assistants"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/vector_stores/vs_1/file_batches"))
        .and(body_partial_json(json!({ "file_ids": ["file-1"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "vsfb_1",
            "status": "in_progress",
            "file_counts": { "in_progress": 1, "completed": 0, "failed": 0, "cancelled": 0, "total": 1 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/vector_stores/vs_1/file_batches/vsfb_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "vsfb_1",
            "status": "completed",
            "file_counts": { "in_progress": 0, "completed": 1, "failed": 0, "cancelled": 0, "total": 1 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut corpus = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
    write!(corpus, "contentA\n\n---\n\ncontentB").unwrap();

    let batch = platform(&server)
        .upload_and_poll("vs_1", corpus.path())
        .await
        .unwrap();

    assert_eq!(batch.status, BatchStatus::Completed);
    assert_eq!(batch.file_counts.completed, 1);
}

#[tokio::test]
async fn test_failed_batch_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/files"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": "file-1", "filename": "corpus.md" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/vector_stores/vs_1/file_batches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "vsfb_1",
            "status": "failed",
            "file_counts": { "failed": 1, "total": 1 }
        })))
        .mount(&server)
        .await;

    let corpus = tempfile::Builder::new().suffix(".md").tempfile().unwrap();

    let err = platform(&server)
        .upload_and_poll("vs_1", corpus.path())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("vsfb_1"));
}

#[tokio::test]
async fn test_attach_binds_vector_store_to_file_search() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/assistants/asst_1"))
        .and(body_partial_json(json!({
            "tool_resources": { "file_search": { "vector_store_ids": ["vs_1"] } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "asst_1" })))
        .expect(1)
        .mount(&server)
        .await;

    let assistant = platform(&server)
        .attach_vector_store("asst_1", "vs_1")
        .await
        .unwrap();
    assert_eq!(assistant.id, "asst_1");
}

#[tokio::test]
async fn test_run_and_poll_until_completed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/threads/thread_1/runs"))
        .and(body_partial_json(json!({ "assistant_id": "asst_1" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "run_1", "status": "queued" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    // First poll still running, then completed
    Mock::given(method("GET"))
        .and(path("/threads/thread_1/runs/run_1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": "run_1", "status": "in_progress" })),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/threads/thread_1/runs/run_1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": "run_1", "status": "completed" })),
        )
        .mount(&server)
        .await;

    let run = platform(&server)
        .run_and_poll("thread_1", "asst_1")
        .await
        .unwrap();

    assert_eq!(run.id, "run_1");
    assert_eq!(run.status, RunStatus::Completed);
}

#[tokio::test]
async fn test_failed_run_reports_last_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/threads/thread_1/runs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "run_1",
            "status": "failed",
            "last_error": { "code": "rate_limit_exceeded", "message": "Rate limit reached" }
        })))
        .mount(&server)
        .await;

    let err = platform(&server)
        .run_and_poll("thread_1", "asst_1")
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Platform error: Run run_1 ended with status Failed: Rate limit reached"
    );
}

#[tokio::test]
async fn test_list_messages_filters_by_run() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/threads/thread_1/messages"))
        .and(query_param("run_id", "run_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{
                "id": "msg_2",
                "object": "thread.message",
                "role": "assistant",
                "content": [{
                    "type": "text",
                    "text": {
                        "value": "30 days【4:0†source】",
                        "annotations": [{
                            "type": "file_citation",
                            "text": "【4:0†source】",
                            "start_index": 7,
                            "end_index": 20,
                            "file_citation": { "file_id": "file-1" }
                        }]
                    }
                }]
            }],
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let messages = platform(&server)
        .list_messages("thread_1", "run_1")
        .await
        .unwrap();

    assert_eq!(messages.len(), 1);
    let text = messages[0].first_text().unwrap();
    assert_eq!(text.value, "30 days【4:0†source】");
    assert_eq!(
        text.annotations[0].file_citation.as_ref().unwrap().file_id,
        "file-1"
    );
}

#[tokio::test]
async fn test_retrieve_file_and_thread_creation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/files/file-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "file-1",
            "filename": "siteqa-abc.md"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/threads"))
        .and(body_partial_json(json!({
            "messages": [{ "role": "user", "content": "What is the return policy?" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "thread_1" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = platform(&server);
    let file = client.retrieve_file("file-1").await.unwrap();
    let thread = client
        .create_thread("What is the return policy?")
        .await
        .unwrap();

    assert_eq!(file.filename, "siteqa-abc.md");
    assert_eq!(thread.id, "thread_1");
}
