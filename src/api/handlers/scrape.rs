use crate::{
    AppState,
    types::{AppError, ErrorBody, Result, ScrapeRequest, ScrapeResponse},
};
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use std::time::Instant;
use tracing::info;

/// Scrape one or more URLs and provision an assistant over the content
#[utoipa::path(
    post,
    path = "/scrape_and_upsert",
    request_body = ScrapeRequest,
    responses(
        (status = 200, description = "Assistant and vector store created", body = ScrapeResponse),
        (status = 422, description = "Malformed request body", body = ErrorBody),
        (status = 500, description = "Scrape or platform failure", body = ErrorBody)
    ),
    tag = "index"
)]
pub async fn scrape_and_upsert(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<ScrapeResponse>> {
    let Json(payload) = payload.map_err(AppError::from)?;
    let urls = payload.into_urls()?;
    let start = Instant::now();

    let provisioned = state.pipeline.scrape_and_index(&urls).await?;

    info!(
        urls = urls.len(),
        assistant_id = %provisioned.assistant_id,
        vector_store_id = %provisioned.vector_store_id,
        duration_ms = start.elapsed().as_millis() as u64,
        "Scrape and upsert finished"
    );

    Ok(Json(ScrapeResponse {
        message: format!(
            "Successfully scraped content from {} URLs and created assistant and vector store.",
            urls.len()
        ),
        assistant_id: provisioned.assistant_id,
        vector_store_id: provisioned.vector_store_id,
    }))
}
