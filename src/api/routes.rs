use crate::AppState;
use crate::api::handlers::{ask, health, scrape};
use crate::types::{AskRequest, AskResponse, ErrorBody, ScrapeRequest, ScrapeResponse, UrlInput};
use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

/// OpenAPI description of the public surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        scrape::scrape_and_upsert,
        ask::ask_question,
        health::health,
    ),
    components(schemas(
        UrlInput,
        ScrapeRequest,
        ScrapeResponse,
        AskRequest,
        AskResponse,
        ErrorBody,
        health::HealthResponse,
    )),
    tags(
        (name = "index", description = "Scrape pages into a hosted assistant"),
        (name = "query", description = "Ask questions against scraped content"),
        (name = "health", description = "Service status"),
    ),
    info(title = "SiteQA", description = "Scrape web pages and answer questions over them")
)]
pub struct ApiDoc;

/// Request bodies are small JSON documents.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/scrape_and_upsert", post(scrape::scrape_and_upsert))
        .route("/ask_question", post(ask::ask_question))
        .route("/health", get(health::health))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}
