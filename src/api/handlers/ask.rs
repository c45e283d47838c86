use crate::{
    AppState,
    types::{AppError, AskParams, AskRequest, AskResponse, ErrorBody, Result},
};
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};

/// Ask a question against previously scraped content
#[utoipa::path(
    post,
    path = "/ask_question",
    params(AskParams),
    request_body = AskRequest,
    responses(
        (status = 200, description = "Answer with citation markers and references", body = AskResponse),
        (status = 422, description = "Missing identifiers or malformed body", body = ErrorBody),
        (status = 500, description = "Platform failure or unknown identifiers", body = ErrorBody)
    ),
    tag = "query"
)]
pub async fn ask_question(
    State(state): State<AppState>,
    params: std::result::Result<Query<AskParams>, QueryRejection>,
    payload: std::result::Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>> {
    let Query(params) = params.map_err(AppError::from)?;
    let Json(payload) = payload.map_err(AppError::from)?;

    let answer = state
        .pipeline
        .ask(&params.assistant_id, &params.vector_store_id, &payload.question)
        .await?;

    Ok(Json(AskResponse { answer }))
}
