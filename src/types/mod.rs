use axum::extract::rejection::{JsonRejection, QueryRejection};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ============= API Request/Response Types =============

/// URLs as accepted on the wire: a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum UrlInput {
    One(String),
    Many(Vec<String>),
}

impl UrlInput {
    /// Normalize to an ordered list; a single string becomes a one-element list.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            UrlInput::One(url) => vec![url],
            UrlInput::Many(urls) => urls,
        }
    }
}

impl From<&str> for UrlInput {
    fn from(url: &str) -> Self {
        UrlInput::One(url.to_string())
    }
}

impl From<Vec<String>> for UrlInput {
    fn from(urls: Vec<String>) -> Self {
        UrlInput::Many(urls)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScrapeRequest {
    pub urls: UrlInput,
}

impl ScrapeRequest {
    /// Normalized, non-empty URL list in request order.
    pub fn into_urls(self) -> Result<Vec<String>> {
        let urls = self.urls.into_vec();
        if urls.is_empty() {
            return Err(AppError::InvalidInput(
                "urls must contain at least one URL".to_string(),
            ));
        }
        Ok(urls)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScrapeResponse {
    pub message: String,
    pub assistant_id: String,
    pub vector_store_id: String,
}

/// Identifiers returned by a previous scrape. The caller owns them; nothing is
/// stored server-side.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AskParams {
    #[serde(alias = "agent_id")]
    pub assistant_id: String,
    #[serde(alias = "namespace_id")]
    pub vector_store_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to scrape {url}: {message}")]
    Scrape { url: String, message: String },

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> axum::http::StatusCode {
        match self {
            AppError::InvalidInput(_) => axum::http::StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Scrape { .. }
            | AppError::Platform(_)
            | AppError::Io(_)
            | AppError::Internal(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Platform(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        let body = ErrorBody {
            detail: self.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
