use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{reviews::StoreError, tmdb::FetchError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("catalog request failed: {0}")]
    Upstream(#[from] FetchError),
    #[error("review store failed: {0}")]
    Store(StoreError),
    #[error("{0}")]
    NotFound(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            missing @ StoreError::NotFound { .. } => Self::NotFound(missing.to_string()),
            other => Self::Store(other),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short text shown to the visitor; upstream and database details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            Self::Upstream(_) => "Error fetching movie data".to_string(),
            Self::Store(_) => "Error accessing reviews".to_string(),
            Self::NotFound(message) => message.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        let body = crate::templates::error_page(&self.public_message());
        (status, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
