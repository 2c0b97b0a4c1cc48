use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::progress::ProgressError;

/// Errors surfaced by the HTTP and WebSocket layer.
///
/// The engine itself never fails; these cover lookups, locked levels and the
/// progress store.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Level {0} is locked")]
    LevelLocked(u32),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No puzzle in progress")]
    NoActivePuzzle,

    #[error("Progress store error: {0}")]
    Progress(#[from] ProgressError),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::LevelLocked(_) => "LEVEL_LOCKED",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NoActivePuzzle => "NO_ACTIVE_PUZZLE",
            AppError::Progress(_) => "PROGRESS_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::LevelLocked(_) => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NoActivePuzzle => StatusCode::CONFLICT,
            AppError::Progress(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
