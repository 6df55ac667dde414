use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::backend::BackendError;
use crate::editors::EditError;
use crate::models::resume::DocumentError;
use crate::panel::PanelError;
use crate::session::SessionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<BackendError> for AppError {
    fn from(e: BackendError) -> Self {
        match e.status() {
            Some(404) => AppError::NotFound(e.to_string()),
            _ => AppError::Backend(e.to_string()),
        }
    }
}

impl From<PanelError> for AppError {
    fn from(e: PanelError) -> Self {
        let message = e.to_string();
        match e {
            PanelError::Document(DocumentError::DuplicateSection(_)) => AppError::Conflict(message),
            PanelError::Document(DocumentError::IndexOutOfRange { .. }) => {
                AppError::NotFound(message)
            }
            PanelError::Edit(EditError::EntryNotFound(_) | EditError::ItemOutOfRange { .. }) => {
                AppError::NotFound(message)
            }
            PanelError::Edit(EditError::KindMismatch { .. }) => AppError::Validation(message),
            PanelError::ProfileNotDeletable => AppError::UnprocessableEntity(message),
            PanelError::OnboardingClosed => AppError::Conflict(message),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Panel(e) => e.into(),
            SessionError::Backend(e) => e.into(),
            SessionError::NotFound(_) => AppError::NotFound(e.to_string()),
            SessionError::NotPersisted => AppError::UnprocessableEntity(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Backend(msg) => {
                tracing::error!("Backend error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "BACKEND_ERROR",
                    "The resume service request failed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
