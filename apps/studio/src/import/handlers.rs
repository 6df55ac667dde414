//! Axum route handlers for CV import.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use super::{confirm_import, preview_from_parsed, ImportPreview};
use crate::errors::AppError;
use crate::models::section::Section;
use crate::session::{EditorSession, SessionView};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ImportConfirmRequest {
    pub title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

struct Upload {
    file_name: String,
    content_type: Option<String>,
    bytes: Bytes,
}

/// First file part of the form, preferring the one named `file`.
async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    let mut fallback = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let named_file = field.name() == Some("file");
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
        let upload = Upload {
            file_name,
            content_type,
            bytes,
        };
        if named_file {
            return Ok(upload);
        }
        fallback.get_or_insert(upload);
    }
    fallback.ok_or_else(|| AppError::Validation("A file field is required".to_string()))
}

/// POST /api/v1/imports
///
/// Sends the uploaded CV to the parser and returns the draft. Nothing is stored yet.
pub async fn handle_import_preview(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ImportPreview>, AppError> {
    let upload = read_upload(multipart).await?;
    if upload.bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    info!(
        "Parsing imported CV {} ({} bytes)",
        upload.file_name,
        upload.bytes.len()
    );

    let parsed = state
        .backend
        .parse_cv(&upload.file_name, upload.content_type.as_deref(), upload.bytes)
        .await?;
    Ok(Json(preview_from_parsed(&upload.file_name, parsed)))
}

/// POST /api/v1/imports/confirm
///
/// Stores the confirmed draft and opens an editing session on it.
pub async fn handle_import_confirm(
    State(state): State<AppState>,
    Json(req): Json<ImportConfirmRequest>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    let resume = confirm_import(state.backend.as_ref(), &req.title, req.sections).await?;
    let session = EditorSession::open(state.backend.clone(), state.settings.clone(), resume);
    let session = state.registry.insert(session).await;
    Ok((StatusCode::CREATED, Json(session.view())))
}
