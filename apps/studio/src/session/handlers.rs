//! Axum route handlers for editing sessions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::{EditorSession, SaveOutcome, SessionView};
use crate::backend::transform::convert_server_resume;
use crate::editors::SectionEdit;
use crate::errors::AppError;
use crate::models::resume::{SaveStatus, TemplateStyle};
use crate::models::section::{Section, SectionKind};
use crate::panel::catalog::CatalogItem;
use crate::review::ReviewReport;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OpenSessionRequest {
    pub resume_id: String,
    /// Replaces the loaded sections, e.g. with an import preview.
    #[serde(default)]
    pub draft: Option<Vec<Section>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OnboardingRequest {
    /// `None` or blank means "skip".
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddSectionRequest {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub dragged: String,
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub key: String,
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    pub template: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub outcome: SaveOutcome,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct CloseResponse {
    pub session_id: Uuid,
    /// Outcome of the final save; `None` when nothing was pending.
    pub flushed: Option<SaveOutcome>,
    pub status: SaveStatus,
}

#[derive(Debug, Serialize)]
pub struct AddSectionResponse {
    pub section: Section,
    pub session: SessionView,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
///
/// Loads the resume from the backend and opens an editing session on it.
pub async fn handle_open_session(
    State(state): State<AppState>,
    Json(req): Json<OpenSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    if req.resume_id.trim().is_empty() {
        return Err(AppError::Validation("resume_id cannot be empty".to_string()));
    }

    let server = state.backend.get_resume(&req.resume_id).await?;
    let resume = convert_server_resume(server);
    info!(
        "Loaded resume {} with {} sections",
        resume.id,
        resume.len()
    );

    let session = EditorSession::open(state.backend.clone(), state.settings.clone(), resume);
    if let Some(draft) = req.draft {
        session.load_draft(draft)?;
    }
    let session = state.registry.insert(session).await;
    Ok((StatusCode::CREATED, Json(session.view())))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.registry.get(id).await?;
    Ok(Json(session.view()))
}

/// DELETE /api/v1/sessions/:id
///
/// Closes the session, saving edits the autosave has not persisted yet.
pub async fn handle_close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CloseResponse>, AppError> {
    let session = state.registry.remove(id).await?;
    let flushed = session.flush().await;
    let status = session.status();
    if status == SaveStatus::Saved {
        info!("Closed editing session {id}");
    } else {
        warn!("Closed editing session {id} with unsaved edits ({flushed:?})");
    }
    Ok(Json(CloseResponse {
        session_id: id,
        flushed,
        status,
    }))
}

/// POST /api/v1/sessions/:id/onboarding
pub async fn handle_onboarding(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<OnboardingRequest>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.registry.get(id).await?;
    match req.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => session.save_full_name(name)?,
        _ => session.skip_onboarding()?,
    }
    Ok(Json(session.view()))
}

/// PUT /api/v1/sessions/:id/sections/:index
///
/// Whole-section replacement from an editor.
pub async fn handle_update_section(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(section): Json<Section>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.registry.get(id).await?;
    session.update_section(index, section)?;
    Ok(Json(session.view()))
}

/// POST /api/v1/sessions/:id/sections/:index/edits
pub async fn handle_edit_section(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(edit): Json<SectionEdit>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.registry.get(id).await?;
    session.edit_section(index, edit)?;
    Ok(Json(session.view()))
}

/// POST /api/v1/sessions/:id/sections
pub async fn handle_add_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddSectionRequest>,
) -> Result<(StatusCode, Json<AddSectionResponse>), AppError> {
    let kind = SectionKind::parse(&req.kind)
        .ok_or_else(|| AppError::Validation(format!("Unknown section type '{}'", req.kind)))?;
    let session = state.registry.get(id).await?;
    let section = session.add_section(kind).await?;
    Ok((
        StatusCode::CREATED,
        Json(AddSectionResponse {
            section,
            session: session.view(),
        }),
    ))
}

/// DELETE /api/v1/sessions/:id/sections/:index
pub async fn handle_delete_section(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.registry.get(id).await?;
    session.delete_section(index).await?;
    Ok(Json(session.view()))
}

/// POST /api/v1/sessions/:id/reorder
pub async fn handle_reorder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.registry.get(id).await?;
    session.reorder(&req.dragged, req.target.as_deref()).await?;
    Ok(Json(session.view()))
}

/// POST /api/v1/sessions/:id/toggle
pub async fn handle_toggle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.registry.get(id).await?;
    session.toggle(&req.key);
    Ok(Json(session.view()))
}

/// POST /api/v1/sessions/:id/save
///
/// Immediate save. Failures are reported through the outcome and the notices,
/// not as an error status.
pub async fn handle_save(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SaveResponse>, AppError> {
    let session = state.registry.get(id).await?;
    let outcome = session.save().await;
    Ok(Json(SaveResponse {
        outcome,
        session: session.view(),
    }))
}

/// GET /api/v1/sessions/:id/catalog
pub async fn handle_catalog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CatalogItem>>, AppError> {
    let session = state.registry.get(id).await?;
    Ok(Json(session.catalog()))
}

/// GET /api/v1/sessions/:id/preview?template=classic
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PreviewQuery>,
) -> Result<Html<String>, AppError> {
    let template = match query.template.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(
            TemplateStyle::parse(raw)
                .ok_or_else(|| AppError::Validation(format!("Unknown template '{raw}'")))?,
        ),
    };
    let session = state.registry.get(id).await?;
    Ok(Html(session.preview(template)))
}

/// POST /api/v1/sessions/:id/review
pub async fn handle_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReviewReport>, AppError> {
    let session = state.registry.get(id).await?;
    Ok(Json(session.review().await?))
}
