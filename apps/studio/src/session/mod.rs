//! Editing session: the authoritative in-memory resume and its sync with the backend.
//!
//! Local state changes synchronously inside each call. Backend calls run after
//! the change, with a snapshot taken when they are dispatched, and never hold
//! the state lock across an await.

mod autosave;
pub mod handlers;
pub mod notice;
pub mod registry;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backend::transform::{convert_server_section, transform_resume_to_cv};
use crate::backend::{BackendError, ResumeBackend};
use crate::editors::SectionEdit;
use crate::models::resume::{DocumentError, Resume, SaveStatus, TemplateStyle};
use crate::models::section::{Section, SectionBody, SectionKind};
use crate::models::server::{NewSection, ResumeUpdate};
use crate::panel::catalog::{self, CatalogItem};
use crate::panel::{EditorPanel, PanelError, PanelItem};
use crate::render;
use crate::review::{self, ReviewReport};

use self::notice::Notice;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Panel(#[from] PanelError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Session {0} not found")]
    NotFound(Uuid),

    #[error("Resume has not been persisted yet")]
    NotPersisted,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Quiet window before an autosave fires.
    pub debounce: Duration,
    /// Restore the previous order when the reorder call fails.
    pub rollback_failed_reorder: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(5000),
            rollback_failed_reorder: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTrigger {
    Auto,
    Manual,
    /// Final save of a session being closed or expired.
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    Saved,
    /// Persisted, but edits made while in flight still need saving.
    SavedOutdated,
    Failed,
    /// A newer save was dispatched before this one answered.
    Stale,
    /// Resume has no backend id yet.
    Skipped,
}

struct SessionState {
    resume: Resume,
    panel: EditorPanel,
    status: SaveStatus,
    /// Bumped by every document mutation.
    revision: u64,
    /// Bumped by every save dispatch.
    save_seq: u64,
    notices: Vec<Notice>,
}

pub(crate) struct SessionCore {
    state: Mutex<SessionState>,
    backend: Arc<dyn ResumeBackend>,
    settings: SessionSettings,
}

impl SessionCore {
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn save(&self, trigger: SaveTrigger) -> SaveOutcome {
        let (seq, revision, id, update) = {
            let mut state = self.lock();
            if state.resume.id.is_empty() {
                debug!("Skipping {trigger:?} save of a resume without id");
                return SaveOutcome::Skipped;
            }
            state.save_seq += 1;
            state.status = SaveStatus::Saving;
            let update = ResumeUpdate {
                title: state.resume.title.clone(),
                data: transform_resume_to_cv(&state.resume),
            };
            (state.save_seq, state.revision, state.resume.id.clone(), update)
        };

        info!("Saving resume {id} ({trigger:?}, seq {seq}, revision {revision})");
        let result = self.backend.update_resume(&id, update).await;

        let mut state = self.lock();
        if seq != state.save_seq {
            debug!(
                "Discarding stale save response seq {seq} (latest {})",
                state.save_seq
            );
            return SaveOutcome::Stale;
        }

        match result {
            Ok(()) if state.revision == revision => {
                state.status = SaveStatus::Saved;
                if trigger == SaveTrigger::Manual {
                    state.notices.push(Notice::success(notice::SAVE_SUCCEEDED));
                }
                info!("Saved resume {id} at revision {revision}");
                SaveOutcome::Saved
            }
            Ok(()) => {
                state.status = SaveStatus::Unsaved;
                debug!(
                    "Saved revision {revision} of {id}, document is now at {}",
                    state.revision
                );
                SaveOutcome::SavedOutdated
            }
            Err(e) => {
                warn!("Saving resume {id} failed: {e}");
                state.status = SaveStatus::Unsaved;
                state.notices.push(Notice::error(notice::SAVE_FAILED));
                SaveOutcome::Failed
            }
        }
    }
}

/// What a client needs to draw the editor after any gesture.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub resume: Resume,
    pub status: SaveStatus,
    pub revision: u64,
    pub onboarding: bool,
    pub open_key: Option<String>,
    pub items: Vec<PanelItem>,
    /// Non-blocking: saves go through regardless.
    pub warnings: Vec<String>,
    pub notices: Vec<Notice>,
}

pub struct EditorSession {
    id: Uuid,
    core: Arc<SessionCore>,
    edits: mpsc::UnboundedSender<()>,
}

impl EditorSession {
    /// Starts a session on `resume` and its autosave loop. Must run inside a tokio runtime.
    pub fn open(backend: Arc<dyn ResumeBackend>, settings: SessionSettings, resume: Resume) -> Self {
        let id = Uuid::new_v4();
        let panel = EditorPanel::new(&resume);
        let quiet = settings.debounce;
        let core = Arc::new(SessionCore {
            state: Mutex::new(SessionState {
                resume,
                panel,
                status: SaveStatus::Saved,
                revision: 0,
                save_seq: 0,
                notices: Vec::new(),
            }),
            backend,
            settings,
        });

        let (edits, rx) = mpsc::unbounded_channel();
        tokio::spawn(autosave::run(Arc::clone(&core), rx, quiet));
        info!("Opened editing session {id}");

        Self { id, core, edits }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> SaveStatus {
        self.core.lock().status
    }

    pub fn resume(&self) -> Resume {
        self.core.lock().resume.clone()
    }

    /// Current view; pending notices are handed out once.
    pub fn view(&self) -> SessionView {
        let mut state = self.core.lock();
        let notices = std::mem::take(&mut state.notices);
        SessionView {
            session_id: self.id,
            resume: state.resume.clone(),
            status: state.status,
            revision: state.revision,
            onboarding: state.panel.onboarding(),
            open_key: state.panel.open_key().map(str::to_string),
            items: state.panel.items(&state.resume),
            warnings: profile_warnings(&state.resume),
            notices,
        }
    }

    fn commit(&self, state: &mut SessionState, resume: Resume) {
        state.resume = resume;
        state.revision += 1;
        state.status = SaveStatus::Unsaved;
        state.panel.observe(&state.resume);
        if self.edits.send(()).is_err() {
            warn!("Autosave loop of session {} is gone", self.id);
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Local gestures
    // ────────────────────────────────────────────────────────────────────────

    /// Replaces the loaded sections with an explicit draft (e.g. an import preview).
    pub fn load_draft(&self, sections: Vec<Section>) -> Result<(), SessionError> {
        let mut state = self.core.lock();
        let mut next = state.resume.clone();
        next.set_sections(sections).map_err(PanelError::from)?;
        next.touch();
        self.commit(&mut state, next);
        Ok(())
    }

    pub fn skip_onboarding(&self) -> Result<(), SessionError> {
        let mut state = self.core.lock();
        let next = {
            let SessionState { resume, panel, .. } = &mut *state;
            panel.skip_onboarding(resume)?
        };
        self.commit(&mut state, next);
        Ok(())
    }

    pub fn save_full_name(&self, name: &str) -> Result<(), SessionError> {
        let mut state = self.core.lock();
        let next = {
            let SessionState { resume, panel, .. } = &mut *state;
            panel.save_full_name(resume, name)?
        };
        self.commit(&mut state, next);
        Ok(())
    }

    pub fn update_section(&self, index: usize, section: Section) -> Result<(), SessionError> {
        let mut state = self.core.lock();
        let next = state.panel.update_section(&state.resume, index, section)?;
        self.commit(&mut state, next);
        Ok(())
    }

    pub fn edit_section(&self, index: usize, edit: SectionEdit) -> Result<(), SessionError> {
        let mut state = self.core.lock();
        let next = state.panel.edit_section(&state.resume, index, edit)?;
        self.commit(&mut state, next);
        Ok(())
    }

    pub fn toggle(&self, key: &str) {
        self.core.lock().panel.toggle(key);
    }

    pub fn catalog(&self) -> Vec<CatalogItem> {
        catalog::catalog(&self.core.lock().resume)
    }

    /// Renders the current document; `None` uses the resume's own template.
    pub fn preview(&self, template: Option<TemplateStyle>) -> String {
        let state = self.core.lock();
        render::render(&state.resume, template.unwrap_or(state.resume.template))
    }

    // ────────────────────────────────────────────────────────────────────────
    // Gestures with a backend round-trip
    // ────────────────────────────────────────────────────────────────────────

    /// Creates a section of `kind` on the backend and appends the confirmed row.
    pub async fn add_section(&self, kind: SectionKind) -> Result<Section, SessionError> {
        let (resume_id, seed) = {
            let mut state = self.core.lock();
            if catalog::is_section_added(&state.resume, kind) {
                state.notices.push(Notice::error(notice::ADD_FAILED));
                return Err(PanelError::from(DocumentError::DuplicateSection(kind)).into());
            }
            if state.resume.id.is_empty() {
                state.notices.push(Notice::error(notice::ADD_FAILED));
                return Err(SessionError::NotPersisted);
            }
            let body = SectionBody::empty(kind);
            let seed = NewSection {
                kind: kind.as_str().to_string(),
                title: kind.default_title().to_string(),
                content: body.content(),
                order: state.resume.len(),
            };
            (state.resume.id.clone(), seed)
        };

        let title = seed.title.clone();
        let created = match self.core.backend.create_section(&resume_id, seed).await {
            Ok(row) => row,
            Err(e) => {
                warn!("Creating {} section on {resume_id} failed: {e}", kind.as_str());
                self.core.lock().notices.push(Notice::error(notice::ADD_FAILED));
                return Err(e.into());
            }
        };
        let section = convert_server_section(&created).normalized();
        info!(
            "Added {} section {} to resume {resume_id}",
            section.kind().as_str(),
            created.id
        );

        let mut state = self.core.lock();
        let mut next = state.resume.clone();
        if let Err(e) = next.push_section(section.clone()) {
            // the same kind was added while the call was in flight
            state.notices.push(Notice::error(notice::ADD_FAILED));
            return Err(PanelError::from(e).into());
        }
        next.touch();
        self.commit(&mut state, next);
        state.notices.push(Notice::success(notice::section_added(&title)));
        Ok(section)
    }

    /// Removes the section locally, then deletes its backend row if it has one.
    pub async fn delete_section(&self, index: usize) -> Result<(), SessionError> {
        let deletion = {
            let mut state = self.core.lock();
            let deletion = state.panel.delete_section(&state.resume, index)?;
            self.commit(&mut state, deletion.resume.clone());
            deletion
        };

        let Some(remote_id) = deletion.remote_id else {
            debug!(
                "Removed unsaved {} section locally",
                deletion.removed.kind().as_str()
            );
            return Ok(());
        };

        match self.core.backend.delete_section(&remote_id).await {
            Ok(()) => {
                info!("Deleted section {remote_id}");
                self.core.lock().notices.push(Notice::success(notice::DELETE_SUCCEEDED));
                Ok(())
            }
            Err(e) => {
                warn!("Deleting section {remote_id} failed: {e}");
                self.core.lock().notices.push(Notice::error(notice::DELETE_FAILED));
                Err(e.into())
            }
        }
    }

    /// Drag end. Returns whether anything moved.
    ///
    /// The new order is committed before the backend call. On failure the local
    /// order stays unless rollback is enabled and nothing else changed since.
    pub async fn reorder(&self, dragged: &str, target: Option<&str>) -> Result<bool, SessionError> {
        let (resume_id, previous, order, revision) = {
            let mut state = self.core.lock();
            let Some(reorder) = state.panel.drag_end(&state.resume, dragged, target)? else {
                return Ok(false);
            };
            let previous = state.resume.sections().to_vec();
            self.commit(&mut state, reorder.resume);
            (state.resume.id.clone(), previous, reorder.order, state.revision)
        };

        if order.is_empty() || resume_id.is_empty() {
            return Ok(true);
        }

        let result = self.core.backend.reorder_sections(&resume_id, order).await;
        let Err(e) = result else {
            debug!("Persisted section order of {resume_id}");
            return Ok(true);
        };

        warn!("Reordering sections of {resume_id} failed: {e}");
        let mut state = self.core.lock();
        state.notices.push(Notice::error(notice::REORDER_FAILED));
        if self.core.settings.rollback_failed_reorder && state.revision == revision {
            let mut restored = state.resume.clone();
            restored.set_sections(previous).map_err(PanelError::from)?;
            self.commit(&mut state, restored);
            info!("Rolled back section order of {resume_id}");
        }
        Err(e.into())
    }

    /// Manual save: immediate, independent of the debounce and of other saves in flight.
    pub async fn save(&self) -> SaveOutcome {
        self.core.save(SaveTrigger::Manual).await
    }

    /// Saves edits that have not reached the backend yet, for a session that is
    /// going away. `None` when the document was already saved.
    pub async fn flush(&self) -> Option<SaveOutcome> {
        if self.status() == SaveStatus::Saved {
            return None;
        }
        Some(self.core.save(SaveTrigger::Close).await)
    }

    /// Requests an AI review of the stored resume and parses whatever comes back.
    pub async fn review(&self) -> Result<ReviewReport, SessionError> {
        let resume_id = self.core.lock().resume.id.clone();
        if resume_id.is_empty() {
            return Err(SessionError::NotPersisted);
        }
        let text = self.core.backend.review_resume(&resume_id).await?;
        Ok(review::parse_review(&text))
    }
}

fn profile_warnings(resume: &Resume) -> Vec<String> {
    let Some(Section {
        body: SectionBody::Profile { data },
        ..
    }) = resume.find(SectionKind::Profile)
    else {
        return Vec::new();
    };

    let mut warnings = Vec::new();
    if data.name.trim().is_empty() {
        warnings.push("Profile name is empty".to_string());
    }
    if data.email.trim().is_empty() {
        warnings.push("Profile email is empty".to_string());
    }
    warnings
}
