//! Editor panel: accordion state, onboarding gate and drag reorder.
//!
//! The panel never owns the document. Every gesture takes the current
//! [`Resume`] and returns the next one for the session to commit.

pub mod catalog;
pub mod reorder;

use serde::Serialize;
use thiserror::Error;

use crate::editors::{self, EditError, SectionEdit};
use crate::models::resume::{DocumentError, Resume};
use crate::models::section::{ProfileData, Section, SectionBody, SectionKind};
use crate::models::server::SectionOrder;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PanelError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("The profile section cannot be deleted")]
    ProfileNotDeletable,

    #[error("Onboarding is only available for an empty resume")]
    OnboardingClosed,
}

/// Accordion key of the section at `index`: `"{type}-{index}"`.
pub fn accordion_key(kind: SectionKind, index: usize) -> String {
    format!("{}-{index}", kind.as_str())
}

/// The section opened after the section count changes: profile if present, else the first.
fn default_open_key(resume: &Resume) -> Option<String> {
    let sections = resume.sections();
    let index = sections
        .iter()
        .position(|section| section.kind() == SectionKind::Profile)
        .unwrap_or(0);
    sections
        .get(index)
        .map(|section| accordion_key(section.kind(), index))
}

/// One row of the accordion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelItem {
    pub index: usize,
    pub key: String,
    pub drag_id: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub title: String,
    /// Entry badge; omitted for sections without an `entries` list or with none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub deletable: bool,
    pub open: bool,
}

/// Result of a delete gesture. `remote_id` is set when the backend row must go too.
#[derive(Debug, Clone)]
pub struct Deletion {
    pub resume: Resume,
    pub removed: Section,
    pub remote_id: Option<String>,
}

/// Result of a drag end that moved something.
#[derive(Debug, Clone)]
pub struct Reorder {
    pub resume: Resume,
    pub order: Vec<SectionOrder>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorPanel {
    open_key: Option<String>,
    onboarding: bool,
    seen_count: usize,
}

impl EditorPanel {
    pub fn new(resume: &Resume) -> Self {
        let mut panel = Self {
            open_key: Some(accordion_key(SectionKind::Profile, 0)),
            onboarding: resume.is_empty(),
            seen_count: 0,
        };
        panel.observe(resume);
        panel
    }

    pub fn open_key(&self) -> Option<&str> {
        self.open_key.as_deref()
    }

    pub fn onboarding(&self) -> bool {
        self.onboarding
    }

    /// Called after every commit. Only a change in section count moves the
    /// open section; field edits leave it where the user put it.
    pub fn observe(&mut self, resume: &Resume) {
        if self.seen_count == resume.len() {
            return;
        }

        if resume.is_empty() {
            self.onboarding = true;
        } else {
            self.open_key = default_open_key(resume);
            self.onboarding = false;
        }
        self.seen_count = resume.len();
    }

    pub fn toggle(&mut self, key: &str) {
        if self.open_key.as_deref() == Some(key) {
            self.open_key = None;
        } else {
            self.open_key = Some(key.to_string());
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Onboarding
    // ────────────────────────────────────────────────────────────────────────

    /// "Skip": a single blank profile, opened.
    pub fn skip_onboarding(&mut self, resume: &Resume) -> Result<Resume, PanelError> {
        self.start_with_profile(resume, ProfileData::named(""))
    }

    /// "Save": a profile pre-filled with `name`, opened.
    pub fn save_full_name(&mut self, resume: &Resume, name: &str) -> Result<Resume, PanelError> {
        self.start_with_profile(resume, ProfileData::named(name.trim()))
    }

    fn start_with_profile(
        &mut self,
        resume: &Resume,
        profile: ProfileData,
    ) -> Result<Resume, PanelError> {
        if !resume.is_empty() {
            return Err(PanelError::OnboardingClosed);
        }
        let mut next = resume.clone();
        next.set_sections(vec![Section::new(SectionBody::Profile { data: profile })])?;
        next.touch();

        self.open_key = Some(accordion_key(SectionKind::Profile, 0));
        self.onboarding = false;
        Ok(next)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Section gestures
    // ────────────────────────────────────────────────────────────────────────

    /// Whole-section replacement coming from an editor. The replacement must
    /// keep the section's type.
    pub fn update_section(
        &self,
        resume: &Resume,
        index: usize,
        section: Section,
    ) -> Result<Resume, PanelError> {
        let current = resume.section(index)?.kind();
        if section.kind() != current {
            return Err(EditError::KindMismatch {
                edit: section.kind(),
                section: current,
            }
            .into());
        }
        let mut next = resume.clone();
        next.replace_section(index, section)?;
        next.touch();
        Ok(next)
    }

    /// Runs a typed editor command against the section at `index`.
    pub fn edit_section(
        &self,
        resume: &Resume,
        index: usize,
        edit: SectionEdit,
    ) -> Result<Resume, PanelError> {
        let section = resume.section(index)?;
        let updated = editors::apply_edit(section, edit)?;
        self.update_section(resume, index, updated)
    }

    pub fn delete_section(&self, resume: &Resume, index: usize) -> Result<Deletion, PanelError> {
        if resume.section(index)?.kind() == SectionKind::Profile {
            return Err(PanelError::ProfileNotDeletable);
        }
        let mut next = resume.clone();
        let removed = next.remove_section(index)?;
        let remote_id = removed.id.clone();
        Ok(Deletion {
            resume: next,
            removed,
            remote_id,
        })
    }

    /// Drag end. `None` when nothing moved: no drop target, dropped on itself,
    /// or an id that no longer matches a section.
    pub fn drag_end(
        &self,
        resume: &Resume,
        dragged: &str,
        target: Option<&str>,
    ) -> Result<Option<Reorder>, PanelError> {
        let Some(target) = target else {
            return Ok(None);
        };
        if dragged == target {
            return Ok(None);
        }

        let sections = resume.sections();
        let find = |id: &str| {
            sections
                .iter()
                .enumerate()
                .position(|(index, section)| reorder::drag_id(section, index) == id)
        };
        let (Some(from), Some(to)) = (find(dragged), find(target)) else {
            return Ok(None);
        };

        let moved = reorder::array_move(sections, from, to);
        let order = reorder::section_orders(&moved);
        let mut next = resume.clone();
        next.set_sections(moved)?;
        next.touch();
        Ok(Some(Reorder {
            resume: next,
            order,
        }))
    }

    pub fn items(&self, resume: &Resume) -> Vec<PanelItem> {
        resume
            .sections()
            .iter()
            .enumerate()
            .map(|(index, section)| {
                let key = accordion_key(section.kind(), index);
                PanelItem {
                    index,
                    open: self.open_key.as_deref() == Some(key.as_str()),
                    key,
                    drag_id: reorder::drag_id(section, index),
                    kind: section.kind(),
                    title: section.display_title(),
                    count: section.body.entry_count().filter(|count| *count > 0),
                    deletable: section.kind() != SectionKind::Profile,
                }
            })
            .collect()
    }
}
