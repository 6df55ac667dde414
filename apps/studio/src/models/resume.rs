use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::section::{Section, SectionKind};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("A {} section already exists", .0.as_str())]
    DuplicateSection(SectionKind),

    #[error("Section index {index} is out of range (document has {len} sections)")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateStyle {
    #[default]
    Modern,
    Classic,
    Minimal,
}

impl TemplateStyle {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "modern" => Some(TemplateStyle::Modern),
            "classic" => Some(TemplateStyle::Classic),
            "minimal" => Some(TemplateStyle::Minimal),
            _ => None,
        }
    }
}

/// Sync state between the local document and the persisted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    Saved,
    Unsaved,
    Saving,
}

/// The document being edited.
///
/// `sections` is the only source of document order. `section_order` is a cache of
/// the section tags and is rewritten by every mutator, never edited on its own.
/// At most one section of each non-custom kind may exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: String,
    pub title: String,
    sections: Vec<Section>,
    section_order: Vec<SectionKind>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub template: TemplateStyle,
    pub is_public: bool,
}

impl Resume {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            sections: Vec::new(),
            section_order: Vec::new(),
            created_at: now,
            updated_at: now,
            template: TemplateStyle::default(),
            is_public: false,
        }
    }

    pub fn with_sections(mut self, sections: Vec<Section>) -> Result<Self, DocumentError> {
        self.set_sections(sections)?;
        Ok(self)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_order(&self) -> &[SectionKind] {
        &self.section_order
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, index: usize) -> Result<&Section, DocumentError> {
        self.sections.get(index).ok_or(DocumentError::IndexOutOfRange {
            index,
            len: self.sections.len(),
        })
    }

    /// First section of `kind`. Non-custom kinds have at most one match.
    pub fn find(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|section| section.kind() == kind)
    }

    pub fn contains(&self, kind: SectionKind) -> bool {
        self.find(kind).is_some()
    }

    /// Replaces the whole list, e.g. after a reorder or when loading a draft.
    ///
    /// Every mutator normalizes the incoming sections, so entry invariants hold
    /// whatever the source (editor, draft, import or backend load).
    pub fn set_sections(&mut self, sections: Vec<Section>) -> Result<(), DocumentError> {
        let sections: Vec<Section> = sections.into_iter().map(Section::normalized).collect();
        check_cardinality(&sections)?;
        self.sections = sections;
        self.sync_order();
        Ok(())
    }

    pub fn push_section(&mut self, section: Section) -> Result<(), DocumentError> {
        let section = section.normalized();
        let kind = section.kind();
        if !kind.is_repeatable() && self.contains(kind) {
            return Err(DocumentError::DuplicateSection(kind));
        }
        self.sections.push(section);
        self.sync_order();
        Ok(())
    }

    pub fn replace_section(&mut self, index: usize, section: Section) -> Result<(), DocumentError> {
        let len = self.sections.len();
        let current = self
            .sections
            .get(index)
            .ok_or(DocumentError::IndexOutOfRange { index, len })?;

        let section = section.normalized();
        let kind = section.kind();
        if current.kind() != kind
            && !kind.is_repeatable()
            && self.contains(kind)
        {
            return Err(DocumentError::DuplicateSection(kind));
        }

        self.sections[index] = section;
        self.sync_order();
        Ok(())
    }

    pub fn remove_section(&mut self, index: usize) -> Result<Section, DocumentError> {
        if index >= self.sections.len() {
            return Err(DocumentError::IndexOutOfRange {
                index,
                len: self.sections.len(),
            });
        }
        let removed = self.sections.remove(index);
        self.sync_order();
        Ok(removed)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn sync_order(&mut self) {
        self.section_order = self.sections.iter().map(Section::kind).collect();
    }
}

fn check_cardinality(sections: &[Section]) -> Result<(), DocumentError> {
    let mut seen = Vec::with_capacity(sections.len());
    for kind in sections.iter().map(Section::kind) {
        if kind.is_repeatable() {
            continue;
        }
        if seen.contains(&kind) {
            return Err(DocumentError::DuplicateSection(kind));
        }
        seen.push(kind);
    }
    Ok(())
}
