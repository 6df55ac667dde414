//! Section editors.
//!
//! Each editor takes the current section value and a typed edit command and
//! returns a complete replacement section. Nothing is mutated in place, and no
//! editor validates beyond type coercion: required fields are the session's concern.

pub mod awards;
pub mod certifications;
pub mod courses;
pub mod custom;
pub mod education;
pub mod experience;
pub mod languages;
pub mod links;
pub mod list;
pub mod profile;
pub mod projects;
pub mod publications;
pub mod references;
pub mod skills;
pub mod summary;
pub mod volunteer;

use serde::Deserialize;
use thiserror::Error;

use crate::models::entries::EntryId;
use crate::models::section::{Section, SectionBody, SectionKind};

use self::list::EntryEdit;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("No entry with id {0}")]
    EntryNotFound(EntryId),

    #[error("Item index {index} is out of range (list has {len} items)")]
    ItemOutOfRange { index: usize, len: usize },

    #[error("Edit targets a {} section but the section is {}", .edit.as_str(), .section.as_str())]
    KindMismatch {
        edit: SectionKind,
        section: SectionKind,
    },
}

/// A typed editor command, tagged by the section kind it applies to.
///
/// `{"section": "experience", "op": "update", "id": "...", "patch": {"jobTitle": "Engineer"}}`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "section", rename_all = "lowercase")]
pub enum SectionEdit {
    Profile(profile::ProfilePatch),
    Summary(summary::SummaryPatch),
    Links(links::LinksPatch),
    Experience(experience::ExperienceEdit),
    Education(EntryEdit<education::EducationPatch>),
    Skills(skills::SkillsEdit),
    Languages(EntryEdit<languages::LanguagePatch>),
    Certifications(EntryEdit<certifications::CertificationPatch>),
    Courses(EntryEdit<courses::CoursePatch>),
    Projects(projects::ProjectEdit),
    Awards(EntryEdit<awards::AwardPatch>),
    Publications(EntryEdit<publications::PublicationPatch>),
    Volunteer(EntryEdit<volunteer::VolunteerPatch>),
    References(EntryEdit<references::ReferencePatch>),
    Custom(custom::CustomPatch),
}

impl SectionEdit {
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionEdit::Profile(_) => SectionKind::Profile,
            SectionEdit::Summary(_) => SectionKind::Summary,
            SectionEdit::Links(_) => SectionKind::Links,
            SectionEdit::Experience(_) => SectionKind::Experience,
            SectionEdit::Education(_) => SectionKind::Education,
            SectionEdit::Skills(_) => SectionKind::Skills,
            SectionEdit::Languages(_) => SectionKind::Languages,
            SectionEdit::Certifications(_) => SectionKind::Certifications,
            SectionEdit::Courses(_) => SectionKind::Courses,
            SectionEdit::Projects(_) => SectionKind::Projects,
            SectionEdit::Awards(_) => SectionKind::Awards,
            SectionEdit::Publications(_) => SectionKind::Publications,
            SectionEdit::Volunteer(_) => SectionKind::Volunteer,
            SectionEdit::References(_) => SectionKind::References,
            SectionEdit::Custom(_) => SectionKind::Custom,
        }
    }
}

/// Dispatches `edit` to the editor of the section's kind and returns the
/// replacement section. The backend id is carried over unchanged.
pub fn apply_edit(section: &Section, edit: SectionEdit) -> Result<Section, EditError> {
    let body = match (&section.body, edit) {
        (SectionBody::Profile { data }, SectionEdit::Profile(patch)) => SectionBody::Profile {
            data: profile::apply(data, patch),
        },
        (SectionBody::Summary { data }, SectionEdit::Summary(patch)) => SectionBody::Summary {
            data: summary::apply(data, patch),
        },
        (SectionBody::Links { data }, SectionEdit::Links(patch)) => SectionBody::Links {
            data: links::apply(data, patch),
        },
        (SectionBody::Experience { data }, SectionEdit::Experience(edit)) => {
            SectionBody::Experience {
                data: experience::apply(data, edit)?,
            }
        }
        (SectionBody::Education { data }, SectionEdit::Education(edit)) => SectionBody::Education {
            data: list::apply(data, edit)?,
        },
        (SectionBody::Skills { data }, SectionEdit::Skills(edit)) => SectionBody::Skills {
            data: skills::apply(data, edit)?,
        },
        (SectionBody::Languages { data }, SectionEdit::Languages(edit)) => SectionBody::Languages {
            data: list::apply(data, edit)?,
        },
        (SectionBody::Certifications { data }, SectionEdit::Certifications(edit)) => {
            SectionBody::Certifications {
                data: list::apply(data, edit)?,
            }
        }
        (SectionBody::Courses { data }, SectionEdit::Courses(edit)) => SectionBody::Courses {
            data: list::apply(data, edit)?,
        },
        (SectionBody::Projects { data }, SectionEdit::Projects(edit)) => SectionBody::Projects {
            data: projects::apply(data, edit)?,
        },
        (SectionBody::Awards { data }, SectionEdit::Awards(edit)) => SectionBody::Awards {
            data: list::apply(data, edit)?,
        },
        (SectionBody::Publications { data }, SectionEdit::Publications(edit)) => {
            SectionBody::Publications {
                data: list::apply(data, edit)?,
            }
        }
        (SectionBody::Volunteer { data }, SectionEdit::Volunteer(edit)) => SectionBody::Volunteer {
            data: list::apply(data, edit)?,
        },
        (SectionBody::References { data }, SectionEdit::References(edit)) => {
            SectionBody::References {
                data: list::apply(data, edit)?,
            }
        }
        (SectionBody::Custom { title, data }, SectionEdit::Custom(patch)) => {
            let (title, data) = custom::apply(title, data, patch);
            SectionBody::Custom { title, data }
        }
        (body, edit) => {
            return Err(EditError::KindMismatch {
                edit: edit.kind(),
                section: body.kind(),
            })
        }
    };

    Ok(Section {
        id: section.id.clone(),
        body,
    })
}
