use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client-generated identifier of a repeatable entry.
///
/// Assigned once when the entry is created and never reused. Backend ids are a
/// separate namespace and never stand in for an `EntryId`. Deserializing an entry
/// without an id assigns a fresh one, so every loaded entry is addressable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::generate()
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An item of a multi-entry section, keyed by its [`EntryId`].
pub trait Entry: Clone + Default {
    fn id(&self) -> &EntryId;
    fn id_mut(&mut self) -> &mut EntryId;

    /// A new entry with a fresh id and empty field values.
    fn blank() -> Self {
        Self::default()
    }
}

/// Entries that can be "ongoing" (a current job, an unfinished degree).
///
/// `current == true` and a non-empty `end_date` are mutually exclusive; the
/// setters below keep that true after every edit.
pub trait Ongoing {
    fn current_mut(&mut self) -> &mut bool;
    fn end_date_mut(&mut self) -> &mut Option<String>;

    fn mark_current(&mut self, current: bool) {
        *self.current_mut() = current;
        if current {
            *self.end_date_mut() = None;
        }
    }

    fn set_end_date(&mut self, end_date: &str) {
        let end_date = end_date.trim();
        if end_date.is_empty() {
            *self.end_date_mut() = None;
        } else {
            *self.current_mut() = false;
            *self.end_date_mut() = Some(end_date.to_string());
        }
    }

    /// Re-establishes the exclusivity on an entry that was not built by the setters.
    fn settle(&mut self) {
        let blank = self
            .end_date_mut()
            .as_deref()
            .is_some_and(|end_date| end_date.trim().is_empty());
        if *self.current_mut() || blank {
            *self.end_date_mut() = None;
        }
    }
}

/// Gives every repeated id after its first occurrence a fresh one.
/// Returns how many entries were reassigned.
pub fn reassign_duplicate_ids<T: Entry>(entries: &mut [T]) -> usize {
    let mut seen = HashSet::with_capacity(entries.len());
    let mut reassigned = 0;
    for entry in entries.iter_mut() {
        if !seen.insert(entry.id().clone()) {
            *entry.id_mut() = EntryId::generate();
            seen.insert(entry.id().clone());
            reassigned += 1;
        }
    }
    reassigned
}

/// `{ "entries": [...] }` payload shared by every entry-based section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entries<T> {
    #[serde(default)]
    pub entries: Vec<T>,
}

impl<T> Default for Entries<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Entries<T> {
    pub fn new(entries: Vec<T>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Entry> Entries<T> {
    /// Makes entry ids unique; returns how many were reassigned.
    pub fn normalize(&mut self) -> usize {
        reassign_duplicate_ids(&mut self.entries)
    }
}

impl<T: Entry + Ongoing> Entries<T> {
    /// [`Entries::normalize`] plus the current/end-date exclusivity.
    pub fn normalize_ongoing(&mut self) -> usize {
        self.entries.iter_mut().for_each(Ongoing::settle);
        self.normalize()
    }
}

macro_rules! impl_entry {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Entry for $ty {
                fn id(&self) -> &EntryId {
                    &self.id
                }

                fn id_mut(&mut self) -> &mut EntryId {
                    &mut self.id
                }
            }
        )+
    };
}

macro_rules! impl_ongoing {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Ongoing for $ty {
                fn current_mut(&mut self) -> &mut bool {
                    &mut self.current
                }

                fn end_date_mut(&mut self) -> &mut Option<String> {
                    &mut self.end_date
                }
            }
        )+
    };
}

// ────────────────────────────────────────────────────────────────────────────
// Entry payloads
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub id: EntryId,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    /// `None` while the position is current.
    pub end_date: Option<String>,
    pub current: bool,
    pub description: String,
    pub achievements: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: EntryId,
    pub degree: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    pub institution: String,
    pub location: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCategory {
    pub id: EntryId,
    pub name: String,
    pub skills: Vec<String>,
}

impl Default for SkillCategory {
    fn default() -> Self {
        Self {
            id: EntryId::generate(),
            name: String::new(),
            skills: Vec::new(),
        }
    }
}

/// Spoken-language proficiency, ordered from strongest to weakest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Native,
    Fluent,
    Advanced,
    Intermediate,
    #[default]
    Beginner,
}

impl Proficiency {
    pub fn label(self) -> &'static str {
        match self {
            Proficiency::Native => "Native",
            Proficiency::Fluent => "Fluent",
            Proficiency::Advanced => "Advanced",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Beginner => "Beginner",
        }
    }

    /// Width of the proficiency bar, in percent.
    pub fn bar_width(self) -> u8 {
        match self {
            Proficiency::Native => 100,
            Proficiency::Fluent => 85,
            Proficiency::Advanced => 70,
            Proficiency::Intermediate => 50,
            Proficiency::Beginner => 30,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Proficiency::Native => "native",
            Proficiency::Fluent => "fluent",
            Proficiency::Advanced => "advanced",
            Proficiency::Intermediate => "intermediate",
            Proficiency::Beginner => "beginner",
        }
    }

    /// Lenient parse for imported data; unknown levels fall back to `Beginner`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "native" | "bilingual" => Proficiency::Native,
            "fluent" | "full_professional" | "full professional" => Proficiency::Fluent,
            "advanced" | "professional" | "professional_working" => Proficiency::Advanced,
            "intermediate" | "conversational" | "limited_working" => Proficiency::Intermediate,
            _ => Proficiency::Beginner,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageEntry {
    pub id: EntryId,
    pub language: String,
    pub proficiency: Proficiency,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CertificationEntry {
    pub id: EntryId,
    pub name: String,
    pub issuer: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseEntry {
    pub id: EntryId,
    pub name: String,
    pub institution: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectEntry {
    pub id: EntryId,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub technologies: Vec<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwardEntry {
    pub id: EntryId,
    pub title: String,
    pub issuer: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicationEntry {
    pub id: EntryId,
    pub title: String,
    pub publisher: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolunteerEntry {
    pub id: EntryId,
    pub role: String,
    pub organization: String,
    pub location: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceEntry {
    pub id: EntryId,
    pub name: String,
    pub position: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
}

impl_entry!(
    ExperienceEntry,
    EducationEntry,
    LanguageEntry,
    CertificationEntry,
    CourseEntry,
    ProjectEntry,
    AwardEntry,
    PublicationEntry,
    VolunteerEntry,
    ReferenceEntry,
);

impl Entry for SkillCategory {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn id_mut(&mut self) -> &mut EntryId {
        &mut self.id
    }

    fn blank() -> Self {
        Self {
            name: "New Category".to_string(),
            ..Self::default()
        }
    }
}

impl_ongoing!(ExperienceEntry, EducationEntry, ProjectEntry, VolunteerEntry);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = EntryId::generate();
        let b = EntryId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_normalize_reassigns_repeated_ids_only() {
        let mut data: Entries<ExperienceEntry> = serde_json::from_value(serde_json::json!({
            "entries": [{ "id": "dup", "jobTitle": "A" }, { "id": "dup", "jobTitle": "B" }, { "id": "c" }]
        }))
        .unwrap();

        assert_eq!(data.normalize(), 1);
        assert_eq!(data.entries[0].id, EntryId::from("dup"));
        assert_ne!(data.entries[1].id, EntryId::from("dup"));
        assert_eq!(data.entries[1].job_title, "B");
        assert_eq!(data.entries[2].id, EntryId::from("c"));
        assert_eq!(data.normalize(), 0);
    }

    #[test]
    fn test_normalize_ongoing_clears_end_date_of_current_entry() {
        let mut data: Entries<ExperienceEntry> = serde_json::from_value(serde_json::json!({
            "entries": [
                { "id": "e1", "current": true, "endDate": "2020-01" },
                { "id": "e2", "current": false, "endDate": "2019-05" },
                { "id": "e3", "current": false, "endDate": "  " }
            ]
        }))
        .unwrap();

        data.normalize_ongoing();
        assert!(data.entries[0].current);
        assert_eq!(data.entries[0].end_date, None);
        assert_eq!(data.entries[1].end_date.as_deref(), Some("2019-05"));
        assert_eq!(data.entries[2].end_date, None);
    }

    #[test]
    fn test_entry_without_id_gets_fresh_id_on_load() {
        let json = r#"{"entries":[{"jobTitle":"Engineer"},{"jobTitle":"Lead"}]}"#;
        let parsed: Entries<ExperienceEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_ne!(parsed.entries[0].id, parsed.entries[1].id);
        assert_eq!(parsed.entries[0].job_title, "Engineer");
    }

    #[test]
    fn test_entry_keeps_id_from_payload() {
        let json = r#"{"id":"abc-1","language":"French","proficiency":"fluent"}"#;
        let parsed: LanguageEntry = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id.as_str(), "abc-1");
        assert_eq!(parsed.proficiency, Proficiency::Fluent);
    }

    #[test]
    fn test_mark_current_clears_end_date() {
        let mut entry = ExperienceEntry {
            end_date: Some("2023-04".to_string()),
            ..ExperienceEntry::default()
        };
        entry.mark_current(true);
        assert!(entry.current);
        assert_eq!(entry.end_date, None);
    }

    #[test]
    fn test_end_date_clears_current() {
        let mut entry = VolunteerEntry {
            current: true,
            ..VolunteerEntry::default()
        };
        entry.set_end_date("2022-01");
        assert!(!entry.current);
        assert_eq!(entry.end_date.as_deref(), Some("2022-01"));
    }

    #[test]
    fn test_blank_end_date_leaves_current_alone() {
        let mut entry = EducationEntry {
            current: true,
            ..EducationEntry::default()
        };
        entry.set_end_date("  ");
        assert!(entry.current);
        assert_eq!(entry.end_date, None);
    }

    #[test]
    fn test_new_skill_category_has_placeholder_name() {
        let category = SkillCategory::blank();
        assert_eq!(category.name, "New Category");
        assert!(category.skills.is_empty());
    }

    #[test]
    fn test_proficiency_mappings_cover_every_level() {
        let levels = [
            Proficiency::Native,
            Proficiency::Fluent,
            Proficiency::Advanced,
            Proficiency::Intermediate,
            Proficiency::Beginner,
        ];
        let widths: Vec<u8> = levels.iter().map(|p| p.bar_width()).collect();
        assert_eq!(widths, vec![100, 85, 70, 50, 30]);
        assert_eq!(Proficiency::parse_lenient("CONVERSATIONAL"), Proficiency::Intermediate);
        assert_eq!(Proficiency::parse_lenient("klingon"), Proficiency::Beginner);
    }
}
