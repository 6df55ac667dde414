use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use super::entries::{
    reassign_duplicate_ids, AwardEntry, CertificationEntry, CourseEntry, EducationEntry, Entries,
    ExperienceEntry, LanguageEntry, ProjectEntry, PublicationEntry, ReferenceEntry, SkillCategory,
    VolunteerEntry,
};

/// The closed set of section tags. Lowercase is the canonical spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Profile,
    Summary,
    Links,
    Experience,
    Education,
    Skills,
    Languages,
    Certifications,
    Courses,
    Projects,
    Awards,
    Publications,
    Volunteer,
    References,
    Custom,
}

impl SectionKind {
    pub const ALL: [SectionKind; 15] = [
        SectionKind::Profile,
        SectionKind::Summary,
        SectionKind::Links,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Languages,
        SectionKind::Certifications,
        SectionKind::Courses,
        SectionKind::Projects,
        SectionKind::Awards,
        SectionKind::Publications,
        SectionKind::Volunteer,
        SectionKind::References,
        SectionKind::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Profile => "profile",
            SectionKind::Summary => "summary",
            SectionKind::Links => "links",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Languages => "languages",
            SectionKind::Certifications => "certifications",
            SectionKind::Courses => "courses",
            SectionKind::Projects => "projects",
            SectionKind::Awards => "awards",
            SectionKind::Publications => "publications",
            SectionKind::Volunteer => "volunteer",
            SectionKind::References => "references",
            SectionKind::Custom => "custom",
        }
    }

    /// Case-insensitive parse, so `EXPERIENCE` from the backend maps to `experience`.
    pub fn parse(raw: &str) -> Option<Self> {
        let lowered = raw.trim().to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.as_str() == lowered)
    }

    /// Title sent to the backend when a section of this kind is created.
    pub fn default_title(self) -> &'static str {
        match self {
            SectionKind::Profile => "Profile",
            SectionKind::Summary => "Professional Summary",
            SectionKind::Links => "Links",
            SectionKind::Experience => "Work Experience",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Skills",
            SectionKind::Languages => "Languages",
            SectionKind::Certifications => "Certifications",
            SectionKind::Courses => "Courses",
            SectionKind::Projects => "Projects",
            SectionKind::Awards => "Awards & Honors",
            SectionKind::Publications => "Publications",
            SectionKind::Volunteer => "Volunteer Experience",
            SectionKind::References => "References",
            SectionKind::Custom => "Custom Section",
        }
    }

    /// The tag with its first letter upper-cased.
    pub fn display_name(self) -> String {
        let tag = self.as_str();
        let mut chars = tag.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Only custom sections may appear more than once in a document.
    pub fn is_repeatable(self) -> bool {
        matches!(self, SectionKind::Custom)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Flat payloads
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileData {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_title: Option<String>,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl ProfileData {
    /// Profile created from the onboarding screen: only the name is known.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
}

impl LinksData {
    /// Non-empty links in website, linkedin, github, portfolio order.
    pub fn present(&self) -> Vec<&str> {
        [&self.website, &self.linkedin, &self.github, &self.portfolio]
            .into_iter()
            .filter_map(|link| link.as_deref())
            .map(str::trim)
            .filter(|link| !link.is_empty())
            .collect()
    }
}

/// Free-text payload of `summary` and `custom` sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextData {
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsData {
    pub categories: Vec<SkillCategory>,
}

// ────────────────────────────────────────────────────────────────────────────
// Section union
// ────────────────────────────────────────────────────────────────────────────

/// Type-tagged section payload. `{"type": "experience", "data": {"entries": [...]}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SectionBody {
    Profile {
        #[serde(default)]
        data: ProfileData,
    },
    Summary {
        #[serde(default)]
        data: TextData,
    },
    Links {
        #[serde(default)]
        data: LinksData,
    },
    Experience {
        #[serde(default)]
        data: Entries<ExperienceEntry>,
    },
    Education {
        #[serde(default)]
        data: Entries<EducationEntry>,
    },
    Skills {
        #[serde(default)]
        data: SkillsData,
    },
    Languages {
        #[serde(default)]
        data: Entries<LanguageEntry>,
    },
    Certifications {
        #[serde(default)]
        data: Entries<CertificationEntry>,
    },
    Courses {
        #[serde(default)]
        data: Entries<CourseEntry>,
    },
    Projects {
        #[serde(default)]
        data: Entries<ProjectEntry>,
    },
    Awards {
        #[serde(default)]
        data: Entries<AwardEntry>,
    },
    Publications {
        #[serde(default)]
        data: Entries<PublicationEntry>,
    },
    Volunteer {
        #[serde(default)]
        data: Entries<VolunteerEntry>,
    },
    References {
        #[serde(default)]
        data: Entries<ReferenceEntry>,
    },
    Custom {
        #[serde(default)]
        title: String,
        #[serde(default)]
        data: TextData,
    },
}

impl SectionBody {
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionBody::Profile { .. } => SectionKind::Profile,
            SectionBody::Summary { .. } => SectionKind::Summary,
            SectionBody::Links { .. } => SectionKind::Links,
            SectionBody::Experience { .. } => SectionKind::Experience,
            SectionBody::Education { .. } => SectionKind::Education,
            SectionBody::Skills { .. } => SectionKind::Skills,
            SectionBody::Languages { .. } => SectionKind::Languages,
            SectionBody::Certifications { .. } => SectionKind::Certifications,
            SectionBody::Courses { .. } => SectionKind::Courses,
            SectionBody::Projects { .. } => SectionKind::Projects,
            SectionBody::Awards { .. } => SectionKind::Awards,
            SectionBody::Publications { .. } => SectionKind::Publications,
            SectionBody::Volunteer { .. } => SectionKind::Volunteer,
            SectionBody::References { .. } => SectionKind::References,
            SectionBody::Custom { .. } => SectionKind::Custom,
        }
    }

    /// Empty-state payload seeded when a section is added from the catalog.
    pub fn empty(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Profile => SectionBody::Profile {
                data: ProfileData {
                    professional_title: Some(String::new()),
                    summary: Some(String::new()),
                    ..ProfileData::default()
                },
            },
            SectionKind::Summary => SectionBody::Summary {
                data: TextData::default(),
            },
            SectionKind::Links => SectionBody::Links {
                data: LinksData {
                    website: Some(String::new()),
                    linkedin: Some(String::new()),
                    github: Some(String::new()),
                    portfolio: Some(String::new()),
                },
            },
            SectionKind::Experience => SectionBody::Experience {
                data: Entries::default(),
            },
            SectionKind::Education => SectionBody::Education {
                data: Entries::default(),
            },
            SectionKind::Skills => SectionBody::Skills {
                data: SkillsData::default(),
            },
            SectionKind::Languages => SectionBody::Languages {
                data: Entries::default(),
            },
            SectionKind::Certifications => SectionBody::Certifications {
                data: Entries::default(),
            },
            SectionKind::Courses => SectionBody::Courses {
                data: Entries::default(),
            },
            SectionKind::Projects => SectionBody::Projects {
                data: Entries::default(),
            },
            SectionKind::Awards => SectionBody::Awards {
                data: Entries::default(),
            },
            SectionKind::Publications => SectionBody::Publications {
                data: Entries::default(),
            },
            SectionKind::Volunteer => SectionBody::Volunteer {
                data: Entries::default(),
            },
            SectionKind::References => SectionBody::References {
                data: Entries::default(),
            },
            SectionKind::Custom => SectionBody::Custom {
                title: SectionKind::Custom.default_title().to_string(),
                data: TextData::default(),
            },
        }
    }

    /// The `data` payload as the backend stores it in `content`.
    pub fn content(&self) -> Value {
        let value = match self {
            SectionBody::Profile { data } => serde_json::to_value(data),
            SectionBody::Summary { data } => serde_json::to_value(data),
            SectionBody::Links { data } => serde_json::to_value(data),
            SectionBody::Experience { data } => serde_json::to_value(data),
            SectionBody::Education { data } => serde_json::to_value(data),
            SectionBody::Skills { data } => serde_json::to_value(data),
            SectionBody::Languages { data } => serde_json::to_value(data),
            SectionBody::Certifications { data } => serde_json::to_value(data),
            SectionBody::Courses { data } => serde_json::to_value(data),
            SectionBody::Projects { data } => serde_json::to_value(data),
            SectionBody::Awards { data } => serde_json::to_value(data),
            SectionBody::Publications { data } => serde_json::to_value(data),
            SectionBody::Volunteer { data } => serde_json::to_value(data),
            SectionBody::References { data } => serde_json::to_value(data),
            SectionBody::Custom { data, .. } => serde_json::to_value(data),
        };
        value.unwrap_or_default()
    }

    /// Rebuilds a payload from backend `content`.
    ///
    /// A null or undecodable content falls back to the empty payload of the kind;
    /// a load never fails because one section is malformed.
    pub fn from_content(kind: SectionKind, title: Option<&str>, content: Value) -> Self {
        if content.is_null() {
            return Self::empty_titled(kind, title);
        }

        let tagged = json!({
            "type": kind.as_str(),
            "title": title.unwrap_or(kind.default_title()),
            "data": content,
        });
        match serde_json::from_value::<SectionBody>(tagged) {
            Ok(body) => body,
            Err(e) => {
                warn!("Discarding malformed {} content: {e}", kind.as_str());
                Self::empty_titled(kind, title)
            }
        }
    }

    fn empty_titled(kind: SectionKind, title: Option<&str>) -> Self {
        match (Self::empty(kind), title) {
            (SectionBody::Custom { data, .. }, Some(title)) => SectionBody::Custom {
                title: title.to_string(),
                data,
            },
            (body, _) => body,
        }
    }

    /// Restores the entry invariants on a payload that did not come from an
    /// editor: entry ids are unique within the section, and an ongoing entry
    /// has no end date.
    pub fn normalize(&mut self) {
        let kind = self.kind();
        let reassigned = match self {
            SectionBody::Experience { data } => data.normalize_ongoing(),
            SectionBody::Education { data } => data.normalize_ongoing(),
            SectionBody::Projects { data } => data.normalize_ongoing(),
            SectionBody::Volunteer { data } => data.normalize_ongoing(),
            SectionBody::Languages { data } => data.normalize(),
            SectionBody::Certifications { data } => data.normalize(),
            SectionBody::Courses { data } => data.normalize(),
            SectionBody::Awards { data } => data.normalize(),
            SectionBody::Publications { data } => data.normalize(),
            SectionBody::References { data } => data.normalize(),
            SectionBody::Skills { data } => reassign_duplicate_ids(&mut data.categories),
            SectionBody::Profile { .. }
            | SectionBody::Summary { .. }
            | SectionBody::Links { .. }
            | SectionBody::Custom { .. } => 0,
        };
        if reassigned > 0 {
            warn!(
                "Reassigned {reassigned} repeated entry ids in a {} section",
                kind.as_str()
            );
        }
    }

    /// Number of entries, for sections whose payload is an `entries` list.
    pub fn entry_count(&self) -> Option<usize> {
        match self {
            SectionBody::Experience { data } => Some(data.len()),
            SectionBody::Education { data } => Some(data.len()),
            SectionBody::Languages { data } => Some(data.len()),
            SectionBody::Certifications { data } => Some(data.len()),
            SectionBody::Courses { data } => Some(data.len()),
            SectionBody::Projects { data } => Some(data.len()),
            SectionBody::Awards { data } => Some(data.len()),
            SectionBody::Publications { data } => Some(data.len()),
            SectionBody::Volunteer { data } => Some(data.len()),
            SectionBody::References { data } => Some(data.len()),
            SectionBody::Profile { .. }
            | SectionBody::Summary { .. }
            | SectionBody::Links { .. }
            | SectionBody::Skills { .. }
            | SectionBody::Custom { .. } => None,
        }
    }
}

/// One block of the document. `id` is the backend id, absent until persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub body: SectionBody,
}

impl Section {
    pub fn new(body: SectionBody) -> Self {
        Self { id: None, body }
    }

    pub fn persisted(id: impl Into<String>, body: SectionBody) -> Self {
        Self {
            id: Some(id.into()),
            body,
        }
    }

    pub fn kind(&self) -> SectionKind {
        self.body.kind()
    }

    pub fn normalized(mut self) -> Self {
        self.body.normalize();
        self
    }

    /// Heading shown on the panel accordion.
    pub fn display_title(&self) -> String {
        match &self.body {
            SectionBody::Custom { title, .. } if !title.trim().is_empty() => title.clone(),
            SectionBody::Custom { .. } => "Custom".to_string(),
            SectionBody::Profile { .. } => "Personal Details".to_string(),
            body => body.kind().display_name(),
        }
    }

    /// Title stored on the backend row.
    pub fn backend_title(&self) -> String {
        match &self.body {
            SectionBody::Custom { title, .. } => title.clone(),
            body => body.kind().default_title().to_string(),
        }
    }
}
