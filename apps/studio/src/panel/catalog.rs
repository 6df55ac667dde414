use serde::Serialize;

use crate::models::resume::Resume;
use crate::models::section::SectionKind;

/// One tile of the "Add Content" dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionConfig {
    pub kind: SectionKind,
    pub title: &'static str,
    pub description: &'static str,
    pub required: bool,
}

const fn config(
    kind: SectionKind,
    title: &'static str,
    description: &'static str,
) -> SectionConfig {
    SectionConfig {
        kind,
        title,
        description,
        required: false,
    }
}

/// Summary is a valid kind but is not offered here.
pub const SECTION_CONFIGS: [SectionConfig; 14] = [
    SectionConfig {
        required: true,
        ..config(
            SectionKind::Profile,
            "Profile",
            "Your name, contact info, and links",
        )
    },
    config(SectionKind::Links, "Links", "Social media and portfolio links"),
    config(
        SectionKind::Experience,
        "Work Experience",
        "Your employment history and achievements",
    ),
    config(SectionKind::Education, "Education", "Your academic background"),
    config(SectionKind::Skills, "Skills", "Technical and soft skills"),
    config(
        SectionKind::Certifications,
        "Certifications",
        "Professional certifications",
    ),
    config(SectionKind::Courses, "Courses", "Relevant courses and training"),
    config(
        SectionKind::Projects,
        "Projects",
        "Notable projects and contributions",
    ),
    config(SectionKind::Languages, "Languages", "Languages you speak"),
    config(
        SectionKind::Awards,
        "Awards & Honors",
        "Recognition and achievements",
    ),
    config(
        SectionKind::Publications,
        "Publications",
        "Articles, papers, and books",
    ),
    config(
        SectionKind::Volunteer,
        "Volunteer Experience",
        "Community involvement",
    ),
    config(SectionKind::References, "References", "Professional references"),
    config(SectionKind::Custom, "Custom Section", "Add your own section"),
];

#[derive(Debug, Clone, Serialize)]
pub struct CatalogItem {
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub title: &'static str,
    pub description: &'static str,
    pub required: bool,
    pub added: bool,
}

/// Custom sections can always be added again.
pub fn is_section_added(resume: &Resume, kind: SectionKind) -> bool {
    !kind.is_repeatable() && resume.contains(kind)
}

pub fn catalog(resume: &Resume) -> Vec<CatalogItem> {
    SECTION_CONFIGS
        .iter()
        .map(|config| CatalogItem {
            kind: config.kind,
            title: config.title,
            description: config.description,
            required: config.required,
            added: is_section_added(resume, config.kind),
        })
        .collect()
}
