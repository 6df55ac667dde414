//! Live preview: pure projection of a [`Resume`] into HTML markup.
//!
//! Each template looks sections up by type and skips whatever is missing or
//! empty. No heading is ever written for a section that has nothing to show.

mod classic;
mod minimal;
mod modern;

use crate::models::cv::PRESENT;
use crate::models::entries::{
    AwardEntry, CertificationEntry, CourseEntry, EducationEntry, Entries, ExperienceEntry,
    LanguageEntry, ProjectEntry, PublicationEntry, SkillCategory, VolunteerEntry,
};
use crate::models::resume::{Resume, TemplateStyle};
use crate::models::section::{ProfileData, SectionBody};

/// Shown in the header until the profile has a name.
pub const NAME_PLACEHOLDER: &str = "Your Name";

pub fn render(resume: &Resume, style: TemplateStyle) -> String {
    let view = PreviewData::from_resume(resume);
    match style {
        TemplateStyle::Modern => modern::render(&view),
        TemplateStyle::Classic => classic::render(&view),
        TemplateStyle::Minimal => minimal::render(&view),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section lookup
// ────────────────────────────────────────────────────────────────────────────

/// Borrowed view of the renderable parts of a resume. Lists are `None` when
/// the section is absent or has no entries.
#[derive(Debug, Default)]
pub(crate) struct PreviewData<'a> {
    pub profile: Option<&'a ProfileData>,
    pub summary: Option<&'a str>,
    pub experience: Option<&'a [ExperienceEntry]>,
    pub education: Option<&'a [EducationEntry]>,
    pub skills: Option<&'a [SkillCategory]>,
    pub languages: Option<&'a [LanguageEntry]>,
    pub projects: Option<&'a [ProjectEntry]>,
    pub certifications: Option<&'a [CertificationEntry]>,
    pub awards: Option<&'a [AwardEntry]>,
    pub volunteer: Option<&'a [VolunteerEntry]>,
    pub publications: Option<&'a [PublicationEntry]>,
    pub courses: Option<&'a [CourseEntry]>,
}

fn listed<T>(entries: &Entries<T>) -> Option<&[T]> {
    (!entries.entries.is_empty()).then_some(entries.entries.as_slice())
}

fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

impl<'a> PreviewData<'a> {
    pub fn from_resume(resume: &'a Resume) -> Self {
        let mut view = PreviewData::default();
        for section in resume.sections() {
            match &section.body {
                SectionBody::Profile { data } => view.profile = Some(data),
                SectionBody::Summary { data } => view.summary = non_blank(&data.content),
                SectionBody::Experience { data } => view.experience = listed(data),
                SectionBody::Education { data } => view.education = listed(data),
                SectionBody::Skills { data } => {
                    view.skills = (!data.categories.is_empty()).then_some(data.categories.as_slice())
                }
                SectionBody::Languages { data } => view.languages = listed(data),
                SectionBody::Projects { data } => view.projects = listed(data),
                SectionBody::Certifications { data } => view.certifications = listed(data),
                SectionBody::Awards { data } => view.awards = listed(data),
                SectionBody::Volunteer { data } => view.volunteer = listed(data),
                SectionBody::Publications { data } => view.publications = listed(data),
                SectionBody::Courses { data } => view.courses = listed(data),
                SectionBody::Links { .. }
                | SectionBody::References { .. }
                | SectionBody::Custom { .. } => {}
            }
        }
        // the profile's own summary fills in when there is no summary section
        if view.summary.is_none() {
            view.summary = view
                .profile
                .and_then(|profile| profile.summary.as_deref())
                .and_then(non_blank);
        }
        view
    }

    pub fn name(&self) -> &'a str {
        self.profile
            .and_then(|profile| non_blank(&profile.name))
            .unwrap_or(NAME_PLACEHOLDER)
    }

    pub fn professional_title(&self) -> Option<&'a str> {
        self.profile
            .and_then(|profile| profile.professional_title.as_deref())
            .and_then(non_blank)
    }

    /// `(label, value)` of the contact fields that are filled in.
    pub fn contacts(&self) -> Vec<(&'static str, &'a str)> {
        let Some(profile) = self.profile else {
            return Vec::new();
        };
        [
            ("Email", profile.email.as_str()),
            ("Phone", profile.phone.as_str()),
            ("Location", profile.location.as_str()),
        ]
        .into_iter()
        .filter_map(|(label, value)| non_blank(value).map(|value| (label, value)))
        .collect()
    }
}

/// `"{start}{separator}{end}"`, with "Present" standing in for the end of a current entry.
pub(crate) fn date_range(start: &str, end: Option<&str>, current: bool, separator: &str) -> String {
    let end = if current { PRESENT } else { end.unwrap_or_default() };
    format!("{start}{separator}{end}")
}

// ────────────────────────────────────────────────────────────────────────────
// Markup writer
// ────────────────────────────────────────────────────────────────────────────

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Minimal HTML builder. Text is always escaped; tags and classes are trusted.
#[derive(Debug, Default)]
pub(crate) struct Markup {
    html: String,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, tag: &str, class: &str) -> &mut Self {
        self.html.push('<');
        self.html.push_str(tag);
        if !class.is_empty() {
            self.html.push_str(r#" class=""#);
            self.html.push_str(class);
            self.html.push('"');
        }
        self.html.push('>');
        self
    }

    pub fn close(&mut self, tag: &str) -> &mut Self {
        self.html.push_str("</");
        self.html.push_str(tag);
        self.html.push('>');
        self
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        self.html.push_str(&escape_html(text));
        self
    }

    /// `<tag class="...">text</tag>`
    pub fn element(&mut self, tag: &str, class: &str, text: &str) -> &mut Self {
        self.open(tag, class).text(text).close(tag)
    }

    /// Writes the element only when `text` has content.
    pub fn element_if(&mut self, tag: &str, class: &str, text: Option<&str>) -> &mut Self {
        if let Some(text) = text.and_then(non_blank) {
            self.element(tag, class, text);
        }
        self
    }

    /// `<ul>` of the non-blank items; nothing when there are none.
    pub fn bullets(&mut self, class: &str, items: &[String]) -> &mut Self {
        let items: Vec<&str> = items.iter().filter_map(|item| non_blank(item)).collect();
        if items.is_empty() {
            return self;
        }
        self.open("ul", class);
        for item in items {
            self.element("li", "", item);
        }
        self.close("ul")
    }

    /// Opens a titled section block. Pair with `end_section`.
    pub fn section(&mut self, class: &str, heading: &str) -> &mut Self {
        self.open("section", class).element("h2", "section-heading", heading)
    }

    pub fn end_section(&mut self) -> &mut Self {
        self.close("section")
    }

    pub fn finish(self) -> String {
        self.html
    }
}

/// Joins the non-blank parts with `separator`.
pub(crate) fn joined<'a>(parts: impl IntoIterator<Item = &'a str>, separator: &str) -> String {
    parts
        .into_iter()
        .filter_map(non_blank)
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::section::{Section, SectionKind, TextData};

    fn resume(sections: Vec<Section>) -> Resume {
        Resume::new("r1", "CV").with_sections(sections).unwrap()
    }

    fn jane_doe() -> Resume {
        resume(vec![
            Section::new(SectionBody::Profile {
                data: ProfileData::named("Jane Doe"),
            }),
            Section::new(SectionBody::Experience {
                data: Entries::new(vec![ExperienceEntry {
                    job_title: "Engineer".to_string(),
                    company: "Acme".to_string(),
                    start_date: "2021-01".to_string(),
                    current: true,
                    ..ExperienceEntry::default()
                }]),
            }),
        ])
    }

    const STYLES: [TemplateStyle; 3] = [
        TemplateStyle::Modern,
        TemplateStyle::Classic,
        TemplateStyle::Minimal,
    ];

    #[test]
    fn test_profile_and_current_job_render_everywhere() {
        let resume = jane_doe();
        for style in STYLES {
            let html = render(&resume, style);
            assert!(html.contains("Jane Doe"), "{style:?}: {html}");
            assert!(html.contains("Engineer"), "{style:?}");
            assert!(html.contains("Present"), "{style:?}");
            assert!(!html.contains("Education"), "{style:?}");
            assert!(!html.contains("Skills"), "{style:?}");
        }
    }

    #[test]
    fn test_empty_resume_renders_placeholder_only() {
        let resume = resume(vec![]);
        for style in STYLES {
            let html = render(&resume, style);
            assert!(html.contains(NAME_PLACEHOLDER), "{style:?}");
            assert!(!html.contains("<h2"), "{style:?}: {html}");
        }
    }

    #[test]
    fn test_empty_entry_lists_render_no_heading() {
        let resume = resume(vec![
            Section::new(SectionBody::empty(SectionKind::Experience)),
            Section::new(SectionBody::empty(SectionKind::Education)),
            Section::new(SectionBody::empty(SectionKind::Skills)),
            Section::new(SectionBody::empty(SectionKind::Languages)),
        ]);
        for style in STYLES {
            assert!(!render(&resume, style).contains("<h2"), "{style:?}");
        }
    }

    #[test]
    fn test_summary_section_wins_over_profile_summary() {
        let mut profile = ProfileData::named("Jane");
        profile.summary = Some("From profile".to_string());
        let with_section = resume(vec![
            Section::new(SectionBody::Profile {
                data: profile.clone(),
            }),
            Section::new(SectionBody::Summary {
                data: TextData {
                    content: "From section".to_string(),
                },
            }),
        ]);
        let html = render(&with_section, TemplateStyle::Modern);
        assert!(html.contains("From section"));
        assert!(!html.contains("From profile"));

        let profile_only = resume(vec![Section::new(SectionBody::Profile { data: profile })]);
        assert!(render(&profile_only, TemplateStyle::Classic).contains("From profile"));
    }

    #[test]
    fn test_text_is_escaped() {
        let resume = resume(vec![Section::new(SectionBody::Profile {
            data: ProfileData::named("<script>alert('x')</script>"),
        })]);
        let html = render(&resume, TemplateStyle::Minimal);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_date_range_fallbacks() {
        assert_eq!(date_range("2020", Some("2022"), false, " - "), "2020 - 2022");
        assert_eq!(date_range("2020", Some("2022"), true, " - "), "2020 - Present");
        assert_eq!(date_range("2020", None, false, " — "), "2020 — ");
    }
}
