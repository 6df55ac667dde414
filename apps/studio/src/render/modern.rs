//! Dense, accent-coloured layout covering every entry-based section.

use super::{date_range, joined, Markup, PreviewData};

const SEPARATOR: &str = " • ";
const DATES: &str = " - ";

/// Title and subtitle on the left, dates on the right.
fn entry_head(html: &mut Markup, title: &str, subtitle: &str, dates: &str) {
    html.open("div", "entry-head")
        .open("div", "")
        .element("h3", "entry-title", title)
        .element_if("p", "entry-subtitle", Some(subtitle))
        .close("div")
        .element_if("div", "entry-dates", Some(dates))
        .close("div");
}

pub(super) fn render(view: &PreviewData<'_>) -> String {
    let mut html = Markup::new();
    html.open("div", "resume modern");

    html.open("header", "resume-header accent")
        .element("h1", "name", view.name())
        .element_if("p", "professional-title", view.professional_title());
    let contacts = view.contacts();
    if !contacts.is_empty() {
        html.open("div", "contacts");
        for (label, value) in contacts {
            html.open("span", "contact")
                .element("span", "contact-label", &format!("{label}:"))
                .text(" ")
                .text(value)
                .close("span");
        }
        html.close("div");
    }
    html.close("header");

    if let Some(summary) = view.summary {
        html.section("summary", "Professional Summary")
            .element("p", "", summary)
            .end_section();
    }

    if let Some(entries) = view.experience {
        html.section("experience", "Work Experience");
        for entry in entries {
            html.open("div", "entry");
            entry_head(
                &mut html,
                &entry.job_title,
                &joined([entry.company.as_str(), entry.location.as_str()], SEPARATOR),
                &date_range(&entry.start_date, entry.end_date.as_deref(), entry.current, DATES),
            );
            html.element_if("p", "entry-description", Some(entry.description.as_str()))
                .bullets("achievements", &entry.achievements)
                .close("div");
        }
        html.end_section();
    }

    if let Some(entries) = view.education {
        html.section("education", "Education");
        for entry in entries {
            html.open("div", "entry");
            entry_head(
                &mut html,
                &entry.degree,
                &joined([entry.institution.as_str(), entry.location.as_str()], SEPARATOR),
                &date_range(&entry.start_date, entry.end_date.as_deref(), entry.current, DATES),
            );
            if let Some(gpa) = entry.gpa.as_deref().filter(|gpa| !gpa.trim().is_empty()) {
                html.element("p", "gpa", &format!("GPA: {gpa}"));
            }
            html.close("div");
        }
        html.end_section();
    }

    if let Some(categories) = view.skills {
        html.section("skills", "Skills").open("div", "skill-grid");
        for category in categories {
            html.open("div", "skill-category")
                .element("h3", "", &category.name)
                .element("p", "", &joined(category.skills.iter().map(String::as_str), SEPARATOR))
                .close("div");
        }
        html.close("div").end_section();
    }

    if let Some(entries) = view.languages {
        html.section("languages", "Languages");
        for entry in entries {
            html.open("div", "language")
                .element("span", "language-name", &entry.language)
                .element("span", "proficiency", entry.proficiency.label())
                .close("div");
        }
        html.end_section();
    }

    if let Some(entries) = view.projects {
        html.section("projects", "Projects");
        for entry in entries {
            html.open("div", "entry");
            entry_head(
                &mut html,
                &entry.name,
                &joined(entry.technologies.iter().map(String::as_str), SEPARATOR),
                &date_range(&entry.start_date, entry.end_date.as_deref(), entry.current, DATES),
            );
            html.element_if("p", "entry-description", Some(entry.description.as_str()))
                .bullets("highlights", &entry.highlights)
                .element_if("p", "project-url", entry.url.as_deref())
                .close("div");
        }
        html.end_section();
    }

    if let Some(entries) = view.certifications {
        html.section("certifications", "Certifications");
        for entry in entries {
            let dates = match entry.expiry_date.as_deref() {
                Some(expiry) if !expiry.trim().is_empty() => format!("{}{DATES}{expiry}", entry.date),
                _ => entry.date.clone(),
            };
            html.open("div", "entry");
            entry_head(&mut html, &entry.name, &entry.issuer, &dates);
            if let Some(id) = entry.credential_id.as_deref().filter(|id| !id.trim().is_empty()) {
                html.element("p", "credential", &format!("ID: {id}"));
            }
            html.close("div");
        }
        html.end_section();
    }

    if let Some(entries) = view.awards {
        html.section("awards", "Awards & Honors");
        for entry in entries {
            html.open("div", "entry");
            entry_head(&mut html, &entry.title, &entry.issuer, &entry.date);
            html.element_if("p", "entry-description", entry.description.as_deref())
                .close("div");
        }
        html.end_section();
    }

    if let Some(entries) = view.volunteer {
        html.section("volunteer", "Volunteer Experience");
        for entry in entries {
            html.open("div", "entry");
            entry_head(
                &mut html,
                &entry.role,
                &joined([entry.organization.as_str(), entry.location.as_str()], SEPARATOR),
                &date_range(&entry.start_date, entry.end_date.as_deref(), entry.current, DATES),
            );
            html.element_if("p", "entry-description", Some(entry.description.as_str()))
                .close("div");
        }
        html.end_section();
    }

    if let Some(entries) = view.publications {
        html.section("publications", "Publications");
        for entry in entries {
            html.open("div", "entry")
                .element("h3", "entry-title", &entry.title)
                .element_if("p", "entry-subtitle", Some(entry.publisher.as_str()))
                .element_if("p", "entry-dates", Some(entry.date.as_str()))
                .element_if("p", "publication-url", entry.url.as_deref())
                .close("div");
        }
        html.end_section();
    }

    if let Some(entries) = view.courses {
        html.section("courses", "Courses");
        for entry in entries {
            html.open("div", "entry");
            entry_head(&mut html, &entry.name, &entry.institution, &entry.date);
            html.element_if("p", "entry-description", entry.description.as_deref())
                .close("div");
        }
        html.end_section();
    }

    html.close("div");
    html.finish()
}

#[cfg(test)]
mod tests {
    use crate::models::entries::{
        CertificationEntry, Entries, LanguageEntry, Proficiency, SkillCategory,
    };
    use crate::models::resume::{Resume, TemplateStyle};
    use crate::models::section::{ProfileData, Section, SectionBody, SkillsData};
    use crate::render::render;

    #[test]
    fn test_modern_renders_extended_sections() {
        let mut profile = ProfileData::named("Ada");
        profile.email = "ada@example.com".to_string();
        let resume = Resume::new("r1", "CV")
            .with_sections(vec![
                Section::new(SectionBody::Profile { data: profile }),
                Section::new(SectionBody::Skills {
                    data: SkillsData {
                        categories: vec![SkillCategory {
                            name: "Languages".to_string(),
                            skills: vec!["Rust".to_string(), "Go".to_string()],
                            ..SkillCategory::default()
                        }],
                    },
                }),
                Section::new(SectionBody::Languages {
                    data: Entries::new(vec![LanguageEntry {
                        language: "French".to_string(),
                        proficiency: Proficiency::Fluent,
                        ..LanguageEntry::default()
                    }]),
                }),
                Section::new(SectionBody::Certifications {
                    data: Entries::new(vec![CertificationEntry {
                        name: "CKA".to_string(),
                        date: "2023".to_string(),
                        credential_id: Some("X-1".to_string()),
                        ..CertificationEntry::default()
                    }]),
                }),
            ])
            .unwrap();

        let html = render(&resume, TemplateStyle::Modern);
        assert!(html.contains("Email:</span> ada@example.com"));
        assert!(html.contains("Rust • Go"));
        assert!(html.contains("French"));
        assert!(html.contains("ID: X-1"));
        assert!(!html.contains("Phone:"));
        assert!(!html.contains("Awards &amp; Honors"));
    }
}
