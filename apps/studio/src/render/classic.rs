//! Traditional serif layout: summary, experience, education and skills.

use super::{date_range, Markup, PreviewData};

const DATES: &str = " - ";

fn entry_head(html: &mut Markup, title: &str, dates: &str) {
    html.open("div", "entry-head")
        .element("h3", "entry-title", title)
        .element("span", "entry-dates", dates)
        .close("div");
}

/// `"{place}, {location}"`, as written on the line under the title.
fn place_line(place: &str, location: &str) -> String {
    format!("{place}, {location}")
}

pub(super) fn render(view: &PreviewData<'_>) -> String {
    let mut html = Markup::new();
    html.open("div", "resume classic serif");

    html.open("header", "resume-header centered")
        .element("h1", "name uppercase", view.name())
        .element_if("h2", "professional-title", view.professional_title());
    let contacts = view.contacts();
    if !contacts.is_empty() {
        html.open("div", "contacts");
        for (index, (_, value)) in contacts.into_iter().enumerate() {
            if index > 0 {
                html.element("span", "dot", "•");
            }
            html.element("span", "", value);
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
                &date_range(&entry.start_date, entry.end_date.as_deref(), entry.current, DATES),
            );
            html.element("p", "italic", &place_line(&entry.company, &entry.location))
                .element_if("p", "entry-description", Some(entry.description.as_str()))
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
                &date_range(&entry.start_date, entry.end_date.as_deref(), entry.current, DATES),
            );
            html.element("p", "italic", &place_line(&entry.institution, &entry.location));
            if let Some(gpa) = entry.gpa.as_deref().filter(|gpa| !gpa.trim().is_empty()) {
                html.element("p", "gpa", &format!("GPA: {gpa}"));
            }
            html.close("div");
        }
        html.end_section();
    }

    if let Some(categories) = view.skills {
        html.section("skills", "Skills");
        for category in categories {
            html.open("div", "skill-row")
                .element("span", "skill-name", &format!("{}:", category.name))
                .text(" ")
                .element("span", "", &category.skills.join(", "))
                .close("div");
        }
        html.end_section();
    }

    html.close("div");
    html.finish()
}

#[cfg(test)]
mod tests {
    use crate::models::entries::{EducationEntry, Entries, SkillCategory};
    use crate::models::resume::{Resume, TemplateStyle};
    use crate::models::section::{ProfileData, Section, SectionBody, SkillsData};
    use crate::render::render;

    #[test]
    fn test_classic_lines() {
        let mut profile = ProfileData::named("Ada");
        profile.email = "ada@example.com".to_string();
        profile.location = "London".to_string();
        let resume = Resume::new("r1", "CV")
            .with_sections(vec![
                Section::new(SectionBody::Profile { data: profile }),
                Section::new(SectionBody::Education {
                    data: Entries::new(vec![EducationEntry {
                        degree: "BSc".to_string(),
                        institution: "UCL".to_string(),
                        location: "London".to_string(),
                        start_date: "2015".to_string(),
                        end_date: Some("2018".to_string()),
                        ..EducationEntry::default()
                    }]),
                }),
                Section::new(SectionBody::Skills {
                    data: SkillsData {
                        categories: vec![SkillCategory {
                            name: "Backend".to_string(),
                            skills: vec!["Rust".to_string(), "SQL".to_string()],
                            ..SkillCategory::default()
                        }],
                    },
                }),
            ])
            .unwrap();

        let html = render(&resume, TemplateStyle::Classic);
        assert!(html.contains("ada@example.com</span><span class=\"dot\">•</span><span>London"));
        assert!(html.contains("UCL, London"));
        assert!(html.contains("2015 - 2018"));
        assert!(html.contains("Backend:</span> <span>Rust, SQL"));
        assert!(!html.contains("Email:"));
    }
}
