//! Sparse layout: about, experience, education and skills only.

use super::{date_range, Markup, PreviewData};

const DATES: &str = " — ";
const SEPARATOR: &str = " · ";

fn entry(html: &mut Markup, title: &str, dates: &str, place: &str, location: &str) {
    html.open("div", "entry-head")
        .element("h3", "entry-title", title)
        .element("span", "entry-dates light", dates)
        .close("div")
        .element("p", "entry-place light", &format!("{place}{SEPARATOR}{location}"));
}

pub(super) fn render(view: &PreviewData<'_>) -> String {
    let mut html = Markup::new();
    html.open("div", "resume minimal");

    html.open("header", "resume-header")
        .element("h1", "name light", view.name())
        .element_if("h2", "professional-title light", view.professional_title());
    let contacts = view.contacts();
    if !contacts.is_empty() {
        html.open("div", "contacts light");
        for (_, value) in contacts {
            html.element("span", "", value);
        }
        html.close("div");
    }
    html.close("header");

    if let Some(summary) = view.summary {
        html.section("about", "About")
            .element("p", "light", summary)
            .end_section();
    }

    if let Some(entries) = view.experience {
        html.section("experience", "Experience");
        for item in entries {
            html.open("div", "entry");
            entry(
                &mut html,
                &item.job_title,
                &date_range(&item.start_date, item.end_date.as_deref(), item.current, DATES),
                &item.company,
                &item.location,
            );
            html.element_if("p", "entry-description light", Some(item.description.as_str()))
                .bullets("dashes light", &item.achievements)
                .close("div");
        }
        html.end_section();
    }

    if let Some(entries) = view.education {
        html.section("education", "Education");
        for item in entries {
            html.open("div", "entry");
            entry(
                &mut html,
                &item.degree,
                &date_range(&item.start_date, item.end_date.as_deref(), item.current, DATES),
                &item.institution,
                &item.location,
            );
            if let Some(gpa) = item.gpa.as_deref().filter(|gpa| !gpa.trim().is_empty()) {
                html.element("p", "gpa light", &format!("GPA: {gpa}"));
            }
            html.close("div");
        }
        html.end_section();
    }

    if let Some(categories) = view.skills {
        html.section("skills", "Skills");
        for category in categories {
            html.open("div", "skill-category")
                .element("h3", "", &category.name)
                .element("p", "light", &category.skills.join(SEPARATOR))
                .close("div");
        }
        html.end_section();
    }

    html.close("div");
    html.finish()
}
