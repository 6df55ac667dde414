//! CV import: a parsed CV becomes a previewable draft, then a stored resume.

pub mod handlers;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::backend::transform::{convert_server_resume, transform_cv_to_resume, transform_resume_to_cv};
use crate::backend::{BackendError, ResumeBackend};
use crate::models::cv::CvTemplate;
use crate::models::resume::Resume;
use crate::models::section::{Section, SectionBody, SectionKind};
use crate::models::server::{NewResume, NewSection, ParsedCv, ServerResume};

/// Draft shown to the user before anything is written to the backend.
#[derive(Debug, Clone, Serialize)]
pub struct ImportPreview {
    pub title: String,
    pub file_name: String,
    /// Human-readable rendition returned by the parser.
    pub display: String,
    pub sections: Vec<Section>,
}

pub fn import_title(file_name: &str) -> String {
    format!("Imported Resume - {file_name}")
}

/// Builds the preview from the parser output.
///
/// A ready-made `sections` array is used when the parser returns one; otherwise
/// the output is read as a CV template.
pub fn preview_from_parsed(file_name: &str, parsed: ParsedCv) -> ImportPreview {
    let sections = match parsed.json.get("sections") {
        Some(Value::Array(items)) => items.iter().filter_map(section_from_value).collect(),
        _ => match serde_json::from_value::<CvTemplate>(parsed.json.clone()) {
            Ok(cv) => transform_cv_to_resume(&cv),
            Err(e) => {
                warn!("Parsed CV of {file_name} is not a CV template: {e}");
                Vec::new()
            }
        },
    };

    let title = import_title(file_name);
    let sections = draft(&title, sections).sections().to_vec();
    ImportPreview {
        title,
        file_name: file_name.to_string(),
        display: parsed.display,
        sections,
    }
}

/// `{ "type": .., "title"?: .., "data": .. }`. Unknown types are skipped.
fn section_from_value(item: &Value) -> Option<Section> {
    let raw_kind = item.get("type").and_then(Value::as_str)?;
    let Some(kind) = SectionKind::parse(raw_kind) else {
        warn!("Skipping imported section of unknown type '{raw_kind}'");
        return None;
    };
    let title = item.get("title").and_then(Value::as_str);
    let content = item
        .get("data")
        .or_else(|| item.get("content"))
        .cloned()
        .unwrap_or(Value::Null);
    Some(Section::new(SectionBody::from_content(kind, title, content)))
}

/// Local document holding `sections`, minus repeated single-instance kinds.
fn draft(title: &str, sections: Vec<Section>) -> Resume {
    let mut resume = Resume::new("", title);
    for section in sections {
        if let Err(e) = resume.push_section(section) {
            warn!("Dropping imported section: {e}");
        }
    }
    resume
}

/// Creates the resume, then each section in order, and loads the result.
///
/// Stops at the first failed call. Sections created before it stay on the backend.
pub async fn confirm_import(
    backend: &dyn ResumeBackend,
    title: &str,
    sections: Vec<Section>,
) -> Result<Resume, BackendError> {
    let document = draft(title, sections);
    let created = backend
        .create_resume(NewResume {
            title: title.to_string(),
            data: Some(transform_resume_to_cv(&document)),
        })
        .await?;
    info!("Created imported resume {} '{title}'", created.id);

    let mut rows = Vec::with_capacity(document.len());
    for (order, section) in document.sections().iter().enumerate() {
        let row = backend
            .create_section(
                &created.id,
                NewSection {
                    kind: section.kind().as_str().to_string(),
                    title: section.backend_title(),
                    content: section.body.content(),
                    order,
                },
            )
            .await?;
        rows.push(row);
    }

    Ok(convert_server_resume(ServerResume {
        sections: rows,
        ..created
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{Call, MockBackend};
    use serde_json::json;

    #[test]
    fn test_preview_from_cv_template() {
        let parsed = ParsedCv {
            display: "Jane Doe, Engineer".to_string(),
            json: json!({
                "personalInformation": { "fullName": "Jane Doe", "email": "jane@example.com" },
                "workExperience": [{ "jobTitle": "Engineer", "company": "Acme", "endDate": "present" }],
                "skills": ["Rust"]
            }),
        };
        let preview = preview_from_parsed("jane.pdf", parsed);
        assert_eq!(preview.title, "Imported Resume - jane.pdf");
        let kinds: Vec<_> = preview.sections.iter().map(Section::kind).collect();
        assert_eq!(
            kinds,
            vec![SectionKind::Profile, SectionKind::Experience, SectionKind::Skills]
        );
    }

    #[test]
    fn test_preview_from_section_array_drops_duplicates_and_unknowns() {
        let parsed = ParsedCv {
            display: String::new(),
            json: json!({
                "sections": [
                    { "type": "profile", "data": { "name": "Jane" } },
                    { "type": "PROFILE", "data": { "name": "Again" } },
                    { "type": "hobbies", "data": {} },
                    { "type": "custom", "title": "Talks", "data": { "content": "RustConf" } }
                ]
            }),
        };
        let preview = preview_from_parsed("cv.docx", parsed);
        assert_eq!(preview.sections.len(), 2);
        assert_eq!(preview.sections[1].display_title(), "Talks");
    }

    #[test]
    fn test_unreadable_parse_gives_empty_preview() {
        let parsed = ParsedCv {
            display: String::new(),
            json: json!("not an object"),
        };
        assert!(preview_from_parsed("x.pdf", parsed).sections.is_empty());
    }

    #[tokio::test]
    async fn test_confirm_creates_resume_then_sections_in_order() {
        let backend = MockBackend::new();
        let sections = vec![
            Section::new(SectionBody::empty(SectionKind::Profile)),
            Section::new(SectionBody::empty(SectionKind::Education)),
        ];
        let resume = confirm_import(&backend, "Imported Resume - cv.pdf", sections)
            .await
            .unwrap();

        assert_eq!(resume.id, "resume-1");
        assert_eq!(
            resume.section_order(),
            &[SectionKind::Profile, SectionKind::Education]
        );
        assert!(resume.sections().iter().all(|section| section.id.is_some()));

        let calls = backend.calls();
        assert_eq!(calls[0], Call::CreateResume("Imported Resume - cv.pdf".to_string()));
        match &calls[2] {
            Call::CreateSection(resume_id, seed) => {
                assert_eq!(resume_id, "resume-1");
                assert_eq!(seed.kind, "education");
                assert_eq!(seed.order, 1);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_confirm_stops_on_backend_failure() {
        let backend = MockBackend::new();
        backend.set_failing(true);
        let result = confirm_import(&backend, "T", vec![]).await;
        assert!(result.is_err());
        assert_eq!(backend.calls().len(), 1);
    }
}
