//! Conversions between the editing document and the backend's shapes.

use tracing::warn;

use crate::models::cv::{
    CvAward, CvCertification, CvEducation, CvLanguage, CvProject, CvTemplate, CvVolunteer, CvWork,
    PRESENT,
};
use crate::models::entries::{
    AwardEntry, CertificationEntry, EducationEntry, Entries, EntryId, ExperienceEntry,
    LanguageEntry, Proficiency, ProjectEntry, SkillCategory, VolunteerEntry,
};
use crate::models::resume::{Resume, TemplateStyle};
use crate::models::section::{
    LinksData, ProfileData, Section, SectionBody, SectionKind, SkillsData,
};
use crate::models::server::{ServerResume, ServerSection};

fn end_label(current: bool, end_date: &Option<String>) -> String {
    if current {
        PRESENT.to_string()
    } else {
        end_date.clone().unwrap_or_default()
    }
}

/// `"Present"` (any casing) marks an ongoing entry.
fn split_end(end_date: &str) -> (Option<String>, bool) {
    let end_date = end_date.trim();
    if end_date.eq_ignore_ascii_case(PRESENT) {
        (None, true)
    } else if end_date.is_empty() {
        (None, false)
    } else {
        (Some(end_date.to_string()), false)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Document → CV template (update payload)
// ────────────────────────────────────────────────────────────────────────────

/// Builds the `data` payload of `PUT /resume/{id}`.
///
/// Sections the template has no slot for (courses, publications, references,
/// custom) are not exported. A summary section overrides the profile summary.
pub fn transform_resume_to_cv(resume: &Resume) -> CvTemplate {
    let mut cv = CvTemplate::default();
    let mut summary_override = None;

    for section in resume.sections() {
        match &section.body {
            SectionBody::Profile { data } => {
                cv.personal_information.full_name = data.name.clone();
                cv.personal_information.email = data.email.clone();
                cv.personal_information.phone = data.phone.clone();
                cv.personal_information.location = data.location.clone();
                cv.personal_information.summary = data.summary.clone().unwrap_or_default();
            }
            SectionBody::Summary { data } => summary_override = Some(data.content.clone()),
            SectionBody::Links { data } => {
                cv.personal_information.links =
                    data.present().into_iter().map(str::to_string).collect();
            }
            SectionBody::Education { data } => {
                cv.education = data
                    .entries
                    .iter()
                    .map(|entry| CvEducation {
                        degree: entry.degree.clone(),
                        major: entry.major.clone().unwrap_or_default(),
                        institution: entry.institution.clone(),
                        location: entry.location.clone(),
                        start_date: entry.start_date.clone(),
                        end_date: end_label(entry.current, &entry.end_date),
                        gpa: entry.gpa.clone().unwrap_or_default(),
                    })
                    .collect();
            }
            SectionBody::Experience { data } => {
                cv.work_experience = data
                    .entries
                    .iter()
                    .map(|entry| CvWork {
                        job_title: entry.job_title.clone(),
                        company: entry.company.clone(),
                        location: entry.location.clone(),
                        start_date: entry.start_date.clone(),
                        end_date: end_label(entry.current, &entry.end_date),
                        description: entry.achievements.clone(),
                        tags: entry.tags.clone(),
                    })
                    .collect();
            }
            SectionBody::Projects { data } => {
                cv.projects = data
                    .entries
                    .iter()
                    .map(|entry| CvProject {
                        project_name: entry.name.clone(),
                        description: entry.description.clone(),
                        role: entry.role.clone().unwrap_or_default(),
                        tags: entry.technologies.clone(),
                        start_date: entry.start_date.clone(),
                        end_date: end_label(entry.current, &entry.end_date),
                        link: entry
                            .url
                            .clone()
                            .or_else(|| entry.github_url.clone())
                            .unwrap_or_default(),
                    })
                    .collect();
            }
            SectionBody::Skills { data } => {
                cv.skills = data
                    .categories
                    .iter()
                    .flat_map(|category| category.skills.iter().cloned())
                    .collect();
            }
            SectionBody::Languages { data } => {
                cv.languages = data
                    .entries
                    .iter()
                    .map(|entry| CvLanguage {
                        language: entry.language.clone(),
                        proficiency: entry.proficiency.as_str().to_string(),
                    })
                    .collect();
            }
            SectionBody::Certifications { data } => {
                cv.certifications = data
                    .entries
                    .iter()
                    .map(|entry| CvCertification {
                        certification_name: entry.name.clone(),
                        date_obtained: entry.date.clone(),
                        expiration_date: entry.expiry_date.clone().unwrap_or_default(),
                    })
                    .collect();
            }
            SectionBody::Awards { data } => {
                cv.awards = data
                    .entries
                    .iter()
                    .map(|entry| CvAward {
                        award_name: entry.title.clone(),
                        issuing_organization: entry.issuer.clone(),
                        date_received: entry.date.clone(),
                        description: entry.description.clone().unwrap_or_default(),
                    })
                    .collect();
            }
            SectionBody::Volunteer { data } => {
                cv.volunteer_experience = data
                    .entries
                    .iter()
                    .map(|entry| CvVolunteer {
                        role: entry.role.clone(),
                        organization: entry.organization.clone(),
                        location: entry.location.clone(),
                        start_date: entry.start_date.clone(),
                        end_date: end_label(entry.current, &entry.end_date),
                        description: entry.description.clone(),
                    })
                    .collect();
            }
            SectionBody::Courses { .. }
            | SectionBody::Publications { .. }
            | SectionBody::References { .. }
            | SectionBody::Custom { .. } => {}
        }
    }

    if let Some(summary) = summary_override {
        cv.personal_information.summary = summary;
    }
    cv
}

// ────────────────────────────────────────────────────────────────────────────
// Backend rows → document
// ────────────────────────────────────────────────────────────────────────────

/// Rebuilds one section from its backend row. Unknown types load as a custom
/// section titled with the row title or, failing that, the raw type.
pub fn convert_server_section(row: &ServerSection) -> Section {
    let body = match SectionKind::parse(&row.kind) {
        Some(kind) => SectionBody::from_content(kind, row.title.as_deref(), row.content.clone()),
        None => {
            warn!("Unknown section type '{}', loading as custom", row.kind);
            let title = row
                .title
                .clone()
                .filter(|title| !title.trim().is_empty())
                .unwrap_or_else(|| row.kind.clone());
            SectionBody::from_content(SectionKind::Custom, Some(&title), row.content.clone())
        }
    };
    Section::persisted(row.id.clone(), body)
}

/// Loads a backend resume into an editing document, sorted by `order`.
///
/// A second section of a single-instance kind is dropped with a warning so a
/// bad row never blocks opening the resume.
pub fn convert_server_resume(server: ServerResume) -> Resume {
    let mut rows = server.sections;
    rows.sort_by_key(|row| row.order);

    let mut resume = Resume::new(server.id, server.title);
    if let Some(created_at) = server.created_at {
        resume.created_at = created_at;
    }
    if let Some(updated_at) = server.updated_at {
        resume.updated_at = updated_at;
    }
    resume.template = server
        .template_id
        .as_deref()
        .and_then(TemplateStyle::parse)
        .unwrap_or_default();
    resume.is_public = server.is_public;

    for row in &rows {
        let section = convert_server_section(row);
        if let Err(e) = resume.push_section(section) {
            warn!("Dropping section {} of resume {}: {e}", row.id, resume.id);
        }
    }
    resume
}

// ────────────────────────────────────────────────────────────────────────────
// CV template → sections (import)
// ────────────────────────────────────────────────────────────────────────────

/// Sections for a parsed CV, in profile, links, experience, education, skills,
/// projects, languages, certifications, awards, volunteer order. Empty parts are skipped.
pub fn transform_cv_to_resume(cv: &CvTemplate) -> Vec<Section> {
    let mut sections = Vec::new();
    let info = &cv.personal_information;

    if !(info.full_name.is_empty() && info.email.is_empty() && info.phone.is_empty()) {
        sections.push(SectionBody::Profile {
            data: ProfileData {
                name: info.full_name.clone(),
                email: info.email.clone(),
                phone: info.phone.clone(),
                location: info.location.clone(),
                summary: non_empty(&info.summary),
                ..ProfileData::default()
            },
        });
    }

    if !info.links.is_empty() {
        sections.push(SectionBody::Links {
            data: links_from(&info.links),
        });
    }

    if !cv.work_experience.is_empty() {
        let entries = cv
            .work_experience
            .iter()
            .map(|work| {
                let (end_date, current) = split_end(&work.end_date);
                ExperienceEntry {
                    id: EntryId::generate(),
                    job_title: work.job_title.clone(),
                    company: work.company.clone(),
                    location: work.location.clone(),
                    start_date: work.start_date.clone(),
                    end_date,
                    current,
                    description: String::new(),
                    achievements: work.description.clone(),
                    tags: work.tags.clone(),
                }
            })
            .collect();
        sections.push(SectionBody::Experience {
            data: Entries::new(entries),
        });
    }

    if !cv.education.is_empty() {
        let entries = cv
            .education
            .iter()
            .map(|edu| {
                let (end_date, current) = split_end(&edu.end_date);
                EducationEntry {
                    id: EntryId::generate(),
                    degree: edu.degree.clone(),
                    major: non_empty(&edu.major),
                    institution: edu.institution.clone(),
                    location: edu.location.clone(),
                    start_date: edu.start_date.clone(),
                    end_date,
                    current,
                    gpa: non_empty(&edu.gpa),
                    ..EducationEntry::default()
                }
            })
            .collect();
        sections.push(SectionBody::Education {
            data: Entries::new(entries),
        });
    }

    if !cv.skills.is_empty() {
        sections.push(SectionBody::Skills {
            data: SkillsData {
                categories: vec![SkillCategory {
                    id: EntryId::generate(),
                    name: "Skills".to_string(),
                    skills: cv.skills.clone(),
                }],
            },
        });
    }

    if !cv.projects.is_empty() {
        let entries = cv
            .projects
            .iter()
            .map(|project| {
                let (end_date, current) = split_end(&project.end_date);
                ProjectEntry {
                    id: EntryId::generate(),
                    name: project.project_name.clone(),
                    description: project.description.clone(),
                    role: non_empty(&project.role),
                    technologies: project.tags.clone(),
                    start_date: project.start_date.clone(),
                    end_date,
                    current,
                    url: non_empty(&project.link),
                    ..ProjectEntry::default()
                }
            })
            .collect();
        sections.push(SectionBody::Projects {
            data: Entries::new(entries),
        });
    }

    if !cv.languages.is_empty() {
        let entries = cv
            .languages
            .iter()
            .map(|language| LanguageEntry {
                id: EntryId::generate(),
                language: language.language.clone(),
                proficiency: Proficiency::parse_lenient(&language.proficiency),
            })
            .collect();
        sections.push(SectionBody::Languages {
            data: Entries::new(entries),
        });
    }

    if !cv.certifications.is_empty() {
        let entries = cv
            .certifications
            .iter()
            .map(|cert| CertificationEntry {
                id: EntryId::generate(),
                name: cert.certification_name.clone(),
                date: cert.date_obtained.clone(),
                expiry_date: non_empty(&cert.expiration_date),
                ..CertificationEntry::default()
            })
            .collect();
        sections.push(SectionBody::Certifications {
            data: Entries::new(entries),
        });
    }

    if !cv.awards.is_empty() {
        let entries = cv
            .awards
            .iter()
            .map(|award| AwardEntry {
                id: EntryId::generate(),
                title: award.award_name.clone(),
                issuer: award.issuing_organization.clone(),
                date: award.date_received.clone(),
                description: non_empty(&award.description),
            })
            .collect();
        sections.push(SectionBody::Awards {
            data: Entries::new(entries),
        });
    }

    if !cv.volunteer_experience.is_empty() {
        let entries = cv
            .volunteer_experience
            .iter()
            .map(|vol| {
                let (end_date, current) = split_end(&vol.end_date);
                VolunteerEntry {
                    id: EntryId::generate(),
                    role: vol.role.clone(),
                    organization: vol.organization.clone(),
                    location: vol.location.clone(),
                    start_date: vol.start_date.clone(),
                    end_date,
                    current,
                    description: vol.description.clone(),
                }
            })
            .collect();
        sections.push(SectionBody::Volunteer {
            data: Entries::new(entries),
        });
    }

    sections.into_iter().map(Section::new).collect()
}

/// Positional links: website, linkedin, github, portfolio.
fn links_from(links: &[String]) -> LinksData {
    let slot = |index: usize| Some(links.get(index).cloned().unwrap_or_default());
    LinksData {
        website: slot(0),
        linkedin: slot(1),
        github: slot(2),
        portfolio: slot(3),
    }
}
