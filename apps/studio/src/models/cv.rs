//! The backend's flat CV template (`PUT /resume/{id}` `data`, CV parse output).

use serde::{Deserialize, Serialize};

/// End-date label the CV template uses for ongoing entries.
pub const PRESENT: &str = "Present";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CvTemplate {
    pub personal_information: PersonalInformation,
    pub education: Vec<CvEducation>,
    pub work_experience: Vec<CvWork>,
    pub projects: Vec<CvProject>,
    pub skills: Vec<String>,
    pub languages: Vec<CvLanguage>,
    pub certifications: Vec<CvCertification>,
    pub awards: Vec<CvAward>,
    pub volunteer_experience: Vec<CvVolunteer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInformation {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub links: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CvEducation {
    pub degree: String,
    pub major: String,
    #[serde(alias = "school", alias = "university")]
    pub institution: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CvWork {
    #[serde(alias = "title", alias = "position")]
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CvProject {
    #[serde(alias = "name")]
    pub project_name: String,
    pub description: String,
    pub role: String,
    pub tags: Vec<String>,
    pub start_date: String,
    pub end_date: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CvLanguage {
    pub language: String,
    pub proficiency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CvCertification {
    #[serde(alias = "name")]
    pub certification_name: String,
    pub date_obtained: String,
    pub expiration_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CvAward {
    pub award_name: String,
    pub issuing_organization: String,
    pub date_received: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CvVolunteer {
    pub role: String,
    pub organization: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}
