//! Persistence and AI backend collaborator.
//!
//! Every remote call the editor makes goes through [`ResumeBackend`]. The HTTP
//! implementation talks to the resume service; tests swap in a recording double.

pub mod http;
#[cfg(test)]
pub mod mock;
pub mod transform;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::models::server::{
    NewResume, NewSection, ParsedCv, ResumeUpdate, SectionOrder, ServerResume, ServerSection,
};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Could not decode backend response: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Api { status, .. } => Some(*status),
            BackendError::Http(e) => e.status().map(|s| s.as_u16()),
            BackendError::Decode(_) => None,
        }
    }
}

/// Remote operations of the resume service.
///
/// All calls are suspension points of the editing session; none of them is
/// retried by the session. A failure is surfaced once.
#[async_trait]
pub trait ResumeBackend: Send + Sync {
    async fn get_resume(&self, id: &str) -> Result<ServerResume, BackendError>;

    async fn create_resume(&self, resume: NewResume) -> Result<ServerResume, BackendError>;

    async fn update_resume(&self, id: &str, update: ResumeUpdate) -> Result<(), BackendError>;

    async fn create_section(
        &self,
        resume_id: &str,
        section: NewSection,
    ) -> Result<ServerSection, BackendError>;

    async fn delete_section(&self, section_id: &str) -> Result<(), BackendError>;

    async fn reorder_sections(
        &self,
        resume_id: &str,
        order: Vec<SectionOrder>,
    ) -> Result<(), BackendError>;

    /// Free-text review of the stored resume. The shape of the text is not fixed.
    async fn review_resume(&self, resume_id: &str) -> Result<String, BackendError>;

    async fn parse_cv(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        file: Bytes,
    ) -> Result<ParsedCv, BackendError>;
}
