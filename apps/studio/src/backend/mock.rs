//! Recording in-memory backend for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use super::{BackendError, ResumeBackend};
use crate::models::cv::CvTemplate;
use crate::models::server::{
    NewResume, NewSection, ParsedCv, ResumeUpdate, SectionOrder, ServerResume, ServerSection,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetResume(String),
    CreateResume(String),
    UpdateResume(String, CvTemplate),
    CreateSection(String, NewSection),
    DeleteSection(String),
    Reorder(String, Vec<SectionOrder>),
    Review(String),
    ParseCv(String),
}

#[derive(Default)]
pub struct MockBackend {
    calls: Mutex<Vec<Call>>,
    failing: AtomicBool,
    next_id: AtomicUsize,
    /// Scripted `(latency, succeeds)` of successive `update_resume` calls.
    /// Unscripted calls are immediate and follow the failing switch.
    scripted_saves: Mutex<VecDeque<(Duration, bool)>>,
    stored: Mutex<Option<ServerResume>>,
    review: Mutex<String>,
    parsed: Mutex<Option<Value>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resume(resume: Value) -> Self {
        let backend = Self::new();
        *backend.stored.lock().unwrap() = Some(serde_json::from_value(resume).unwrap());
        backend
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn script_save(&self, delay: Duration, succeeds: bool) {
        self.scripted_saves
            .lock()
            .unwrap()
            .push_back((delay, succeeds));
    }

    pub fn set_review(&self, text: &str) {
        *self.review.lock().unwrap() = text.to_string();
    }

    pub fn set_parsed(&self, json: Value) {
        *self.parsed.lock().unwrap() = Some(json);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn saves(&self) -> Vec<CvTemplate> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::UpdateResume(_, data) => Some(data),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self) -> Result<(), BackendError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(BackendError::Api {
                status: 503,
                message: "backend unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl ResumeBackend for MockBackend {
    async fn get_resume(&self, id: &str) -> Result<ServerResume, BackendError> {
        self.record(Call::GetResume(id.to_string()));
        self.check()?;
        self.stored
            .lock()
            .unwrap()
            .clone()
            .filter(|resume| resume.id == id)
            .ok_or(BackendError::Api {
                status: 404,
                message: format!("Resume {id} not found"),
            })
    }

    async fn create_resume(&self, resume: NewResume) -> Result<ServerResume, BackendError> {
        self.record(Call::CreateResume(resume.title.clone()));
        self.check()?;
        Ok(ServerResume {
            id: self.next_id("resume"),
            title: resume.title,
            sections: Vec::new(),
            created_at: None,
            updated_at: None,
            template_id: None,
            is_public: false,
        })
    }

    async fn update_resume(&self, id: &str, update: ResumeUpdate) -> Result<(), BackendError> {
        self.record(Call::UpdateResume(id.to_string(), update.data));
        let scripted = self.scripted_saves.lock().unwrap().pop_front();
        match scripted {
            Some((delay, succeeds)) => {
                tokio::time::sleep(delay).await;
                if succeeds {
                    Ok(())
                } else {
                    Err(BackendError::Api {
                        status: 500,
                        message: "write failed".to_string(),
                    })
                }
            }
            None => self.check(),
        }
    }

    async fn create_section(
        &self,
        resume_id: &str,
        section: NewSection,
    ) -> Result<ServerSection, BackendError> {
        self.record(Call::CreateSection(resume_id.to_string(), section.clone()));
        self.check()?;
        // the real service answers with upper-case types
        Ok(ServerSection {
            id: self.next_id("section"),
            kind: section.kind.to_uppercase(),
            title: Some(section.title),
            content: section.content,
            order: section.order as i64,
        })
    }

    async fn delete_section(&self, section_id: &str) -> Result<(), BackendError> {
        self.record(Call::DeleteSection(section_id.to_string()));
        self.check()
    }

    async fn reorder_sections(
        &self,
        resume_id: &str,
        order: Vec<SectionOrder>,
    ) -> Result<(), BackendError> {
        self.record(Call::Reorder(resume_id.to_string(), order));
        self.check()
    }

    async fn review_resume(&self, resume_id: &str) -> Result<String, BackendError> {
        self.record(Call::Review(resume_id.to_string()));
        self.check()?;
        Ok(self.review.lock().unwrap().clone())
    }

    async fn parse_cv(
        &self,
        file_name: &str,
        _content_type: Option<&str>,
        _file: Bytes,
    ) -> Result<ParsedCv, BackendError> {
        self.record(Call::ParseCv(file_name.to_string()));
        self.check()?;
        let json = self.parsed.lock().unwrap().clone().unwrap_or(Value::Null);
        Ok(ParsedCv {
            display: String::new(),
            json,
        })
    }
}
