use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient, non-blocking notification. Drained by the next session view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            at: Utc::now(),
        }
    }
}

pub const SAVE_FAILED: &str = "Failed to save resume";
pub const SAVE_SUCCEEDED: &str = "Resume saved successfully";
pub const ADD_FAILED: &str = "Failed to add section";
pub const DELETE_SUCCEEDED: &str = "Section deleted successfully";
pub const DELETE_FAILED: &str = "Failed to delete section";
pub const REORDER_FAILED: &str = "Failed to save section order";

pub fn section_added(title: &str) -> String {
    format!("{title} section added successfully")
}
