//! Wire shapes exchanged with the persistence backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::cv::CvTemplate;

/// Resume row as the backend returns it from `GET /resume/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerResume {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sections: Vec<ServerSection>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub template_id: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

/// Section row. `kind` carries whatever casing the backend uses (`EXPERIENCE`).
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: Option<String>,
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub order: i64,
}

/// Body of `POST /resume`.
#[derive(Debug, Clone, Serialize)]
pub struct NewResume {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<CvTemplate>,
}

/// Body of `POST /resume/{id}/sections`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSection {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub content: Value,
    pub order: usize,
}

/// Body of `PUT /resume/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeUpdate {
    pub title: String,
    pub data: CvTemplate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionOrder {
    pub id: String,
    pub order: usize,
}

/// Body of `PUT /resume/{id}/sections/reorder`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub section_orders: Vec<SectionOrder>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewResponse {
    #[serde(default)]
    pub review: String,
}

/// Response of the CV parse endpoint: a human-readable rendition and the raw JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct ParsedCv {
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub json: Value,
}

/// Error body the backend sends with non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    pub message: Option<Value>,
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn describe(&self) -> Option<String> {
        match &self.message {
            Some(Value::String(message)) => Some(message.clone()),
            Some(Value::Array(messages)) => Some(
                messages
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => self.error.clone(),
        }
    }
}
