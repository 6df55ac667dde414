use serde::Deserialize;

use crate::models::section::TextData;

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryPatch {
    pub content: String,
}

pub fn apply(_data: &TextData, patch: SummaryPatch) -> TextData {
    TextData {
        content: patch.content,
    }
}
