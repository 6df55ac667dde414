use serde::Deserialize;

use super::education::non_empty;
use super::list::Patch;
use crate::models::entries::AwardEntry;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AwardPatch {
    pub title: Option<String>,
    pub issuer: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

impl Patch<AwardEntry> for AwardPatch {
    fn apply_to(self, entry: &mut AwardEntry) {
        if let Some(title) = self.title {
            entry.title = title;
        }
        if let Some(issuer) = self.issuer {
            entry.issuer = issuer;
        }
        if let Some(date) = self.date {
            entry.date = date;
        }
        if let Some(description) = self.description {
            entry.description = non_empty(description);
        }
    }
}
