use serde::Deserialize;

use super::education::non_empty;
use super::list::Patch;
use crate::models::entries::PublicationEntry;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PublicationPatch {
    pub title: Option<String>,
    pub publisher: Option<String>,
    pub date: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

impl Patch<PublicationEntry> for PublicationPatch {
    fn apply_to(self, entry: &mut PublicationEntry) {
        if let Some(title) = self.title {
            entry.title = title;
        }
        if let Some(publisher) = self.publisher {
            entry.publisher = publisher;
        }
        if let Some(date) = self.date {
            entry.date = date;
        }
        if let Some(url) = self.url {
            entry.url = non_empty(url);
        }
        if let Some(description) = self.description {
            entry.description = non_empty(description);
        }
    }
}
