use serde::Deserialize;

use super::education::non_empty;
use super::list::Patch;
use crate::models::entries::CourseEntry;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CoursePatch {
    pub name: Option<String>,
    pub institution: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

impl Patch<CourseEntry> for CoursePatch {
    fn apply_to(self, entry: &mut CourseEntry) {
        if let Some(name) = self.name {
            entry.name = name;
        }
        if let Some(institution) = self.institution {
            entry.institution = institution;
        }
        if let Some(date) = self.date {
            entry.date = date;
        }
        if let Some(description) = self.description {
            entry.description = non_empty(description);
        }
    }
}
