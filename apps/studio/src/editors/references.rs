use serde::Deserialize;

use super::education::non_empty;
use super::list::Patch;
use crate::models::entries::ReferenceEntry;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReferencePatch {
    pub name: Option<String>,
    pub position: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub relationship: Option<String>,
}

impl Patch<ReferenceEntry> for ReferencePatch {
    fn apply_to(self, entry: &mut ReferenceEntry) {
        if let Some(name) = self.name {
            entry.name = name;
        }
        if let Some(position) = self.position {
            entry.position = position;
        }
        if let Some(company) = self.company {
            entry.company = company;
        }
        if let Some(email) = self.email {
            entry.email = email;
        }
        if let Some(phone) = self.phone {
            entry.phone = phone;
        }
        if let Some(relationship) = self.relationship {
            entry.relationship = non_empty(relationship);
        }
    }
}
