use serde::Deserialize;

use super::list::Patch;
use crate::models::entries::{Ongoing, VolunteerEntry};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolunteerPatch {
    pub role: Option<String>,
    pub organization: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl Patch<VolunteerEntry> for VolunteerPatch {
    fn apply_to(self, entry: &mut VolunteerEntry) {
        if let Some(role) = self.role {
            entry.role = role;
        }
        if let Some(organization) = self.organization {
            entry.organization = organization;
        }
        if let Some(location) = self.location {
            entry.location = location;
        }
        if let Some(start_date) = self.start_date {
            entry.start_date = start_date;
        }
        if let Some(description) = self.description {
            entry.description = description;
        }
        if let Some(end_date) = self.end_date {
            entry.set_end_date(&end_date);
        }
        if let Some(current) = self.current {
            entry.mark_current(current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checking_current_clears_end_date() {
        let mut entry = VolunteerEntry {
            end_date: Some("2019-06".to_string()),
            ..VolunteerEntry::default()
        };
        VolunteerPatch {
            current: Some(true),
            ..VolunteerPatch::default()
        }
        .apply_to(&mut entry);
        assert!(entry.current);
        assert_eq!(entry.end_date, None);

        VolunteerPatch {
            end_date: Some("2020-02".to_string()),
            ..VolunteerPatch::default()
        }
        .apply_to(&mut entry);
        assert!(!entry.current);
        assert_eq!(entry.end_date.as_deref(), Some("2020-02"));
    }
}
