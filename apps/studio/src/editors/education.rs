use serde::Deserialize;

use super::list::Patch;
use crate::models::entries::{EducationEntry, Ongoing};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationPatch {
    pub degree: Option<String>,
    pub major: Option<String>,
    pub institution: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub gpa: Option<String>,
    pub description: Option<String>,
    pub achievements: Option<Vec<String>>,
}

impl Patch<EducationEntry> for EducationPatch {
    fn apply_to(self, entry: &mut EducationEntry) {
        if let Some(degree) = self.degree {
            entry.degree = degree;
        }
        if let Some(major) = self.major {
            entry.major = non_empty(major);
        }
        if let Some(institution) = self.institution {
            entry.institution = institution;
        }
        if let Some(location) = self.location {
            entry.location = location;
        }
        if let Some(start_date) = self.start_date {
            entry.start_date = start_date;
        }
        if let Some(gpa) = self.gpa {
            entry.gpa = non_empty(gpa);
        }
        if let Some(description) = self.description {
            entry.description = non_empty(description);
        }
        if let Some(achievements) = self.achievements {
            entry.achievements = achievements;
        }
        if let Some(end_date) = self.end_date {
            entry.set_end_date(&end_date);
        }
        if let Some(current) = self.current {
            entry.mark_current(current);
        }
    }
}

/// Optional text fields store an empty input as absent.
pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editors::list::{self, EntryEdit};
    use crate::models::entries::Entries;

    #[test]
    fn test_update_education_fields() {
        let data = list::apply(&Entries::default(), EntryEdit::<EducationPatch>::Add).unwrap();
        let id = data.entries[0].id.clone();
        let data = list::apply(
            &data,
            EntryEdit::Update {
                id: id.clone(),
                patch: EducationPatch {
                    degree: Some("BSc".to_string()),
                    institution: Some("TU Delft".to_string()),
                    gpa: Some("".to_string()),
                    current: Some(true),
                    ..EducationPatch::default()
                },
            },
        )
        .unwrap();

        let entry = &data.entries[0];
        assert_eq!(entry.id, id);
        assert_eq!(entry.degree, "BSc");
        assert_eq!(entry.institution, "TU Delft");
        assert_eq!(entry.gpa, None);
        assert!(entry.current);
    }
}
