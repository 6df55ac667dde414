use serde::Deserialize;

use super::list::{self, EntryEdit, Patch, StringList};
use super::EditError;
use crate::models::entries::{Entries, EntryId, ExperienceEntry, Ongoing};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperiencePatch {
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
    pub achievements: Option<Vec<String>>,
    pub tags: Option<StringList>,
}

impl Patch<ExperienceEntry> for ExperiencePatch {
    fn apply_to(self, entry: &mut ExperienceEntry) {
        if let Some(job_title) = self.job_title {
            entry.job_title = job_title;
        }
        if let Some(company) = self.company {
            entry.company = company;
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
        if let Some(achievements) = self.achievements {
            entry.achievements = achievements;
        }
        if let Some(tags) = self.tags {
            entry.tags = tags.into_vec();
        }
        // end date before the flag, so an explicit `current: true` wins
        if let Some(end_date) = self.end_date {
            entry.set_end_date(&end_date);
        }
        if let Some(current) = self.current {
            entry.mark_current(current);
        }
    }
}

/// Entry CRUD plus per-entry achievement bullets.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ExperienceEdit {
    Add,
    Update { id: EntryId, patch: ExperiencePatch },
    Delete { id: EntryId },
    AddAchievement { id: EntryId },
    UpdateAchievement { id: EntryId, index: usize, value: String },
    DeleteAchievement { id: EntryId, index: usize },
}

pub fn apply(
    data: &Entries<ExperienceEntry>,
    edit: ExperienceEdit,
) -> Result<Entries<ExperienceEntry>, EditError> {
    match edit {
        ExperienceEdit::Add => list::apply(data, EntryEdit::<ExperiencePatch>::Add),
        ExperienceEdit::Update { id, patch } => list::apply(data, EntryEdit::Update { id, patch }),
        ExperienceEdit::Delete { id } => {
            list::apply(data, EntryEdit::<ExperiencePatch>::Delete { id })
        }
        ExperienceEdit::AddAchievement { id } => achievements(data, &id, |items| {
            Ok(list::push_item(items))
        }),
        ExperienceEdit::UpdateAchievement { id, index, value } => {
            achievements(data, &id, |items| list::set_item(items, index, &value))
        }
        ExperienceEdit::DeleteAchievement { id, index } => {
            achievements(data, &id, |items| list::remove_item(items, index))
        }
    }
}

fn achievements<F>(
    data: &Entries<ExperienceEntry>,
    id: &EntryId,
    edit: F,
) -> Result<Entries<ExperienceEntry>, EditError>
where
    F: FnOnce(&[String]) -> Result<Vec<String>, EditError>,
{
    let entries = list::edit_items(&data.entries, id, |entry| &mut entry.achievements, edit)?;
    Ok(Entries::new(entries))
}
