use serde::Deserialize;

use super::education::non_empty;
use super::list::{self, EntryEdit, Patch, StringList};
use super::EditError;
use crate::models::entries::{Entries, EntryId, Ongoing, ProjectEntry};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub role: Option<String>,
    pub technologies: Option<StringList>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub url: Option<String>,
    pub github_url: Option<String>,
    pub highlights: Option<Vec<String>>,
}

impl Patch<ProjectEntry> for ProjectPatch {
    fn apply_to(self, entry: &mut ProjectEntry) {
        if let Some(name) = self.name {
            entry.name = name;
        }
        if let Some(description) = self.description {
            entry.description = description;
        }
        if let Some(role) = self.role {
            entry.role = non_empty(role);
        }
        if let Some(technologies) = self.technologies {
            entry.technologies = technologies.into_vec();
        }
        if let Some(start_date) = self.start_date {
            entry.start_date = start_date;
        }
        if let Some(url) = self.url {
            entry.url = non_empty(url);
        }
        if let Some(github_url) = self.github_url {
            entry.github_url = non_empty(github_url);
        }
        if let Some(highlights) = self.highlights {
            entry.highlights = highlights;
        }
        if let Some(end_date) = self.end_date {
            entry.set_end_date(&end_date);
        }
        if let Some(current) = self.current {
            entry.mark_current(current);
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ProjectEdit {
    Add,
    Update { id: EntryId, patch: ProjectPatch },
    Delete { id: EntryId },
    AddHighlight { id: EntryId },
    UpdateHighlight { id: EntryId, index: usize, value: String },
    DeleteHighlight { id: EntryId, index: usize },
}

pub fn apply(
    data: &Entries<ProjectEntry>,
    edit: ProjectEdit,
) -> Result<Entries<ProjectEntry>, EditError> {
    let entries = match edit {
        ProjectEdit::Add => return list::apply(data, EntryEdit::<ProjectPatch>::Add),
        ProjectEdit::Update { id, patch } => {
            return list::apply(data, EntryEdit::Update { id, patch })
        }
        ProjectEdit::Delete { id } => {
            return list::apply(data, EntryEdit::<ProjectPatch>::Delete { id })
        }
        ProjectEdit::AddHighlight { id } => {
            list::edit_items(&data.entries, &id, |entry| &mut entry.highlights, |items| {
                Ok(list::push_item(items))
            })?
        }
        ProjectEdit::UpdateHighlight { id, index, value } => {
            list::edit_items(&data.entries, &id, |entry| &mut entry.highlights, |items| {
                list::set_item(items, index, &value)
            })?
        }
        ProjectEdit::DeleteHighlight { id, index } => {
            list::edit_items(&data.entries, &id, |entry| &mut entry.highlights, |items| {
                list::remove_item(items, index)
            })?
        }
    };
    Ok(Entries::new(entries))
}
