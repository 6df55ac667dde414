//! Id-keyed list operations shared by every entry-based editor.
//!
//! All functions take the current slice and return a new vector; the input is
//! never touched. Positions are never used to address entries.

use serde::Deserialize;

use super::EditError;
use crate::models::entries::{Entries, Entry, EntryId};

/// A field-level patch of one entry type. `None` fields are left untouched.
pub trait Patch<T> {
    fn apply_to(self, entry: &mut T);
}

/// Entry CRUD command: `{"op": "add"}`, `{"op": "update", "id", "patch"}`, `{"op": "delete", "id"}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EntryEdit<P> {
    Add,
    Update { id: EntryId, patch: P },
    Delete { id: EntryId },
}

/// String arrays arrive either as a list or as the raw comma-separated input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    List(Vec<String>),
    Csv(String),
}

impl StringList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            StringList::List(items) => items,
            StringList::Csv(raw) => split_csv(&raw),
        }
    }
}

/// `"Rust, Go ,,SQL"` → `["Rust", "Go", "SQL"]`
pub fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn apply<T, P>(data: &Entries<T>, edit: EntryEdit<P>) -> Result<Entries<T>, EditError>
where
    T: Entry,
    P: Patch<T>,
{
    let entries = match edit {
        EntryEdit::Add => add(&data.entries),
        EntryEdit::Update { id, patch } => update(&data.entries, &id, |entry| patch.apply_to(entry))?,
        EntryEdit::Delete { id } => remove(&data.entries, &id)?,
    };
    Ok(Entries::new(entries))
}

/// Appends a blank entry with a fresh id.
pub fn add<T: Entry>(entries: &[T]) -> Vec<T> {
    let mut next = entries.to_vec();
    next.push(T::blank());
    next
}

/// Replaces the entry matching `id`; others keep their values and positions.
pub fn update<T, F>(entries: &[T], id: &EntryId, edit: F) -> Result<Vec<T>, EditError>
where
    T: Entry,
    F: FnOnce(&mut T),
{
    let position = position(entries, id)?;
    let mut next = entries.to_vec();
    edit(&mut next[position]);
    Ok(next)
}

/// Drops the first entry matching `id`, and only that one.
pub fn remove<T: Entry>(entries: &[T], id: &EntryId) -> Result<Vec<T>, EditError> {
    let position = position(entries, id)?;
    let mut next = entries.to_vec();
    next.remove(position);
    Ok(next)
}

/// Appends an empty string item (a new achievement, skill or highlight).
pub fn push_item(items: &[String]) -> Vec<String> {
    let mut next = items.to_vec();
    next.push(String::new());
    next
}

pub fn set_item(items: &[String], index: usize, value: &str) -> Result<Vec<String>, EditError> {
    check_item(items, index)?;
    let mut next = items.to_vec();
    next[index] = value.to_string();
    Ok(next)
}

pub fn remove_item(items: &[String], index: usize) -> Result<Vec<String>, EditError> {
    check_item(items, index)?;
    let mut next = items.to_vec();
    next.remove(index);
    Ok(next)
}

/// Runs an item edit against one string list of the entry matching `id`.
pub fn edit_items<T, F>(
    entries: &[T],
    id: &EntryId,
    field: fn(&mut T) -> &mut Vec<String>,
    edit: F,
) -> Result<Vec<T>, EditError>
where
    T: Entry,
    F: FnOnce(&[String]) -> Result<Vec<String>, EditError>,
{
    let position = position(entries, id)?;
    let mut next = entries.to_vec();
    let items = field(&mut next[position]);
    *items = edit(items.as_slice())?;
    Ok(next)
}

fn check_item(items: &[String], index: usize) -> Result<(), EditError> {
    if index < items.len() {
        Ok(())
    } else {
        Err(EditError::ItemOutOfRange {
            index,
            len: items.len(),
        })
    }
}

fn position<T: Entry>(entries: &[T], id: &EntryId) -> Result<usize, EditError> {
    entries
        .iter()
        .position(|entry| entry.id() == id)
        .ok_or_else(|| EditError::EntryNotFound(id.clone()))
}
