use serde::Deserialize;

use super::list::{self, StringList};
use super::EditError;
use crate::models::entries::EntryId;
use crate::models::section::SkillsData;

/// Category CRUD keyed by category id; skills inside a category are plain strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SkillsEdit {
    AddCategory,
    RenameCategory { id: EntryId, name: String },
    DeleteCategory { id: EntryId },
    SetSkills { id: EntryId, skills: StringList },
    AddSkill { id: EntryId },
    UpdateSkill { id: EntryId, index: usize, value: String },
    DeleteSkill { id: EntryId, index: usize },
}

pub fn apply(data: &SkillsData, edit: SkillsEdit) -> Result<SkillsData, EditError> {
    let categories = &data.categories;
    let categories = match edit {
        SkillsEdit::AddCategory => list::add(categories),
        SkillsEdit::RenameCategory { id, name } => {
            list::update(categories, &id, |category| category.name = name)?
        }
        SkillsEdit::DeleteCategory { id } => list::remove(categories, &id)?,
        SkillsEdit::SetSkills { id, skills } => {
            list::update(categories, &id, |category| category.skills = skills.into_vec())?
        }
        SkillsEdit::AddSkill { id } => {
            list::edit_items(categories, &id, |category| &mut category.skills, |items| {
                Ok(list::push_item(items))
            })?
        }
        SkillsEdit::UpdateSkill { id, index, value } => {
            list::edit_items(categories, &id, |category| &mut category.skills, |items| {
                list::set_item(items, index, &value)
            })?
        }
        SkillsEdit::DeleteSkill { id, index } => {
            list::edit_items(categories, &id, |category| &mut category.skills, |items| {
                list::remove_item(items, index)
            })?
        }
    };
    Ok(SkillsData { categories })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lifecycle() {
        let data = apply(&SkillsData::default(), SkillsEdit::AddCategory).unwrap();
        let id = data.categories[0].id.clone();
        assert_eq!(data.categories[0].name, "New Category");

        let data = apply(
            &data,
            SkillsEdit::RenameCategory {
                id: id.clone(),
                name: "Languages".to_string(),
            },
        )
        .unwrap();
        let data = apply(&data, SkillsEdit::AddSkill { id: id.clone() }).unwrap();
        let data = apply(
            &data,
            SkillsEdit::UpdateSkill {
                id: id.clone(),
                index: 0,
                value: "Rust".to_string(),
            },
        )
        .unwrap();
        assert_eq!(data.categories[0].name, "Languages");
        assert_eq!(data.categories[0].skills, vec!["Rust"]);

        let data = apply(&data, SkillsEdit::DeleteCategory { id }).unwrap();
        assert!(data.categories.is_empty());
    }

    #[test]
    fn test_set_skills_from_csv() {
        let data = apply(&SkillsData::default(), SkillsEdit::AddCategory).unwrap();
        let id = data.categories[0].id.clone();
        let data = apply(
            &data,
            SkillsEdit::SetSkills {
                id,
                skills: StringList::Csv("Rust, SQL, ".to_string()),
            },
        )
        .unwrap();
        assert_eq!(data.categories[0].skills, vec!["Rust", "SQL"]);
    }
}
