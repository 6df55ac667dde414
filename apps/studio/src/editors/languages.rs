use serde::Deserialize;

use super::list::Patch;
use crate::models::entries::{LanguageEntry, Proficiency};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LanguagePatch {
    pub language: Option<String>,
    /// Free text from the select; unknown values coerce to `beginner`.
    pub proficiency: Option<String>,
}

impl Patch<LanguageEntry> for LanguagePatch {
    fn apply_to(self, entry: &mut LanguageEntry) {
        if let Some(language) = self.language {
            entry.language = language;
        }
        if let Some(proficiency) = self.proficiency {
            entry.proficiency = Proficiency::parse_lenient(&proficiency);
        }
    }
}
