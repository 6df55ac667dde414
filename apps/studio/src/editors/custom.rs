use serde::Deserialize;

use crate::models::section::TextData;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Returns the new `(title, data)` pair of a custom section.
pub fn apply(title: &str, data: &TextData, patch: CustomPatch) -> (String, TextData) {
    let title = patch.title.unwrap_or_else(|| title.to_string());
    let content = patch.content.unwrap_or_else(|| data.content.clone());
    (title, TextData { content })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_content_independent() {
        let data = TextData {
            content: "RustConf 2024".to_string(),
        };
        let (title, next) = apply(
            "Talks",
            &data,
            CustomPatch {
                title: Some("Conference Talks".to_string()),
                content: None,
            },
        );
        assert_eq!(title, "Conference Talks");
        assert_eq!(next.content, "RustConf 2024");
    }
}
