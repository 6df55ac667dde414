use serde::Deserialize;

use crate::models::section::LinksData;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinksPatch {
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
}

pub fn apply(data: &LinksData, patch: LinksPatch) -> LinksData {
    LinksData {
        website: patch.website.or_else(|| data.website.clone()),
        linkedin: patch.linkedin.or_else(|| data.linkedin.clone()),
        github: patch.github.or_else(|| data.github.clone()),
        portfolio: patch.portfolio.or_else(|| data.portfolio.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_patch() {
        let data = LinksData {
            github: Some("https://github.com/jane".to_string()),
            ..LinksData::default()
        };
        let next = apply(
            &data,
            LinksPatch {
                linkedin: Some("https://linkedin.com/in/jane".to_string()),
                ..LinksPatch::default()
            },
        );
        assert_eq!(next.github, data.github);
        assert_eq!(next.linkedin.as_deref(), Some("https://linkedin.com/in/jane"));
    }
}
