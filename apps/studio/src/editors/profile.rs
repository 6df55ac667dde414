use serde::Deserialize;

use crate::models::section::ProfileData;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub professional_title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub photo: Option<String>,
}

/// Flat field replacement. Empty name or email is accepted here.
pub fn apply(data: &ProfileData, patch: ProfilePatch) -> ProfileData {
    let mut next = data.clone();
    if let Some(name) = patch.name {
        next.name = name;
    }
    if let Some(professional_title) = patch.professional_title {
        next.professional_title = Some(professional_title);
    }
    if let Some(email) = patch.email {
        next.email = email;
    }
    if let Some(phone) = patch.phone {
        next.phone = phone;
    }
    if let Some(location) = patch.location {
        next.location = location;
    }
    if let Some(summary) = patch.summary {
        next.summary = Some(summary);
    }
    if let Some(photo) = patch.photo {
        next.photo = Some(photo);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_touches_only_given_fields() {
        let data = ProfileData {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            ..ProfileData::default()
        };
        let next = apply(
            &data,
            ProfilePatch {
                email: Some(String::new()),
                location: Some("Lisbon".to_string()),
                ..ProfilePatch::default()
            },
        );
        assert_eq!(next.name, "Jane Doe");
        assert_eq!(next.email, "");
        assert_eq!(next.location, "Lisbon");
        assert_eq!(data.location, "");
    }
}
