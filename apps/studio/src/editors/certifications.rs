use serde::Deserialize;

use super::education::non_empty;
use super::list::Patch;
use crate::models::entries::CertificationEntry;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CertificationPatch {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub date: Option<String>,
    pub expiry_date: Option<String>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
}

impl Patch<CertificationEntry> for CertificationPatch {
    fn apply_to(self, entry: &mut CertificationEntry) {
        if let Some(name) = self.name {
            entry.name = name;
        }
        if let Some(issuer) = self.issuer {
            entry.issuer = issuer;
        }
        if let Some(date) = self.date {
            entry.date = date;
        }
        if let Some(expiry_date) = self.expiry_date {
            entry.expiry_date = non_empty(expiry_date);
        }
        if let Some(credential_id) = self.credential_id {
            entry.credential_id = non_empty(credential_id);
        }
        if let Some(credential_url) = self.credential_url {
            entry.credential_url = non_empty(credential_url);
        }
    }
}
