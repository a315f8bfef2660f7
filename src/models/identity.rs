use serde::{Deserialize, Serialize};

use super::non_empty;

/// Who the flyer is for and who vouched for it. Every field is optional;
/// a blank value suppresses its line on the flyer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Gregorian date, usually `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hijri_date: Option<String>,
    /// `data:` URI, `file://` URI or a filesystem path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifier_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl Identity {
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    pub fn address(&self) -> Option<&str> {
        non_empty(&self.address)
    }

    pub fn date(&self) -> Option<&str> {
        non_empty(&self.date)
    }

    pub fn hijri_date(&self) -> Option<&str> {
        non_empty(&self.hijri_date)
    }

    pub fn logo(&self) -> Option<&str> {
        non_empty(&self.logo)
    }

    pub fn poster_name(&self) -> Option<&str> {
        non_empty(&self.poster_name)
    }

    pub fn verifier_name(&self) -> Option<&str> {
        non_empty(&self.verifier_name)
    }

    pub fn phone(&self) -> Option<&str> {
        non_empty(&self.phone)
    }

    pub fn last_updated(&self) -> Option<&str> {
        non_empty(&self.last_updated)
    }

    /// "Verified by: X" wins over "Uploaded by: X"; the phone is appended
    /// only when there is a name to attach it to.
    pub fn attribution_line(&self) -> Option<String> {
        let name_part = match (self.verifier_name(), self.poster_name()) {
            (Some(v), _) => format!("Verified by: {}", v),
            (None, Some(p)) => format!("Uploaded by: {}", p),
            (None, None) => return None,
        };
        Some(match self.phone() {
            Some(phone) => format!("{} • {}", name_part, phone),
            None => name_part,
        })
    }
}
