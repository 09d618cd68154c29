//! Point-of-contact credits.

use serde::{Deserialize, Serialize};

/// Name used when no contact name is configured and the login name is unknown.
pub const UNKNOWN_CONTACT: &str = "Unknown";

/// Who to contact about a toolbox.
///
/// Unset fields render empty, except the name, which falls back to the
/// login name of the current user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Contact {
    pub name: Option<String>,
    pub organization: Option<String>,
    pub email: Option<String>,
}

impl Contact {
    /// The configured name, else `$USER` / `$USERNAME`, else [`UNKNOWN_CONTACT`].
    pub fn resolved_name(&self) -> String {
        self.name
            .clone()
            .filter(|n| !n.is_empty())
            .or_else(|| std::env::var("USER").ok().filter(|n| !n.is_empty()))
            .or_else(|| std::env::var("USERNAME").ok().filter(|n| !n.is_empty()))
            .unwrap_or_else(|| UNKNOWN_CONTACT.to_string())
    }

    /// Credit lines: point of contact, organization, email.
    pub fn credits(&self) -> [String; 3] {
        [
            format!("<b> Point of Contact (POC):{}</b> ", self.resolved_name()),
            format!(
                "<b> Organization: {}</b> ",
                self.organization.as_deref().unwrap_or_default()
            ),
            format!(
                "<b> Email: {}</b> ",
                self.email.as_deref().unwrap_or_default()
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credits_with_configured_contact() {
        let contact = Contact {
            name: Some("Ada".into()),
            organization: Some("Survey".into()),
            email: Some("ada@example.org".into()),
        };
        assert_eq!(
            contact.credits(),
            [
                "<b> Point of Contact (POC):Ada</b> ".to_string(),
                "<b> Organization: Survey</b> ".to_string(),
                "<b> Email: ada@example.org</b> ".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_name_falls_back() {
        let contact = Contact::default();
        assert!(!contact.resolved_name().is_empty());
        assert_eq!(contact.credits()[2], "<b> Email: </b> ");
    }
}
