use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "contact_typology", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContactTypology {
    Phone,
    Email,
    Website,
}

impl ContactTypology {
    pub fn label(&self) -> &'static str {
        match self {
            ContactTypology::Phone => "Telefono",
            ContactTypology::Email => "Email",
            ContactTypology::Website => "Sito web",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Contact {
    pub id: i64,
    pub typology: ContactTypology,
    pub contact: String,
    pub entity_id: i64,
}

impl Contact {
    /// Link target for the contact: `tel:`, `mailto:` or the web address
    pub fn href(&self) -> String {
        match self.typology {
            ContactTypology::Phone => format!("tel:{}", dialable(&self.contact)),
            ContactTypology::Email => format!("mailto:{}", self.contact.trim()),
            ContactTypology::Website => {
                let site = self.contact.trim();
                if site.contains("://") {
                    site.to_string()
                } else {
                    format!("https://{}", site)
                }
            }
        }
    }
}

/// Digits only, keeping a leading `+`
fn dialable(number: &str) -> String {
    let number = number.trim();
    let mut out = String::with_capacity(number.len());
    if number.starts_with('+') {
        out.push('+');
    }
    out.extend(number.chars().filter(|c| c.is_ascii_digit()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(typology: ContactTypology, value: &str) -> Contact {
        Contact {
            id: 1,
            typology,
            contact: value.to_string(),
            entity_id: 1,
        }
    }

    #[test]
    fn test_phone_href() {
        assert_eq!(
            contact(ContactTypology::Phone, "0464 241649").href(),
            "tel:0464241649"
        );
        assert_eq!(
            contact(ContactTypology::Phone, "331-7436495").href(),
            "tel:3317436495"
        );
        assert_eq!(
            contact(ContactTypology::Phone, "+39 0464 241649").href(),
            "tel:+390464241649"
        );
    }

    #[test]
    fn test_email_and_website_href() {
        assert_eq!(
            contact(ContactTypology::Email, "info@example.org").href(),
            "mailto:info@example.org"
        );
        assert_eq!(
            contact(ContactTypology::Website, "www.example.org").href(),
            "https://www.example.org"
        );
        assert_eq!(
            contact(ContactTypology::Website, "http://example.org").href(),
            "http://example.org"
        );
    }
}
