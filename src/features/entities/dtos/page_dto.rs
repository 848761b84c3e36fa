//! What the list and detail templates receive.

use serde::Serialize;

use crate::features::entities::models::{Address, Contact, ContactTypology, EntitySummary, Testimonial};

#[derive(Debug, Clone, Serialize)]
pub struct AddressView {
    pub id: i64,
    pub road: String,
    pub number: String,
    pub city: String,
    pub province: String,
    pub province_name: Option<String>,
    pub display: String,
}

impl AddressView {
    pub fn new(address: Address, province_name: Option<&str>) -> Self {
        let display = address.to_string();
        Self {
            id: address.id,
            road: address.road,
            number: address.number,
            city: address.city,
            province: address.province,
            province_name: province_name.map(str::to_string),
            display,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactView {
    pub typology: ContactTypology,
    pub label: &'static str,
    pub contact: String,
    pub href: String,
}

impl From<Contact> for ContactView {
    fn from(contact: Contact) -> Self {
        Self {
            typology: contact.typology,
            label: contact.typology.label(),
            href: contact.href(),
            contact: contact.contact,
        }
    }
}

/// One row of the report list
#[derive(Debug, Clone, Serialize)]
pub struct EntityCard {
    #[serde(flatten)]
    pub entity: EntitySummary,
    pub detail_url: String,
    pub addresses: Vec<AddressView>,
    pub contacts: Vec<ContactView>,
}

/// A report with everything the detail page shows
#[derive(Debug, Clone, Serialize)]
pub struct EntityDetail {
    #[serde(flatten)]
    pub entity: EntitySummary,
    pub display_name: String,
    pub addresses: Vec<AddressView>,
    pub contacts: Vec<ContactView>,
    /// Newest first
    pub testimonials: Vec<Testimonial>,
}
