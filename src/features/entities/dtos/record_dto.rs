use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::entities::models::{Address, Contact, ContactTypology, Testimonial};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAddressDto {
    #[serde(default)]
    #[validate(length(max = 120, message = "Road must not exceed 120 characters"))]
    pub road: String,

    #[serde(default)]
    #[validate(length(max = 20, message = "Number must not exceed 20 characters"))]
    pub number: String,

    #[validate(length(min = 1, max = 60, message = "City must be 1-60 characters"))]
    pub city: String,

    /// Two-letter code from the configured provinces
    #[validate(regex(
        path = "*crate::shared::validation::PROVINCE_CODE_REGEX",
        message = "Province must be a two-letter upper-case code"
    ))]
    pub province: String,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude out of range"))]
    pub lon: f64,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude out of range"))]
    pub lat: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddressResponseDto {
    pub id: i64,
    pub entity_id: i64,
    pub road: String,
    pub number: String,
    pub city: String,
    pub province: String,
    pub lon: f64,
    pub lat: f64,
}

impl From<Address> for AddressResponseDto {
    fn from(a: Address) -> Self {
        Self {
            id: a.id,
            entity_id: a.entity_id,
            road: a.road,
            number: a.number,
            city: a.city,
            province: a.province,
            lon: a.lon,
            lat: a.lat,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateContactDto {
    pub typology: ContactTypology,

    #[validate(length(min = 1, max = 60, message = "Contact must be 1-60 characters"))]
    pub contact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactResponseDto {
    pub id: i64,
    pub entity_id: i64,
    pub typology: ContactTypology,
    pub contact: String,
    pub href: String,
}

impl From<Contact> for ContactResponseDto {
    fn from(c: Contact) -> Self {
        let href = c.href();
        Self {
            id: c.id,
            entity_id: c.entity_id,
            typology: c.typology,
            contact: c.contact,
            href,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTestimonialDto {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    /// Rich text
    #[serde(default)]
    pub body: String,

    /// Defaults to today
    pub date_added: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestimonialResponseDto {
    pub id: i64,
    pub entity_id: i64,
    pub title: String,
    pub body: String,
    pub date_added: NaiveDate,
}

impl From<Testimonial> for TestimonialResponseDto {
    fn from(t: Testimonial) -> Self {
        Self {
            id: t.id,
            entity_id: t.entity_id,
            title: t.title,
            body: t.body,
            date_added: t.date_added,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_validation() {
        let dto: CreateAddressDto = serde_json::from_str(
            r#"{"city": "Rovereto", "province": "TN", "lon": 11.04, "lat": 45.89}"#,
        )
        .unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.road, "");

        let bad = CreateAddressDto {
            province: "tn".to_string(),
            lat: 120.0,
            ..dto
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("province"));
        assert!(errors.field_errors().contains_key("lat"));
    }

    #[test]
    fn test_contact_typology_parses_lowercase() {
        let dto: CreateContactDto =
            serde_json::from_str(r#"{"typology": "phone", "contact": "0464 241649"}"#).unwrap();
        assert_eq!(dto.typology, ContactTypology::Phone);
        assert!(serde_json::from_str::<CreateContactDto>(
            r#"{"typology": "fax", "contact": "1"}"#
        )
        .is_err());
    }
}
