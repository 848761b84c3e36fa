mod entity_dto;
mod page_dto;
mod record_dto;

pub use entity_dto::{
    AdminEntityQuery, BulkPublishDto, BulkPublishResponseDto, EntityResponseDto,
    EntitySummaryDto, SaveEntityDto,
};
pub use page_dto::{AddressView, ContactView, EntityCard, EntityDetail};
pub use record_dto::{
    AddressResponseDto, ContactResponseDto, CreateAddressDto, CreateContactDto,
    CreateTestimonialDto, TestimonialResponseDto,
};
