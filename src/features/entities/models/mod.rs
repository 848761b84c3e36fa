mod address;
mod contact;
mod entity;
mod testimonial;

pub use address::Address;
pub use contact::{Contact, ContactTypology};
pub use entity::{Entity, EntitySummary, PublishedEntity};
pub use testimonial::Testimonial;
