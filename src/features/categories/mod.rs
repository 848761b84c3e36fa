//! Report categories.
//!
//! Categories group reports on the map: each one has its own GeoJSON layer
//! addressed by slug. Managed through the admin API.

pub mod dtos;
pub mod models;
pub mod services;

pub use services::CategoryService;
