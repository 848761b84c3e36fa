//! The map: GeoJSON layers per category, the full-page map and the
//! address popups it loads.
//!
//! ## Endpoints (under the mount prefix)
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/data/{slug}.geojson` | No | Feature collection of a category |
//! | GET | `/popup/{id}/` | No | Popup fragment of an address |
//! | GET | `/fullscreen/` | No | Map page |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use handlers::MapState;
pub use services::MapService;
