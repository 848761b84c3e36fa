//! Reports ("segnalazioni"): the list and detail pages, publish/unpublish
//! actions, and the visibility-scoped queries behind them.
//!
//! ## Endpoints (under the mount prefix)
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/entities/` | No | Paginated, filterable list |
//! | GET | `/entities/{id}/` | No | Report detail with testimonials |
//! | POST | `/entities/{id}/publish/` | Login | Publish, redirect to detail |
//! | POST | `/entities/{id}/unpublish/` | Login | Unpublish, redirect to detail |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use handlers::EntityPagesState;
pub use services::{EntityService, RecordService};
