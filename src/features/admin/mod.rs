//! Admin API for data entry.
//!
//! ## Endpoints (all require a session token)
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET, POST | `/api/admin/categories` | List, create categories |
//! | DELETE | `/api/admin/categories/{id}` | Delete an unused category |
//! | GET, POST | `/api/admin/evaluation-levels` | List, create levels |
//! | DELETE | `/api/admin/evaluation-levels/{short_name}` | Delete an unused level |
//! | GET, POST | `/api/admin/entities` | List (filterable), create reports |
//! | PUT, DELETE | `/api/admin/entities/{id}` | Replace, delete a report |
//! | POST | `/api/admin/entities/bulk-publish` | Publish/unpublish by id list |
//! | POST | `/api/admin/entities/{id}/{addresses,contacts,testimonials}` | Add owned records |
//! | DELETE | `/api/admin/{addresses,contacts,testimonials}/{id}` | Delete owned records |

pub mod handlers;
pub mod routes;

pub use handlers::AdminState;
