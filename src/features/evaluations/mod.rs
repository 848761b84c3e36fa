//! Evaluation levels: the sentiment tags attached to reports.
//!
//! Levels live in the database so they can be extended; the configured ones
//! are inserted at startup when missing.

pub mod dtos;
pub mod models;
pub mod services;

pub use services::EvaluationService;
