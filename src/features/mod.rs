pub mod admin;
pub mod auth;
pub mod categories;
pub mod entities;
pub mod evaluations;
pub mod map;
