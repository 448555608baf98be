//! Custom Roles

pub mod errors;
mod repository;
pub mod service;

pub use errors::RolesServiceError;
pub use service::*;
