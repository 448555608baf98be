//! Subscriptions

pub mod errors;
mod repository;
pub mod service;

pub use errors::SubscriptionsServiceError;
pub use service::*;
