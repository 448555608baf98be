//! Maître Domain Concerns

pub mod profiles;
pub mod restaurants;
pub mod roles;
pub mod subscriptions;
