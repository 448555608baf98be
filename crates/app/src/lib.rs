//! Maître application services: persistence, identity and the access resolution pipeline.

pub mod access;
pub mod context;
pub mod database;
pub mod domain;
pub mod identity;

#[cfg(test)]
mod test;
