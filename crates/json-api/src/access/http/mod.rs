//! Access HTTP surface

pub(crate) mod handlers;
