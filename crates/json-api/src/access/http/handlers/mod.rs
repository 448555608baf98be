//! Access Handlers

pub(crate) mod gate;
pub(crate) mod me;
pub(crate) mod navigation;
pub(crate) mod sign_out;
