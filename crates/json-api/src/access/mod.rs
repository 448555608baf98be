//! Access
//!
//! Route gate decisions, the caller's resolved access, their navigation, and sign-out.

mod errors;
mod http;

pub(crate) use http::handlers::*;
