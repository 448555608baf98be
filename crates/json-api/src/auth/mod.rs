//! Authentication
//!
//! Bearer tokens are resolved against the identity provider; handlers read the resulting
//! optional session from the depot.

pub(crate) mod middleware;
