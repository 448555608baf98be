//! Maître
//!
//! Maître decides who gets into a restaurant management application: it models sessions,
//! tenant profiles, roles and permissions, and turns a resolved [`state::AuthState`] into
//! a route [`gate::GateDecision`]. Everything here is pure; fetching the state is the job
//! of `maitre-app`.

pub mod gate;
pub mod navigation;
pub mod permissions;
pub mod prelude;
pub mod profiles;
pub mod restaurants;
pub mod roles;
pub mod session;
pub mod state;
pub mod uuids;
