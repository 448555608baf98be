//! Shared fixtures and fakes for unit tests.

mod db;
mod helpers;

pub(crate) use db::TestDb;
pub(crate) use fakes::{GatedSubscriptionsService, PendingProfilesService};
pub(crate) use helpers::{complete_details, profile, session};
