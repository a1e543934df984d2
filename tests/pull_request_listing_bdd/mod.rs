//! Support modules for the pull request listing BDD tests.

pub(crate) mod harness;
#[path = "../support/runtime.rs"]
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use harness::{PULLS_PATH, page_mock, parse_numbers};
pub(crate) use state::{ListingState, run_listing};
