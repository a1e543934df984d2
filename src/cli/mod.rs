//! CLI operation handlers.
//!
//! - [`listing`]: enumerate the configured repository once
//!
//! Output formatting utilities are in [`output`].

pub mod listing;
pub mod output;
