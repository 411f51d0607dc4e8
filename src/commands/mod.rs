//! Subcommand handlers.

pub mod config;
pub mod fetch;
pub mod get;
pub mod list;
pub mod play;
pub mod shift;
