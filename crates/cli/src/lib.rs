//! Command-line front end for the pet tracker.
//! - `routes` maps URL-style paths onto pages.
//! - `commands` holds one module per page or dialog.
//! - `render` turns records into cards and tables.

pub mod args;
pub mod commands;
pub mod render;
pub mod routes;
mod startup;

pub use args::Cli;
pub use startup::run;
