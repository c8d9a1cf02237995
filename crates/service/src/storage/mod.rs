//! Storage helpers for client-side state
//!
//! Small JSON file-backed maps; the CLI's stand-in for browser storage.

pub mod json_map_store;
