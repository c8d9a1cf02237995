//! Helpers shared by the petrack crates: logging setup, state directory
//! handling and URL joining.

pub mod env;
pub mod utils;
