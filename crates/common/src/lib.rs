//! Shared helpers used by every binary and crate in the workspace.

pub mod types;
pub mod utils;
pub mod env;
