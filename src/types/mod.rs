// tabstash shared type definitions
// Each submodule defines types used across the crate.

pub mod browser;
pub mod errors;
pub mod record;
pub mod settings;
pub mod snapshot;
pub mod window;
