//! # Proofreader Config
//!
//! Application configuration (TOML) and the settings store implementations.

mod error;
mod loader;
mod schema;
mod store;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use store::{FileSettingsStore, MemorySettingsStore};
