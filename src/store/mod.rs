//! Configuration persistence
//!
//! The configuration is a single JSON file holding the three client paths
//! and the alias -> address map.

pub mod model;
pub mod repository;

// Re-exports
pub use model::{ClientKind, Configuration};
pub use repository::{resolve_config_directory, ConfigStore};
