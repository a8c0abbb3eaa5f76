//! pitaka-config
//!
//! Persisted user preferences and their on-disk management.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{ConfigBackup, ConfigManager};
pub use model::{default_base_dir, Config};
