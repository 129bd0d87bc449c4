//! Storage infrastructure: configuration persistence.

pub mod config;

pub use config::{load_config, ConfigError, ServerConfig};
