//! Configuration management module
//!
//! This module handles loading, saving, and validating application
//! configuration. Configuration is stored as JSON with atomic writes to
//! prevent corruption. The polling interval is not part of the configuration.

pub mod manager;
pub mod models;

pub use manager::ConfigManager;
pub use models::{AppConfig, WindowState};
