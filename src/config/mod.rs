//! Configuration management for the match-rating service
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and the default rating constants.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use rating::RatingConfig;
