//! Configuration management for reelscore
//!
//! This crate provides a validated configuration system with support for:
//! - Multiple formats (YAML, TOML, JSON)
//! - Config validation with helpful error messages
//! - Config merging (file + environment + CLI)
//! - Type-safe configuration structs
//!
//! # Example
//!
//! ```no_run
//! use reelscore_config::Config;
//!
//! // Load from default location (.reelscore.{toml,yml,json})
//! let config = Config::load()?;
//!
//! // Or load from specific file
//! let config = Config::from_file("path/to/config.toml")?;
//!
//! // Access config values
//! let normalize = config.scoring.normalize;
//! let shares = config.scoring.weights.shares;
//! # Ok::<(), reelscore_config::ConfigError>(())
//! ```

pub mod error;
pub mod loader;
pub mod types;
pub mod validation;

// Re-export main types for convenience
pub use error::{ConfigError, ErrorFormatter, Result};
pub use loader::{ConfigBuilder, Layer};
pub use types::*;

/// Trait for config validation
pub use validation::Validate;
