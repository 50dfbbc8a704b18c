//! Configuration module for Quiz-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use quiz_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Sweeping library: {}", config.api.library_id);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApiConfig, Config, Grouping, MultiPartEntry, OutputConfig, PacingConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
