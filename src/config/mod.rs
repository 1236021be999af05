//! Configuration module for bookcrawl
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every value has a built-in default, so the crawler runs without a
//! config file at all.
//!
//! # Example
//!
//! ```no_run
//! use bookcrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("bookcrawl.toml")).unwrap();
//! println!("Crawl starts at: {}", config.catalog.start_url());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CatalogConfig, Config, HttpConfig, OutputConfig, ThrottleConfig};

// Re-export parser functions
pub use parser::{default_config, load_config};
