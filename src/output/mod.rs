//! Output module for persisting crawl results
//!
//! This module handles:
//! - Writing assembled records to a CSV file
//! - Creating the output directory tree on demand

mod csv;

pub use self::csv::{write_records, OutputError, OutputResult};
