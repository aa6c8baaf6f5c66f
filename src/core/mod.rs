//! Core module for projviz
//!
//! Scanning, per-file classification and the summaries derived from the
//! resulting file registry.

pub mod classifier;
pub mod scanner;
pub mod summary;
mod types;

pub use classifier::classify_file;
pub use scanner::{DEFAULT_EXCLUDED_FOLDERS, TreeScanner};
pub use types::*;
