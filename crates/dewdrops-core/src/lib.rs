//! Core types for dewdrops.
//!
//! This crate provides the data structures shared by the traversal and
//! rendering crates: relative paths, run configuration, errors and the
//! statistics accumulated while rendering a context document.

mod config;
mod entry;
mod error;
mod stats;

pub use config::{
    DEFAULT_IGNORE_FILE_NAME, DEFAULT_INSPECT_BYTES, DEFAULT_OUTPUT_FILE_NAME, DumpConfig,
    DumpConfigBuilder,
};
pub use entry::{FileEntry, GIT_DIR_NAME, NO_EXTENSION_KEY, RelPath};
pub use error::{DumpError, ScanWarning, WarningKind};
pub use stats::DumpStats;
