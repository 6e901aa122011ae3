//! Ignore matching and directory traversal for dewdrops.
//!
//! # Overview
//!
//! `dewdrops-scan` turns a root directory into the set of candidate files
//! that a context document is built from:
//!
//! - **Ignore rules** compiled from gitignore-style lines ([`IgnoreMatcher`])
//! - **Pruning** of excluded directories and any `.git` directory
//! - **Self-exclusion** of the generated document by file name
//!
//! # Example
//!
//! ```rust,no_run
//! use dewdrops_scan::{DumpConfig, Walker};
//!
//! let config = DumpConfig::new("/path/to/repo");
//! let (walker, _warnings) = Walker::from_config(&config);
//! let candidates = walker.walk(&config.root).unwrap();
//!
//! for path in candidates.into_sorted() {
//!     println!("{path}");
//! }
//! ```

mod ignore;
mod walker;

pub use ignore::{IgnoreMatcher, Pattern, PatternError, load_ignore_file};
pub use walker::{Admission, CandidateSet, Walker};

// Re-export core types for convenience
pub use dewdrops_core::{DumpConfig, DumpError, FileEntry, RelPath, ScanWarning, WarningKind};
