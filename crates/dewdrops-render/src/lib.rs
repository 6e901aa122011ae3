//! Classification and document rendering for dewdrops.
//!
//! This crate turns a candidate set into the final context document:
//!
//! - **Classification** - text or binary, from the first 8000 bytes
//! - **Rendering** - structure listing plus fenced file contents
//! - **Pipeline** - traversal, rendering and a single output write
//!
//! ```rust,no_run
//! use dewdrops_render::{DumpConfig, Dumper};
//!
//! let report = Dumper::new(DumpConfig::new("/path/to/repo")).run().unwrap();
//!
//! println!("Rendered {} files", report.stats.files_rendered);
//! for (ext, count) in &report.stats.extension_counts {
//!     println!(".{ext}: {count}");
//! }
//! ```

mod classify;
mod dump;
mod render;
mod syntax;

pub use classify::{Classification, classify, classify_prefix};
pub use dump::{DumpReport, Dumper, write_document};
pub use render::{RenderedDocument, Renderer, TITLE, TREE_MARKER};
pub use syntax::{FALLBACK_TAG, SYNTAX_TAGS, syntax_tag};

// Re-export core types
pub use dewdrops_core::{DumpConfig, DumpError, DumpStats, RelPath, ScanWarning};
