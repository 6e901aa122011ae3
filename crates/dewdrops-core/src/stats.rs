//! Statistics accumulated while rendering a document.

use std::collections::BTreeMap;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::entry::RelPath;

/// Summary statistics for one rendered document.
///
/// `files_rendered` and `extension_counts` cover only files whose contents
/// were rendered; `max_depth` covers every candidate path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpStats {
    /// Number of text files whose contents were rendered.
    pub files_rendered: u64,
    /// Deepest candidate path, in segments.
    pub max_depth: u32,
    /// Rendered files per lower-cased extension, sorted by key.
    pub extension_counts: BTreeMap<CompactString, u64>,
}

impl DumpStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a candidate path's depth.
    pub fn observe_depth(&mut self, path: &RelPath) {
        self.max_depth = self.max_depth.max(path.depth());
    }

    /// Record a file whose contents were rendered.
    pub fn record_rendered(&mut self, path: &RelPath) {
        self.files_rendered += 1;
        *self.extension_counts.entry(path.extension_key()).or_insert(0) += 1;
    }
}
