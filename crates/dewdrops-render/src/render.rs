//! Document rendering and statistics.

use std::path::Path;

use tracing::{debug, info};

use dewdrops_core::{DEFAULT_INSPECT_BYTES, DumpError, DumpStats, RelPath, ScanWarning};

use crate::classify::classify_prefix;
use crate::syntax::syntax_tag;

/// Document title line.
pub const TITLE: &str = "# Repository Context";

/// Prefix for each line of the structure listing.
pub const TREE_MARKER: &str = "├── ";

/// A rendered document with its statistics.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Document bytes.
    pub content: Vec<u8>,
    /// Statistics over the rendered files.
    pub stats: DumpStats,
    /// Candidates in the order they were listed.
    pub listed: Vec<RelPath>,
    /// Candidates classified as binary.
    pub binary_skipped: u64,
    /// Candidates that could not be read.
    pub warnings: Vec<ScanWarning>,
}

/// Running state for one render call.
struct Accumulator {
    out: Vec<u8>,
    stats: DumpStats,
    binary_skipped: u64,
    warnings: Vec<ScanWarning>,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            out: Vec::new(),
            stats: DumpStats::new(),
            binary_skipped: 0,
            warnings: Vec::new(),
        }
    }

    fn push(&mut self, text: &str) {
        self.out.extend_from_slice(text.as_bytes());
    }

    fn push_file(&mut self, path: &RelPath, content: &[u8]) {
        let tag = syntax_tag(&path.extension_key());
        self.push(&format!("### file: {path}\n```{tag}\n"));
        self.out.extend_from_slice(content);
        if content.last().is_some_and(|&b| b != b'\n') {
            self.out.push(b'\n');
        }
        self.push("```\n\n");
        self.stats.record_rendered(path);
    }
}

/// Renders candidate files into a single Markdown document.
#[derive(Debug, Clone)]
pub struct Renderer {
    inspect_bytes: usize,
}

impl Renderer {
    /// Create a renderer with the default classification window.
    pub fn new() -> Self {
        Self {
            inspect_bytes: DEFAULT_INSPECT_BYTES,
        }
    }

    /// Use a different classification window.
    pub fn with_inspect_bytes(mut self, inspect_bytes: usize) -> Self {
        self.inspect_bytes = inspect_bytes.max(1);
        self
    }

    /// Render `candidates`, resolved against `root`.
    ///
    /// Candidates are sorted and deduplicated first, so the output does not
    /// depend on traversal order. Files that cannot be read are skipped and
    /// reported as warnings.
    pub fn render(
        &self,
        candidates: impl IntoIterator<Item = RelPath>,
        root: &Path,
    ) -> Result<RenderedDocument, DumpError> {
        let mut paths: Vec<RelPath> = candidates.into_iter().collect();
        if paths.is_empty() {
            return Err(DumpError::EmptyResult {
                root: root.to_path_buf(),
            });
        }
        paths.sort_unstable();
        paths.dedup();

        let mut acc = Accumulator::new();
        acc.push(TITLE);
        acc.push("\n\n## Structure\n\n```text\n");
        for path in &paths {
            acc.push(&format!("{TREE_MARKER}{path}\n"));
            acc.stats.observe_depth(path);
        }
        acc.push("```\n\n## File Contents\n\n");

        for path in &paths {
            let full_path = path.to_path(root);
            let content = match std::fs::read(&full_path) {
                Ok(content) => content,
                Err(err) => {
                    debug!(path = %path, error = %err, "skipping unreadable file");
                    acc.warnings.push(ScanWarning::read_error(&full_path, &err));
                    continue;
                }
            };

            if !classify_prefix(&content, self.inspect_bytes).is_text() {
                debug!(path = %path, "binary, listed only");
                acc.binary_skipped += 1;
                continue;
            }

            acc.push_file(path, &content);
        }

        info!(
            listed = paths.len(),
            rendered = acc.stats.files_rendered,
            bytes = acc.out.len(),
            "document rendered"
        );

        Ok(RenderedDocument {
            content: acc.out,
            stats: acc.stats,
            listed: paths,
            binary_skipped: acc.binary_skipped,
            warnings: acc.warnings,
        })
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
