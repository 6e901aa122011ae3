//! End-to-end pipeline: traverse, render, write.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use dewdrops_core::{DumpConfig, DumpError, DumpStats, ScanWarning};
use dewdrops_scan::Walker;

use crate::render::{RenderedDocument, Renderer};

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpReport {
    /// Where the document was written.
    pub output_path: PathBuf,
    /// Size of the written document in bytes.
    pub output_bytes: u64,
    /// Number of candidate paths listed in the structure section.
    pub candidates: usize,
    /// Candidates left out of the contents section as binary.
    pub binary_skipped: u64,
    /// Statistics over the rendered files.
    pub stats: DumpStats,
    /// Recovered conditions.
    pub warnings: Vec<ScanWarning>,
}

/// Runs the traversal and render phases for one config.
#[derive(Debug, Clone)]
pub struct Dumper {
    config: DumpConfig,
}

impl Dumper {
    pub fn new(config: DumpConfig) -> Self {
        Self { config }
    }

    /// Traverse the root and render the document in memory.
    ///
    /// Warnings from loading the ignore file are prepended to the
    /// document's own warnings.
    pub fn build(&self) -> Result<RenderedDocument, DumpError> {
        let root = &self.config.root;
        if !root.is_dir() {
            return Err(DumpError::InvalidRoot {
                path: root.clone(),
            });
        }

        let (walker, mut warnings) = Walker::from_config(&self.config);
        let candidates = walker.walk(root)?;

        let mut document = Renderer::new()
            .with_inspect_bytes(self.config.inspect_bytes)
            .render(candidates.paths, root)?;
        warnings.append(&mut document.warnings);
        document.warnings = warnings;
        Ok(document)
    }

    /// Build the document and write it to the configured output path.
    pub fn run(&self) -> Result<DumpReport, DumpError> {
        let document = self.build()?;
        let output_path = self.config.output_path.clone();
        let output_bytes = write_document(&output_path, &document.content)?;

        Ok(DumpReport {
            output_path,
            output_bytes,
            candidates: document.listed.len(),
            binary_skipped: document.binary_skipped,
            stats: document.stats,
            warnings: document.warnings,
        })
    }
}

/// Write the whole document in one call, replacing any previous file.
pub fn write_document(path: &Path, content: &[u8]) -> Result<u64, DumpError> {
    std::fs::write(path, content).map_err(|e| DumpError::output(path, e))?;
    info!(path = %path.display(), bytes = content.len(), "document written");
    Ok(content.len() as u64)
}
