//! Run configuration types.

use std::ffi::OsStr;
use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Name of the generated document when no output path is given.
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "dewdrops_context.md";

/// Ignore source looked up at the scan root.
pub const DEFAULT_IGNORE_FILE_NAME: &str = ".gitignore";

/// Number of leading bytes inspected when classifying a file.
pub const DEFAULT_INSPECT_BYTES: usize = 8000;

/// Configuration for a single dump run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct DumpConfig {
    /// Root directory to snapshot.
    pub root: PathBuf,

    /// Where the document is written. Its file name is also the reserved
    /// name excluded from every scan.
    #[builder(default = "PathBuf::from(DEFAULT_OUTPUT_FILE_NAME)")]
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Name of the ignore file read from the root.
    #[builder(default = "DEFAULT_IGNORE_FILE_NAME.to_string()")]
    #[serde(default = "default_ignore_file_name")]
    pub ignore_file_name: String,

    /// Leading bytes inspected for text/binary classification.
    #[builder(default = "DEFAULT_INSPECT_BYTES")]
    #[serde(default = "default_inspect_bytes")]
    pub inspect_bytes: usize,
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE_NAME)
}

fn default_ignore_file_name() -> String {
    DEFAULT_IGNORE_FILE_NAME.to_string()
}

fn default_inspect_bytes() -> usize {
    DEFAULT_INSPECT_BYTES
}

impl DumpConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                return Err("Root path cannot be empty".to_string());
            }
            None => return Err("Root path is required".to_string()),
            _ => {}
        }
        if let Some(ref output) = self.output_path {
            if output.file_name().is_none() {
                return Err(format!("Output path has no file name: {}", output.display()));
            }
        }
        if self.inspect_bytes == Some(0) {
            return Err("Inspect window must be at least one byte".to_string());
        }
        Ok(())
    }
}

impl DumpConfig {
    /// Create a new config builder.
    pub fn builder() -> DumpConfigBuilder {
        DumpConfigBuilder::default()
    }

    /// Create a config with defaults for everything but the root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output_path: default_output_path(),
            ignore_file_name: default_ignore_file_name(),
            inspect_bytes: DEFAULT_INSPECT_BYTES,
        }
    }

    /// File name never admitted into a scan, at any depth.
    pub fn reserved_name(&self) -> &OsStr {
        self.output_path
            .file_name()
            .unwrap_or_else(|| OsStr::new(DEFAULT_OUTPUT_FILE_NAME))
    }

    /// Full path of the ignore source.
    pub fn ignore_path(&self) -> PathBuf {
        self.root.join(&self.ignore_file_name)
    }
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
