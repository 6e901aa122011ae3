//! Root-relative paths and traversal entries.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Directory name pruned at any depth regardless of ignore rules.
pub const GIT_DIR_NAME: &str = ".git";

/// Extension key used for files whose name has no extension.
pub const NO_EXTENSION_KEY: &str = "no_ext";

/// A path relative to the scan root, stored as `/`-joined segments.
///
/// Ordering compares the joined form byte by byte, which is the order used
/// for both sections of the rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RelPath {
    joined: String,
    segments: Vec<CompactString>,
}

impl RelPath {
    /// Build a path from its segments. Returns `None` for an empty sequence or
    /// a segment that is empty or contains a separator.
    pub fn from_segments<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments: Vec<CompactString> = segments
            .into_iter()
            .map(|s| CompactString::new(s.as_ref()))
            .collect();
        if segments.is_empty()
            || segments
                .iter()
                .any(|s| s.is_empty() || s.contains('/'))
        {
            return None;
        }
        let joined = segments
            .iter()
            .map(CompactString::as_str)
            .collect::<Vec<_>>()
            .join("/");
        Some(Self { joined, segments })
    }

    /// Convert an OS relative path. Only normal components are accepted.
    pub fn from_path(path: &Path) -> Option<Self> {
        let mut segments = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(name) => segments.push(name.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Self::from_segments(segments)
    }

    /// Canonical `/`-separated form.
    pub fn as_str(&self) -> &str {
        &self.joined
    }

    pub fn segments(&self) -> &[CompactString] {
        &self.segments
    }

    /// Number of segments; a file at the root has depth 1.
    pub fn depth(&self) -> u32 {
        self.segments.len() as u32
    }

    /// Final segment.
    pub fn file_name(&self) -> &str {
        self.segments.last().map(CompactString::as_str).unwrap_or_default()
    }

    /// Resolve against `root` using the platform separator.
    pub fn to_path(&self, root: &Path) -> PathBuf {
        self.segments
            .iter()
            .fold(root.to_path_buf(), |path, segment| path.join(segment.as_str()))
    }

    /// True when any segment is the git metadata directory.
    pub fn has_git_segment(&self) -> bool {
        self.segments.iter().any(|s| s.as_str() == GIT_DIR_NAME)
    }

    /// Lower-cased text after the last `.` of the file name, or
    /// [`NO_EXTENSION_KEY`]. Dotfiles such as `.gitignore` use the text after
    /// their leading dot.
    pub fn extension_key(&self) -> CompactString {
        let name = self.file_name();
        match name.rfind('.') {
            Some(idx) if idx + 1 < name.len() => CompactString::new(name[idx + 1..].to_lowercase()),
            _ => CompactString::new(NO_EXTENSION_KEY),
        }
    }
}

impl fmt::Display for RelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined)
    }
}

impl From<RelPath> for String {
    fn from(path: RelPath) -> Self {
        path.joined
    }
}

impl TryFrom<String> for RelPath {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_segments(value.split('/')).ok_or_else(|| format!("invalid relative path: {value}"))
    }
}

impl AsRef<str> for RelPath {
    fn as_ref(&self) -> &str {
        &self.joined
    }
}

/// A directory entry seen during traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: RelPath,
    pub is_dir: bool,
}

impl FileEntry {
    pub fn new(path: RelPath, is_dir: bool) -> Self {
        Self { path, is_dir }
    }

    pub fn depth(&self) -> u32 {
        self.path.depth()
    }
}
