//! Single-threaded jwalk traversal with ignore-rule pruning.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use jwalk::{Parallelism, WalkDir};
use tracing::{debug, info};

use dewdrops_core::{DumpConfig, DumpError, FileEntry, RelPath, ScanWarning};

use crate::ignore::{IgnoreMatcher, load_ignore_file};

/// What the walker does with one directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Directory whose subtree is skipped entirely.
    Prune,
    /// File left out of the candidate set.
    Exclude,
    /// Directory that is descended into.
    Descend,
    /// File added to the candidate set.
    Accept,
}

impl Admission {
    /// True when the entry stays in the traversal.
    pub fn is_kept(self) -> bool {
        matches!(self, Self::Descend | Self::Accept)
    }
}

/// Candidate files in traversal order.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    pub paths: Vec<RelPath>,
}

impl CandidateSet {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Unique paths in ascending byte order.
    pub fn into_sorted(mut self) -> Vec<RelPath> {
        self.paths.sort_unstable();
        self.paths.dedup();
        self.paths
    }
}

/// Directory walker that consults an [`IgnoreMatcher`] for every entry.
#[derive(Debug, Clone)]
pub struct Walker {
    matcher: Arc<IgnoreMatcher>,
    reserved_name: OsString,
}

impl Walker {
    /// Create a walker with explicit rules and self-exclusion name.
    pub fn new(matcher: IgnoreMatcher, reserved_name: impl Into<OsString>) -> Self {
        Self {
            matcher: Arc::new(matcher),
            reserved_name: reserved_name.into(),
        }
    }

    /// Create a walker from a run config, loading the root's ignore file.
    /// Recovered problems with the ignore file are returned as warnings.
    pub fn from_config(config: &DumpConfig) -> (Self, Vec<ScanWarning>) {
        let (matcher, warning) = load_ignore_file(&config.ignore_path());
        let walker = Self::new(matcher, config.reserved_name());
        (walker, warning.into_iter().collect())
    }

    /// Decide what happens to one entry.
    pub fn admit(&self, entry: &FileEntry) -> Admission {
        admit(&self.matcher, &self.reserved_name, entry)
    }

    /// Walk `root` and collect candidate files.
    ///
    /// Any error listing a directory aborts the walk.
    pub fn walk(&self, root: &Path) -> Result<CandidateSet, DumpError> {
        let root = canonical_root(root)?;
        info!(root = %root.display(), "walking");

        let matcher = Arc::clone(&self.matcher);
        let reserved_name = self.reserved_name.clone();
        let filter_root = root.clone();

        let walker = WalkDir::new(&root)
            .parallelism(Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(false)
            .process_read_dir(move |depth, _dir_path, _state, children| {
                // The root itself arrives with no depth and is always kept.
                if depth.is_none() {
                    return;
                }
                children.retain(|child| {
                    // Errors stay in the stream so the walk loop can surface them.
                    let Ok(child) = child else {
                        return true;
                    };
                    let path = child.path();
                    let Some(rel) = path
                        .strip_prefix(&filter_root)
                        .ok()
                        .and_then(RelPath::from_path)
                    else {
                        return false;
                    };
                    let entry = FileEntry::new(rel, child.file_type().is_dir());
                    let admission = admit(&matcher, &reserved_name, &entry);
                    if !admission.is_kept() {
                        debug!(path = %entry.path, ?admission, "skipped");
                    }
                    admission.is_kept()
                });
            });

        let mut candidates = CandidateSet::default();
        for entry in walker {
            let mut entry = entry.map_err(|err| traversal_error(&root, err))?;
            if let Some(err) = entry.read_children_error.take() {
                return Err(traversal_error(&entry.path(), err));
            }
            if entry.depth() == 0 || entry.file_type().is_dir() {
                continue;
            }
            let path = entry.path();
            if let Some(rel) = path.strip_prefix(&root).ok().and_then(RelPath::from_path) {
                candidates.paths.push(rel);
            }
        }

        info!(candidates = candidates.len(), "walk finished");
        Ok(candidates)
    }
}

fn admit(matcher: &IgnoreMatcher, reserved_name: &OsStr, entry: &FileEntry) -> Admission {
    let skip = if entry.is_dir {
        Admission::Prune
    } else {
        Admission::Exclude
    };

    if entry.path.has_git_segment() {
        return skip;
    }
    if matcher.matches_path(&entry.path, entry.is_dir) {
        return skip;
    }
    if entry.is_dir {
        return Admission::Descend;
    }
    if OsStr::new(entry.path.file_name()) == reserved_name {
        return Admission::Exclude;
    }
    Admission::Accept
}

fn canonical_root(root: &Path) -> Result<PathBuf, DumpError> {
    let invalid = || DumpError::InvalidRoot {
        path: root.to_path_buf(),
    };
    let canonical = root.canonicalize().map_err(|_| invalid())?;
    if !canonical.is_dir() {
        return Err(invalid());
    }
    Ok(canonical)
}

/// Map a jwalk error to a fatal traversal error. `fallback` names the path
/// when jwalk does not carry one.
fn traversal_error(fallback: &Path, err: jwalk::Error) -> DumpError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| fallback.to_path_buf());
    let message = err.to_string();
    io_failure(path, err.into_io_error(), message)
}

fn io_failure(path: PathBuf, source: Option<std::io::Error>, message: String) -> DumpError {
    match source {
        Some(source) => DumpError::io(path, source),
        None => DumpError::io(path, std::io::Error::other(message)),
    }
}
