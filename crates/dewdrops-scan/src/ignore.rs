//! Gitignore-style rule compilation and matching.
//!
//! Each non-comment line compiles into a [`Pattern`] holding two glob
//! matchers: one for the path itself and one for anything below it, so a
//! rule that matches a directory also covers its descendants. Rules are
//! evaluated last to first and the first rule that matches decides.

use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};
use thiserror::Error;
use tracing::{debug, warn};

use dewdrops_core::{RelPath, ScanWarning};

/// An ignore rule that failed to compile.
#[derive(Debug, Error)]
#[error("line {line}: invalid pattern `{pattern}`: {source}")]
pub struct PatternError {
    /// 1-based line number in the ignore source.
    pub line: usize,
    /// Raw line text.
    pub pattern: String,
    #[source]
    pub source: globset::Error,
}

/// A compiled ignore rule.
#[derive(Debug, Clone)]
pub struct Pattern {
    negated: bool,
    dir_only: bool,
    anchored: bool,
    entry: GlobMatcher,
    descendant: GlobMatcher,
}

impl Pattern {
    /// Compile one ignore-source line. Blank lines, comments and lines that
    /// reduce to nothing (`!`, `/`) yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, globset::Error> {
        if line.trim().is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut body = line.trim_end_matches(['\r', '\n']);
        if !body.ends_with("\\ ") {
            body = body.trim_end_matches(' ');
        }

        let negated = body.starts_with('!');
        if negated {
            body = &body[1..];
        }

        let dir_only = body.ends_with('/');
        if dir_only {
            body = body.trim_end_matches('/');
        }

        let anchored = body.contains('/');
        body = body.trim_start_matches('/');
        if body.is_empty() {
            return Ok(None);
        }

        let glob = if anchored || body.starts_with("**/") {
            body.to_string()
        } else {
            format!("**/{body}")
        };

        Ok(Some(Self {
            negated,
            dir_only,
            anchored,
            entry: compile_glob(&glob)?,
            descendant: compile_glob(&format!("{glob}/**"))?,
        }))
    }

    /// True for `!`-prefixed rules that re-include a path.
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// True for rules written with a trailing `/`.
    pub fn is_dir_only(&self) -> bool {
        self.dir_only
    }

    /// True for rules that only match relative to the root.
    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// Check whether this rule applies to a `/`-joined relative path.
    ///
    /// A directory-only rule matches the path itself only when it is a
    /// directory, but always matches paths below a matching directory.
    pub fn is_match(&self, path: &str, is_dir: bool) -> bool {
        if self.entry.is_match(path) && (is_dir || !self.dir_only) {
            return true;
        }
        self.descendant.is_match(path)
    }
}

fn compile_glob(glob: &str) -> Result<GlobMatcher, globset::Error> {
    Ok(GlobBuilder::new(glob)
        .literal_separator(true)
        .backslash_escape(true)
        .build()?
        .compile_matcher())
}

/// Ordered set of compiled ignore rules. An empty matcher excludes nothing.
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    patterns: Vec<Pattern>,
}

impl IgnoreMatcher {
    /// A matcher that excludes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile ignore-source lines in declaration order.
    pub fn compile<I, S>(lines: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut patterns = Vec::new();
        for (idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            match Pattern::parse(line) {
                Ok(Some(pattern)) => patterns.push(pattern),
                Ok(None) => {}
                Err(source) => {
                    return Err(PatternError {
                        line: idx + 1,
                        pattern: line.to_string(),
                        source,
                    });
                }
            }
        }
        Ok(Self { patterns })
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Decide whether the path made of `segments` is excluded.
    pub fn matches<S: AsRef<str>>(&self, segments: &[S], is_dir: bool) -> bool {
        if self.patterns.is_empty() || segments.is_empty() {
            return false;
        }
        let joined = segments
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join("/");
        self.matches_str(&joined, is_dir)
    }

    /// Decide whether a relative path is excluded.
    pub fn matches_path(&self, path: &RelPath, is_dir: bool) -> bool {
        self.matches_str(path.as_str(), is_dir)
    }

    fn matches_str(&self, path: &str, is_dir: bool) -> bool {
        self.patterns
            .iter()
            .rev()
            .find(|p| p.is_match(path, is_dir))
            .is_some_and(|p| !p.negated)
    }
}

/// Load the ignore source at `path`.
///
/// A missing file yields an empty matcher without a warning. An unreadable
/// file or one containing an uncompilable rule yields an empty matcher and a
/// warning; neither aborts the run.
pub fn load_ignore_file(path: &Path) -> (IgnoreMatcher, Option<ScanWarning>) {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no ignore file");
            return (IgnoreMatcher::empty(), None);
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignore file unreadable, continuing without rules");
            return (
                IgnoreMatcher::empty(),
                Some(ScanWarning::ignore_unreadable(path, &err)),
            );
        }
    };

    match IgnoreMatcher::compile(contents.lines()) {
        Ok(matcher) => {
            debug!(path = %path.display(), rules = matcher.patterns.len(), "loaded ignore rules");
            (matcher, None)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "invalid ignore rule, continuing without rules");
            let warning = ScanWarning::ignore_invalid(path, err.line, &err.source.to_string());
            (IgnoreMatcher::empty(), Some(warning))
        }
    }
}
