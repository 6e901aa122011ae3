//! Text versus binary classification from a bounded byte prefix.

use serde::{Deserialize, Serialize};

use dewdrops_core::DEFAULT_INSPECT_BYTES;

/// Result of inspecting a file's leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Text,
    Binary,
}

impl Classification {
    pub fn is_text(self) -> bool {
        self == Self::Text
    }
}

/// Classify using the default inspection window.
pub fn classify(bytes: &[u8]) -> Classification {
    classify_prefix(bytes, DEFAULT_INSPECT_BYTES)
}

/// Classify by inspecting at most `window` leading bytes.
///
/// The prefix is binary if it holds a NUL byte or is not valid UTF-8. The
/// prefix is judged on its own, so a multi-byte sequence cut by the window
/// edge also counts as malformed.
pub fn classify_prefix(bytes: &[u8], window: usize) -> Classification {
    let prefix = &bytes[..bytes.len().min(window)];

    if prefix.contains(&0) || std::str::from_utf8(prefix).is_err() {
        Classification::Binary
    } else {
        Classification::Text
    }
}
