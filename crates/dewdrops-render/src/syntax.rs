//! Fixed mapping from extension key to fenced-block syntax tag.

/// Tag used for every extension missing from [`SYNTAX_TAGS`].
pub const FALLBACK_TAG: &str = "txt";

/// Extension key to syntax tag.
pub const SYNTAX_TAGS: &[(&str, &str)] = &[
    ("css", "css"),
    ("dockerfile", "dockerfile"),
    ("go", "go"),
    ("html", "html"),
    ("js", "javascript"),
    ("json", "json"),
    ("md", "markdown"),
    ("py", "python"),
    ("rs", "rust"),
    ("sh", "bash"),
    ("sql", "sql"),
    ("tf", "hcl"),
    ("ts", "javascript"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
];

/// Look up the tag for a lower-cased extension key.
pub fn syntax_tag(extension: &str) -> &'static str {
    SYNTAX_TAGS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map_or(FALLBACK_TAG, |&(_, tag)| tag)
}
