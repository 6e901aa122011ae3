use dewdrops_core::{
    DumpConfig, DumpError, DumpStats, FileEntry, NO_EXTENSION_KEY, RelPath, ScanWarning,
    WarningKind,
};
use std::path::{Path, PathBuf};

#[test]
fn test_rel_path_serde_roundtrip_keeps_segments() {
    let path = RelPath::from_segments(["src", "lib.rs"]).unwrap();
    let as_string: String = path.clone().into();
    assert_eq!(as_string, "src/lib.rs");

    let back = RelPath::try_from(as_string).unwrap();
    assert_eq!(back, path);
    assert_eq!(back.depth(), 2);
    assert_eq!(back.segments()[0], "src");

    assert!(RelPath::try_from("a//b".to_string()).is_err());
}

#[test]
fn test_file_entry_depth() {
    let entry = FileEntry::new(RelPath::from_path(Path::new("a/b/c")).unwrap(), true);
    assert_eq!(entry.depth(), 3);
    assert!(entry.is_dir);
}

#[test]
fn test_stats_mixed_files() {
    let mut stats = DumpStats::new();
    for p in ["README", "src/main.rs", "src/lib.RS", "docs/guide.md"] {
        let path = RelPath::from_path(Path::new(p)).unwrap();
        stats.observe_depth(&path);
        stats.record_rendered(&path);
    }

    assert_eq!(stats.files_rendered, 4);
    assert_eq!(stats.max_depth, 2);
    let keys: Vec<&str> = stats.extension_counts.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, ["md", NO_EXTENSION_KEY, "rs"]);
    assert_eq!(stats.extension_counts.get("rs"), Some(&2));
}

#[test]
fn test_config_builder_defaults_match_new() {
    let built = DumpConfig::builder().root("/repo").build().unwrap();
    let plain = DumpConfig::new("/repo");

    assert_eq!(built.root, PathBuf::from("/repo"));
    assert_eq!(built.output_path, plain.output_path);
    assert_eq!(built.ignore_file_name, plain.ignore_file_name);
    assert_eq!(built.inspect_bytes, plain.inspect_bytes);
    assert_eq!(built.reserved_name(), plain.reserved_name());
}

#[test]
fn test_error_taxonomy() {
    let denied = DumpError::io(
        "/repo/private",
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    );
    assert!(denied.is_traversal());
    assert_eq!(denied.to_string(), "Permission denied: /repo/private");

    let output = DumpError::output("/ro/out.md", std::io::Error::other("read-only"));
    assert!(!output.is_traversal());
    assert!(output.to_string().contains("/ro/out.md"));
}

#[test]
fn test_warning_kinds() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    assert_eq!(
        ScanWarning::ignore_unreadable("/repo/.gitignore", &io).kind,
        WarningKind::IgnoreSourceUnreadable
    );
    let warning = ScanWarning::ignore_invalid("/repo/.gitignore", 3, "unclosed class");
    assert_eq!(warning.kind, WarningKind::IgnorePatternInvalid);
    assert!(warning.message.contains("line 3"));
}
