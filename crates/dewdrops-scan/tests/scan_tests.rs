use dewdrops_scan::{DumpError, IgnoreMatcher, RelPath, Walker};
use std::fs;
use tempfile::TempDir;

fn sorted(walker: &Walker, temp: &TempDir) -> Vec<String> {
    walker
        .walk(temp.path())
        .unwrap()
        .into_sorted()
        .into_iter()
        .map(String::from)
        .collect()
}

#[test]
fn test_matcher_segments_and_rel_path_agree() {
    let m = IgnoreMatcher::compile(["docs/", "*.tmp", "!keep.tmp"]).unwrap();
    let path = RelPath::from_segments(["a", "keep.tmp"]).unwrap();

    assert_eq!(
        m.matches(path.segments(), false),
        m.matches_path(&path, false)
    );
    assert!(!m.matches_path(&path, false));
    assert!(m.matches(&["docs"], true));
    assert!(!m.matches(&["docs"], false));
}

#[test]
fn test_deep_tree_with_mixed_rules() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("app/generated/v1")).unwrap();
    fs::create_dir_all(root.join("app/src")).unwrap();
    fs::create_dir_all(root.join("logs")).unwrap();

    fs::write(root.join("app/generated/v1/api.go"), "package v1").unwrap();
    fs::write(root.join("app/src/server.go"), "package src").unwrap();
    fs::write(root.join("app/src/server.tmp"), "scratch").unwrap();
    fs::write(root.join("logs/today.log"), "x").unwrap();
    fs::write(root.join("logs/keep.log"), "x").unwrap();

    let m = IgnoreMatcher::compile(["generated/", "*.tmp", "logs/*.log", "!logs/keep.log"])
        .unwrap();
    let paths = sorted(&Walker::new(m, "context.md"), &temp);

    assert_eq!(paths, ["app/src/server.go", "logs/keep.log"]);
}

#[test]
fn test_hidden_files_are_walked() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join(".github")).unwrap();
    fs::write(temp.path().join(".github/ci.yml"), "on: push").unwrap();
    fs::write(temp.path().join(".env.example"), "A=1").unwrap();

    let paths = sorted(&Walker::new(IgnoreMatcher::empty(), "context.md"), &temp);
    assert_eq!(paths, [".env.example", ".github/ci.yml"]);
}

#[test]
fn test_empty_tree_yields_empty_set() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("only_dirs")).unwrap();

    let set = Walker::new(IgnoreMatcher::empty(), "context.md")
        .walk(temp.path())
        .unwrap();
    assert!(set.is_empty());
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_aborts_walk() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let locked = temp.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("inner.txt"), "x").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let readable = fs::read_dir(&locked).is_ok();
    let result = Walker::new(IgnoreMatcher::empty(), "context.md").walk(temp.path());

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    if readable {
        // Privileged users read through the mode bits, so the walk succeeds.
        let paths: Vec<String> = result.unwrap().into_sorted().into_iter().map(String::from).collect();
        assert_eq!(paths, ["locked/inner.txt"]);
    } else {
        let err = result.unwrap_err();
        assert!(matches!(err, DumpError::PermissionDenied { .. }), "{err:?}");
    }
}

#[cfg(unix)]
#[test]
fn test_ignored_unreadable_directory_is_never_listed() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let locked = temp.path().join("cache");
    fs::create_dir(&locked).unwrap();
    fs::write(temp.path().join("main.rs"), "fn main() {}").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let m = IgnoreMatcher::compile(["cache/"]).unwrap();
    let result = Walker::new(m, "context.md").walk(temp.path());

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let paths: Vec<String> = result.unwrap().into_sorted().into_iter().map(String::from).collect();
    assert_eq!(paths, ["main.rs"]);
}
