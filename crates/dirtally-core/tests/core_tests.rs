use dirtally_core::format::{format_date_in, format_entry_size, format_size};
use dirtally_core::{
    BrowseError, CategoryMap, CategoryReport, CountResult, ExtensionRule, FileEntry, PathStack,
    ScanConfig, ScanStats, normalize_extension,
};
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[test]
fn test_file_entry_kinds() {
    let now = SystemTime::now();
    let file = FileEntry::new_file("photo.jpg", "/sdcard/photo.jpg", 2048, now);
    assert!(file.is_file());
    assert!(!file.is_dir());
    assert!(!file.is_symlink);
    assert_eq!(file.name.as_str(), "photo.jpg");
    assert_eq!(file.path, PathBuf::from("/sdcard/photo.jpg"));
    assert_eq!(file.modified, now);

    let dir = FileEntry::new_directory(".thumbnails", "/sdcard/.thumbnails", now);
    assert!(dir.is_dir());
    assert!(dir.is_hidden());
}

#[test]
fn test_normalize_extension() {
    assert_eq!(normalize_extension(".JPG"), "jpg");
    assert_eq!(normalize_extension("  Tar.GZ "), "tar.gz");
    assert_eq!(normalize_extension("..."), "");
}

#[test]
fn test_extension_rules_differ_on_multi_dot_names() {
    assert_eq!(ExtensionRule::FirstDot.extract("backup.2017.ZIP"), "2017.zip");
    assert_eq!(ExtensionRule::LastDot.extract("backup.2017.ZIP"), "zip");
}

#[test]
fn test_readme_does_not_match_docs() {
    let mut categories = CategoryMap::new();
    categories.insert("docs", ["txt"]);

    let ext = ExtensionRule::FirstDot.extract("README");
    assert_eq!(categories.classify(&ext), None);
}

#[test]
fn test_count_result_keeps_every_category() {
    let mut categories = CategoryMap::new();
    categories.insert("images", ["jpg", "png"]);
    categories.insert("docs", ["txt"]);
    categories.insert("empty", Vec::<String>::new());

    let counts = CountResult::zeroed(&categories);
    let pairs: Vec<_> = counts.iter().collect();
    assert_eq!(pairs, vec![("images", 0), ("docs", 0), ("empty", 0)]);
}

#[test]
fn test_category_map_json_roundtrip_normalizes() {
    let map = CategoryMap::from_json_str(r#"{"images": [".PNG", "jpg"], "docs": ["TXT"]}"#).unwrap();
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"images":["jpg","png"],"docs":["txt"]}"#);
}

#[test]
fn test_count_result_serializes_as_object() {
    let mut categories = CategoryMap::new();
    categories.insert("images", ["jpg"]);
    categories.insert("docs", ["txt"]);

    let mut counts = CountResult::zeroed(&categories);
    counts.record("docs");
    let json = serde_json::to_string(&counts).unwrap();
    assert_eq!(json, r#"{"images":0,"docs":1}"#);
}

#[test]
fn test_category_report_into_counts() {
    let mut categories = CategoryMap::new();
    categories.insert("images", ["jpg"]);
    let mut counts = CountResult::zeroed(&categories);
    counts.record("images");

    let mut stats = ScanStats::new();
    stats.record_dir(0);
    stats.record_file(true);

    let report = CategoryReport::new(
        PathBuf::from("/sdcard"),
        counts.clone(),
        stats,
        SystemTime::now(),
        Duration::from_millis(5),
        Vec::new(),
    );
    assert!(!report.has_warnings());
    assert_eq!(report.into_counts(), counts);
}

#[test]
fn test_scan_config_serde_defaults() {
    let config: ScanConfig = serde_json::from_str(r#"{"root": "/sdcard"}"#).unwrap();
    assert_eq!(config.root, PathBuf::from("/sdcard"));
    assert!(!config.include_hidden);
    assert!(!config.follow_symlinks);
    assert_eq!(config.max_depth, None);
    assert_eq!(config.extension_rule, ExtensionRule::FirstDot);

    let config: ScanConfig =
        serde_json::from_str(r#"{"root": "/sdcard", "extension_rule": "last_dot"}"#).unwrap();
    assert_eq!(config.extension_rule, ExtensionRule::LastDot);
}

#[test]
fn test_path_stack_navigation() {
    let mut stack = PathStack::new("/storage/emulated/0");
    stack.push("/Download");
    stack.push("/apks");
    assert_eq!(stack.current_path(), "/storage/emulated/0/Download/apks");

    assert_eq!(stack.pop_to_parent().unwrap(), "/storage/emulated/0/Download");
    assert_eq!(stack.pop_to_parent().unwrap(), "/storage/emulated/0");
    assert!(matches!(
        stack.pop_to_parent(),
        Err(BrowseError::InvalidStackState)
    ));
    assert_eq!(stack.segments().len(), 1);
}

#[test]
fn test_formatting() {
    assert_eq!(format_size(100), "100B");
    assert_eq!(format_size(2 * 1024 * 1024 + 512 * 1024), "2.50MB");

    let entry = FileEntry::new_file("a", "/a", 1024, UNIX_EPOCH);
    assert_eq!(format_entry_size(&entry).as_deref(), Some("1.00KB"));

    let time = UNIX_EPOCH + Duration::from_secs(86_399);
    assert_eq!(format_date_in(time, &chrono::Utc), "1970-01-01 23:59:59");
}
