//! Helper tests: hashes, extension filter, exclusion, and path utilities.

use bunko::engine::{extension_of, hash_file, is_excluded};
use bunko::types::{Book, ContentHash, ExtensionFilter};
use std::path::{Path, PathBuf};

// --- ContentHash ---

#[test]
fn test_content_hash_hex_round_trip() {
    let hash = ContentHash::from_bytes([0xab; 32]);
    let hex = hash.to_hex();
    assert_eq!(hex.len(), 64);
    assert_eq!(ContentHash::from_hex(&hex), Some(hash));
}

#[test]
fn test_content_hash_from_hex_rejects_bad_input() {
    assert_eq!(ContentHash::from_hex(""), None);
    assert_eq!(ContentHash::from_hex("abcd"), None);
    assert_eq!(ContentHash::from_hex(&"g".repeat(64)), None);
}

#[test]
fn test_hash_file_known_digest() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty");
    std::fs::write(&path, b"").unwrap();
    // SHA-256 of the empty string.
    assert_eq!(
        hash_file(&path).unwrap().to_hex(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_hash_file_missing_is_unavailable() {
    assert!(hash_file(Path::new("/no/such/file")).is_err());
}

// --- ExtensionFilter ---

#[test]
fn test_extension_filter_empty_accepts_everything() {
    let filter = ExtensionFilter::parse(None);
    assert!(filter.is_empty());
    assert!(filter.accepts(Some("cbz")));
    assert!(filter.accepts(None));

    let blank = ExtensionFilter::parse(Some("  , ,"));
    assert!(blank.is_empty());
    assert!(blank.accepts(Some("anything")));
}

#[test]
fn test_extension_filter_membership() {
    let filter = ExtensionFilter::parse(Some("cbz, ZIP ,pdf"));
    assert!(filter.accepts(Some("cbz")));
    assert!(filter.accepts(Some("zip")));
    assert!(!filter.accepts(Some("txt")));
    assert!(!filter.accepts(None));
}

// --- extension_of ---

#[test]
fn test_extension_of_lowercases() {
    assert_eq!(extension_of(Path::new("/a/B.CBZ")), Some("cbz".to_string()));
    assert_eq!(
        extension_of(Path::new("a.tar.gz")),
        Some("gz".to_string())
    );
}

#[test]
fn test_extension_of_none_for_extensionless() {
    assert_eq!(extension_of(Path::new("/a/README")), None);
    assert_eq!(extension_of(Path::new("/a/.hidden")), None);
}

// --- is_excluded ---

#[test]
fn test_is_excluded_prefix_match() {
    let excluded = vec![PathBuf::from("/lib/trash")];
    assert!(is_excluded(Path::new("/lib/trash"), &excluded));
    assert!(is_excluded(Path::new("/lib/trash/deep/file.cbz"), &excluded));
    assert!(!is_excluded(Path::new("/lib/keep/file.cbz"), &excluded));
}

#[test]
fn test_is_excluded_does_not_match_partial_segments() {
    // `/foo` must not exclude `/foobar`.
    let excluded = vec![PathBuf::from("/foo")];
    assert!(is_excluded(Path::new("/foo/a.cbz"), &excluded));
    assert!(!is_excluded(Path::new("/foobar/a.cbz"), &excluded));
}

#[test]
fn test_is_excluded_empty_list() {
    assert!(!is_excluded(Path::new("/anything"), &[]));
}

// --- Book helpers ---

#[test]
fn test_display_title_prefers_parsed_title() {
    let book = Book {
        hash: ContentHash::from_bytes([0; 32]),
        path: PathBuf::from("/lib/raw_name.cbz"),
        title: Some("転生".to_string()),
        subtitle: None,
        volume: None,
        author: None,
        original_author: None,
        series: None,
        category: None,
        rating: None,
        is_magazine_collection: false,
        created_at: String::new(),
    };
    assert_eq!(book.display_title(), "転生");

    let untitled = Book {
        title: None,
        ..book
    };
    assert_eq!(untitled.display_title(), "raw_name.cbz");
}
