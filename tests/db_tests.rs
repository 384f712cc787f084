//! Catalog store tests: settings, roots, exclusions, and book CRUD.

use bunko::engine::CatalogStore;
use bunko::types::{Book, ContentHash};
use std::path::{Path, PathBuf};

fn hash(byte: u8) -> ContentHash {
    ContentHash::from_bytes([byte; 32])
}

fn sample_book(hash_byte: u8, path: &str) -> Book {
    Book {
        hash: hash(hash_byte),
        path: PathBuf::from(path),
        title: Some("タイトル".to_string()),
        subtitle: None,
        volume: Some(3),
        author: Some("著者".to_string()),
        original_author: None,
        series: Some("シリーズ".to_string()),
        category: None,
        rating: None,
        is_magazine_collection: false,
        created_at: "2026-08-30T00:00:00+00:00".to_string(),
    }
}

// --- settings ---

#[test]
fn test_setting_absent() {
    let store = CatalogStore::open_in_memory().unwrap();
    assert_eq!(store.setting("scan_extensions").unwrap(), None);
}

#[test]
fn test_setting_round_trip_and_overwrite() {
    let store = CatalogStore::open_in_memory().unwrap();
    store.set_setting("scan_extensions", "cbz,zip").unwrap();
    assert_eq!(
        store.setting("scan_extensions").unwrap().as_deref(),
        Some("cbz,zip")
    );
    store.set_setting("scan_extensions", "pdf").unwrap();
    assert_eq!(
        store.setting("scan_extensions").unwrap().as_deref(),
        Some("pdf")
    );
}

// --- scan roots ---

#[test]
fn test_scan_roots_add_list_remove() {
    let store = CatalogStore::open_in_memory().unwrap();
    store.add_scan_root(Path::new("/library"), false).unwrap();
    store.add_scan_root(Path::new("/hidden"), true).unwrap();

    let roots = store.scan_roots().unwrap();
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0].path, PathBuf::from("/library"));
    assert!(!roots[0].is_private);
    assert!(roots[1].is_private);

    store.remove_scan_root(Path::new("/library")).unwrap();
    let roots = store.scan_roots().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].path, PathBuf::from("/hidden"));
}

#[test]
fn test_scan_root_re_add_updates_privacy() {
    let store = CatalogStore::open_in_memory().unwrap();
    store.add_scan_root(Path::new("/library"), false).unwrap();
    store.add_scan_root(Path::new("/library"), true).unwrap();
    let roots = store.scan_roots().unwrap();
    assert_eq!(roots.len(), 1);
    assert!(roots[0].is_private);
}

// --- exclusions ---

#[test]
fn test_exclude_paths_add_list_remove() {
    let store = CatalogStore::open_in_memory().unwrap();
    store.add_exclude_path(Path::new("/library/trash")).unwrap();
    store.add_exclude_path(Path::new("/library/wip")).unwrap();
    assert_eq!(store.exclude_paths().unwrap().len(), 2);

    store
        .remove_exclude_path(Path::new("/library/trash"))
        .unwrap();
    assert_eq!(
        store.exclude_paths().unwrap(),
        vec![PathBuf::from("/library/wip")]
    );
}

// --- books ---

#[test]
fn test_insert_and_read_book_round_trip() {
    let store = CatalogStore::open_in_memory().unwrap();
    let book = sample_book(1, "/library/タイトル 3巻.cbz");
    store.insert_book(&book).unwrap();

    let all = store.all_books().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], book);

    let by_hash = store.book_by_hash(&hash(1)).unwrap();
    assert_eq!(by_hash, Some(book));
    assert_eq!(store.book_by_hash(&hash(9)).unwrap(), None);
}

#[test]
fn test_duplicate_hash_rejected() {
    // file_hash is UNIQUE: two files with identical bytes must collapse to
    // one logical book, so a second insert for the same hash is an error.
    let store = CatalogStore::open_in_memory().unwrap();
    store.insert_book(&sample_book(1, "/a.cbz")).unwrap();
    assert!(store.insert_book(&sample_book(1, "/b.cbz")).is_err());
}

#[test]
fn test_update_book_path_keeps_metadata() {
    let store = CatalogStore::open_in_memory().unwrap();
    let book = sample_book(1, "/library/old.cbz");
    store.insert_book(&book).unwrap();

    store
        .update_book_path(&hash(1), Path::new("/library/moved/new.cbz"))
        .unwrap();

    let stored = store.book_by_hash(&hash(1)).unwrap().unwrap();
    assert_eq!(stored.path, PathBuf::from("/library/moved/new.cbz"));
    assert_eq!(stored.title, book.title);
    assert_eq!(stored.volume, book.volume);
    assert_eq!(stored.created_at, book.created_at);
}

#[test]
fn test_update_book_hash_renames_identity_in_place() {
    let store = CatalogStore::open_in_memory().unwrap();
    let book = sample_book(1, "/library/v.cbz");
    store.insert_book(&book).unwrap();

    store
        .update_book_hash(&hash(1), &hash(2), Path::new("/library/v.cbz"))
        .unwrap();

    assert_eq!(store.book_by_hash(&hash(1)).unwrap(), None);
    let stored = store.book_by_hash(&hash(2)).unwrap().unwrap();
    assert_eq!(stored.path, book.path);
    assert_eq!(stored.title, book.title);
    assert_eq!(stored.series, book.series);
    assert_eq!(stored.created_at, book.created_at);
}

#[test]
fn test_update_book_metadata_edit() {
    let store = CatalogStore::open_in_memory().unwrap();
    let mut book = sample_book(1, "/library/v.cbz");
    store.insert_book(&book).unwrap();

    book.rating = Some(5);
    book.category = Some("完結".to_string());
    store.update_book(&book).unwrap();

    let stored = store.book_by_hash(&hash(1)).unwrap().unwrap();
    assert_eq!(stored.rating, Some(5));
    assert_eq!(stored.category.as_deref(), Some("完結"));
    // Path and created_at are owned by reconciliation.
    assert_eq!(stored.path, book.path);
    assert_eq!(stored.created_at, book.created_at);
}

#[test]
fn test_delete_book() {
    let store = CatalogStore::open_in_memory().unwrap();
    store.insert_book(&sample_book(1, "/a.cbz")).unwrap();
    store.insert_book(&sample_book(2, "/b.cbz")).unwrap();

    store.delete_book(&hash(1)).unwrap();
    let all = store.all_books().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].hash, hash(2));
}

// --- file-backed catalog ---

#[test]
fn test_open_creates_parent_directories_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("data").join("library.db");

    {
        let store = CatalogStore::open(&db_path).unwrap();
        store.insert_book(&sample_book(7, "/a.cbz")).unwrap();
    }

    let store = CatalogStore::open(&db_path).unwrap();
    assert_eq!(store.all_books().unwrap().len(), 1);
}
