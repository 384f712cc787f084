//! Catalog store: schema, open, and the typed CRUD surface.

mod catalog;
mod connection;

pub use catalog::CatalogStore;
pub use connection::{open_db, open_db_in_memory};

/// WAL tuning pragmas (synchronous, autocheckpoint, size limit). Use after PRAGMA journal_mode = WAL.
pub(crate) const WAL_PRAGMAS: &str = r#"
        PRAGMA synchronous = NORMAL;
        PRAGMA wal_autocheckpoint = 10000;
        PRAGMA journal_size_limit = 67108864;
        "#;

/// Schema for books, scan roots, exclusions, and settings.
///
/// `file_hash` is the content identity and unique across the catalog;
/// `file_path` merely tracks the last observed on-disk location.
pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT,
    subtitle TEXT,
    volume INTEGER,
    author TEXT,
    original_author TEXT,
    series TEXT,
    category TEXT,
    rating INTEGER,
    is_magazine_collection INTEGER NOT NULL DEFAULT 0,
    file_path TEXT NOT NULL,
    file_hash TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_books_file_path ON books(file_path);

CREATE TABLE IF NOT EXISTS scan_roots (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    path TEXT NOT NULL UNIQUE,
    is_private INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS exclude_paths (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    path TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT
);
"#;

/// Insert statement for the books table.
pub(crate) const INSERT_BOOK_SQL: &str = "INSERT INTO books \
    (title, subtitle, volume, author, original_author, series, category, rating, \
     is_magazine_collection, file_path, file_hash, created_at) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";
