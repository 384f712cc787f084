//! Typed CRUD surface over the catalog tables.

use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::{Path, PathBuf};

use crate::types::{Book, ContentHash, ScanRoot};

use super::{INSERT_BOOK_SQL, open_db, open_db_in_memory};

/// Row shape before hash decoding; converted to [`Book`] outside the
/// rusqlite closure so hex errors surface through anyhow.
struct RawBook {
    hash: String,
    path: String,
    title: Option<String>,
    subtitle: Option<String>,
    volume: Option<u32>,
    author: Option<String>,
    original_author: Option<String>,
    series: Option<String>,
    category: Option<String>,
    rating: Option<u8>,
    is_magazine_collection: bool,
    created_at: String,
}

const BOOK_COLUMNS: &str = "file_hash, file_path, title, subtitle, volume, author, \
    original_author, series, category, rating, is_magazine_collection, created_at";

fn raw_book_from_row(row: &Row<'_>) -> rusqlite::Result<RawBook> {
    Ok(RawBook {
        hash: row.get(0)?,
        path: row.get(1)?,
        title: row.get(2)?,
        subtitle: row.get(3)?,
        volume: row.get(4)?,
        author: row.get(5)?,
        original_author: row.get(6)?,
        series: row.get(7)?,
        category: row.get(8)?,
        rating: row.get(9)?,
        is_magazine_collection: row.get(10)?,
        created_at: row.get(11)?,
    })
}

impl RawBook {
    fn into_book(self) -> Result<Book> {
        let hash = ContentHash::from_hex(&self.hash)
            .ok_or_else(|| anyhow!("malformed file_hash in catalog: {}", self.hash))?;
        Ok(Book {
            hash,
            path: PathBuf::from(self.path),
            title: self.title,
            subtitle: self.subtitle,
            volume: self.volume,
            author: self.author,
            original_author: self.original_author,
            series: self.series,
            category: self.category,
            rating: self.rating,
            is_magazine_collection: self.is_magazine_collection,
            created_at: self.created_at,
        })
    }
}

fn path_to_db_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Persistent catalog: book records, scan roots, exclusion prefixes, and
/// key/value settings, all in one SQLite database. Every mutation is its own
/// committed statement; there is no cross-operation transaction.
pub struct CatalogStore {
    conn: Connection,
}

impl CatalogStore {
    /// Open or create the catalog at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// In-memory catalog with full schema, for tests.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    // --- books ---

    pub fn all_books(&self) -> Result<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {BOOK_COLUMNS} FROM books"))?;
        let rows = stmt.query_map([], raw_book_from_row)?;
        let mut books = Vec::new();
        for row in rows {
            books.push(row.context("read book row")?.into_book()?);
        }
        Ok(books)
    }

    pub fn book_by_hash(&self, hash: &ContentHash) -> Result<Option<Book>> {
        let raw = self
            .conn
            .query_row(
                &format!("SELECT {BOOK_COLUMNS} FROM books WHERE file_hash = ?1"),
                [hash.to_hex()],
                raw_book_from_row,
            )
            .optional()
            .context("query book by hash")?;
        raw.map(RawBook::into_book).transpose()
    }

    pub fn insert_book(&self, book: &Book) -> Result<()> {
        self.conn
            .execute(
                INSERT_BOOK_SQL,
                params![
                    book.title,
                    book.subtitle,
                    book.volume,
                    book.author,
                    book.original_author,
                    book.series,
                    book.category,
                    book.rating,
                    book.is_magazine_collection,
                    path_to_db_string(&book.path),
                    book.hash.to_hex(),
                    book.created_at,
                ],
            )
            .context("insert book")?;
        Ok(())
    }

    pub fn delete_book(&self, hash: &ContentHash) -> Result<()> {
        self.conn
            .execute("DELETE FROM books WHERE file_hash = ?1", [hash.to_hex()])
            .context("delete book")?;
        Ok(())
    }

    /// Move detection: record the new location, everything else untouched.
    pub fn update_book_path(&self, hash: &ContentHash, new_path: &Path) -> Result<()> {
        self.conn
            .execute(
                "UPDATE books SET file_path = ?1 WHERE file_hash = ?2",
                params![path_to_db_string(new_path), hash.to_hex()],
            )
            .context("update book path")?;
        Ok(())
    }

    /// Content change at a stable path: rename the record onto its new hash
    /// so user metadata and created_at survive.
    pub fn update_book_hash(
        &self,
        old_hash: &ContentHash,
        new_hash: &ContentHash,
        path: &Path,
    ) -> Result<()> {
        self.conn
            .execute(
                "UPDATE books SET file_hash = ?1, file_path = ?2 WHERE file_hash = ?3",
                params![new_hash.to_hex(), path_to_db_string(path), old_hash.to_hex()],
            )
            .context("update book hash")?;
        Ok(())
    }

    /// User metadata edit: overwrite the mutable fields of the record keyed
    /// by `book.hash`. Path and created_at are owned by reconciliation and
    /// left alone.
    pub fn update_book(&self, book: &Book) -> Result<()> {
        self.conn
            .execute(
                "UPDATE books SET title = ?1, subtitle = ?2, volume = ?3, author = ?4, \
                 original_author = ?5, series = ?6, category = ?7, rating = ?8, \
                 is_magazine_collection = ?9 WHERE file_hash = ?10",
                params![
                    book.title,
                    book.subtitle,
                    book.volume,
                    book.author,
                    book.original_author,
                    book.series,
                    book.category,
                    book.rating,
                    book.is_magazine_collection,
                    book.hash.to_hex(),
                ],
            )
            .context("update book metadata")?;
        Ok(())
    }

    // --- scan roots ---

    pub fn scan_roots(&self) -> Result<Vec<ScanRoot>> {
        let mut stmt = self
            .conn
            .prepare("SELECT path, is_private FROM scan_roots ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            let path: String = row.get(0)?;
            let is_private: bool = row.get(1)?;
            Ok(ScanRoot {
                path: PathBuf::from(path),
                is_private,
            })
        })?;
        let mut roots = Vec::new();
        for row in rows {
            roots.push(row.context("read scan root row")?);
        }
        Ok(roots)
    }

    pub fn add_scan_root(&self, path: &Path, is_private: bool) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO scan_roots (path, is_private) VALUES (?1, ?2)",
                params![path_to_db_string(path), is_private],
            )
            .context("add scan root")?;
        Ok(())
    }

    pub fn remove_scan_root(&self, path: &Path) -> Result<()> {
        self.conn
            .execute(
                "DELETE FROM scan_roots WHERE path = ?1",
                [path_to_db_string(path)],
            )
            .context("remove scan root")?;
        Ok(())
    }

    // --- exclusions ---

    pub fn exclude_paths(&self) -> Result<Vec<PathBuf>> {
        let mut stmt = self
            .conn
            .prepare("SELECT path FROM exclude_paths ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            let path: String = row.get(0)?;
            Ok(PathBuf::from(path))
        })?;
        let mut paths = Vec::new();
        for row in rows {
            paths.push(row.context("read exclude path row")?);
        }
        Ok(paths)
    }

    pub fn add_exclude_path(&self, path: &Path) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO exclude_paths (path) VALUES (?1)",
                [path_to_db_string(path)],
            )
            .context("add exclude path")?;
        Ok(())
    }

    pub fn remove_exclude_path(&self, path: &Path) -> Result<()> {
        self.conn
            .execute(
                "DELETE FROM exclude_paths WHERE path = ?1",
                [path_to_db_string(path)],
            )
            .context("remove exclude path")?;
        Ok(())
    }

    // --- settings ---

    pub fn setting(&self, key: &str) -> Result<Option<String>> {
        let value: Option<Option<String>> = self
            .conn
            .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .context("read setting")?;
        Ok(value.flatten())
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .context("write setting")?;
        Ok(())
    }
}
