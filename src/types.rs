//! Public types for the bunko catalog API.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

/// SHA-256 digest of a file's full byte content. The content-addressed
/// identity of a book: two files with identical bytes collapse to one record.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex, as stored in the `file_hash` column.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a 64-char hex string. `None` on wrong length or non-hex input.
    pub fn from_hex(s: &str) -> Option<Self> {
        if s.len() != 64 || !s.is_ascii() {
            return None;
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in s.as_bytes().chunks(2).enumerate() {
            let hi = (chunk[0] as char).to_digit(16)?;
            let lo = (chunk[1] as char).to_digit(16)?;
            bytes[i] = ((hi << 4) | lo) as u8;
        }
        Some(Self(bytes))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First 8 hex chars are enough to tell records apart in logs.
        write!(f, "ContentHash({}..)", &self.to_hex()[..8])
    }
}

/// Metadata extracted from a filename by the rule engine. No location or
/// identity yet; the scanner attaches those when it registers the book.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookDraft {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub volume: Option<u32>,
    pub author: Option<String>,
    pub original_author: Option<String>,
    pub series: Option<String>,
    pub is_magazine_collection: bool,
}

/// Catalog record for one uniquely-hashed file.
///
/// `hash` is the primary de-duplication key and unique across the catalog.
/// `path` tracks whichever on-disk instance was last observed. `created_at`
/// (RFC 3339) is stamped at first registration and never changes, even when
/// the content hash is renamed by an in-place update.
#[derive(Clone, Debug, PartialEq)]
pub struct Book {
    pub hash: ContentHash,
    pub path: PathBuf,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub volume: Option<u32>,
    pub author: Option<String>,
    pub original_author: Option<String>,
    pub series: Option<String>,
    pub category: Option<String>,
    pub rating: Option<u8>,
    pub is_magazine_collection: bool,
    pub created_at: String,
}

impl Book {
    /// Build a full record from a parser draft plus the identity discovered
    /// during a scan.
    pub fn from_draft(
        draft: BookDraft,
        hash: ContentHash,
        path: PathBuf,
        created_at: String,
    ) -> Self {
        Self {
            hash,
            path,
            title: draft.title,
            subtitle: draft.subtitle,
            volume: draft.volume,
            author: draft.author,
            original_author: draft.original_author,
            series: draft.series,
            category: None,
            rating: None,
            is_magazine_collection: draft.is_magazine_collection,
            created_at,
        }
    }

    /// Title for progress messages: parsed title, else the file name.
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(t) => t.clone(),
            None => self
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }
}

/// A directory the scanner walks recursively. Books under a private root are
/// hidden outside private mode; that filtering is a display concern and never
/// influences reconciliation.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanRoot {
    pub path: PathBuf,
    pub is_private: bool,
}

/// Target-extension set parsed from the `scan_extensions` setting.
/// Empty means no filter: every file is accepted.
#[derive(Clone, Debug, Default)]
pub struct ExtensionFilter(HashSet<String>);

impl ExtensionFilter {
    /// Parse a comma-separated, case-insensitive extension list. Whitespace
    /// around entries is trimmed; empty entries are dropped. Parsing happens
    /// once here, at the store-read boundary.
    pub fn parse(raw: Option<&str>) -> Self {
        let set = raw
            .unwrap_or_default()
            .split(',')
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self(set)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the file should be considered. `ext` is the lowercased
    /// extension without the leading dot; `None` for extensionless files.
    pub fn accepts(&self, ext: Option<&str>) -> bool {
        if self.0.is_empty() {
            return true;
        }
        ext.is_some_and(|e| self.0.contains(e))
    }
}

/// Progress notification emitted during a reconciliation run. Advisory only;
/// carries no control-flow meaning.
#[derive(Clone, Debug, PartialEq)]
pub enum ScanEvent {
    Started,
    /// Previously-unseen hash registered as a new book.
    Added { path: PathBuf },
    /// Known hash no longer on disk; record deleted.
    Removed { path: PathBuf },
    /// Same content observed at a new location; path updated.
    Moved { from: PathBuf, to: PathBuf },
    /// Content changed at a stable path; record renamed onto the new hash.
    Updated { path: PathBuf },
    Finished(ScanSummary),
}

/// Mutation counts for one reconciliation run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScanSummary {
    pub added: usize,
    pub removed: usize,
    pub moved: usize,
    pub updated: usize,
}

impl ScanSummary {
    pub fn total(&self) -> usize {
        self.added + self.removed + self.moved + self.updated
    }

    /// True when the run converged without touching the store.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
