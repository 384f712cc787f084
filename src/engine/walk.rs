//! Filesystem enumeration: walk scan roots, filter, hash.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::warn;
use walkdir::WalkDir;

use crate::types::{ContentHash, ExtensionFilter, ScanRoot};

use super::hashing::hash_file;

/// Accepted files observed on disk, indexed both ways for the diff.
///
/// `by_hash` holds one path per hash (last writer wins, so true duplicates
/// collapse to a single observed location); `by_path` holds the hash seen at
/// each path and drives update detection.
#[derive(Debug, Default)]
pub struct FoundFiles {
    pub by_hash: HashMap<ContentHash, PathBuf>,
    pub by_path: HashMap<PathBuf, ContentHash>,
}

impl FoundFiles {
    fn record(&mut self, hash: ContentHash, path: PathBuf) {
        self.by_path.insert(path.clone(), hash);
        self.by_hash.insert(hash, path);
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

/// True when `path` sits under any excluded prefix. Component-wise
/// comparison: excluding `/foo` does not exclude `/foobar`.
pub fn is_excluded(path: &Path, excluded: &[PathBuf]) -> bool {
    excluded.iter().any(|prefix| path.starts_with(prefix))
}

/// Lowercased extension without the leading dot; `None` for extensionless files.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Walk every scan root and build the found-file indexes.
///
/// Excluded directories are pruned without descending. Files failing the
/// extension filter are skipped. Unreadable paths (walk errors or hash
/// failures) are logged and excluded from the run entirely; nothing is
/// retried until the next run.
pub fn walk_roots(
    roots: &[ScanRoot],
    excluded: &[PathBuf],
    filter: &ExtensionFilter,
) -> FoundFiles {
    let mut found = FoundFiles::default();
    for root in roots {
        let mut walker = WalkDir::new(&root.path).into_iter();
        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("cannot access path, skipping: {}", err);
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                if is_excluded(entry.path(), excluded) {
                    walker.skip_current_dir();
                }
                continue;
            }
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if is_excluded(path, excluded) {
                continue;
            }
            if !filter.accepts(extension_of(path).as_deref()) {
                continue;
            }
            match hash_file(path) {
                Ok(hash) => found.record(hash, path.to_path_buf()),
                // Unavailable content: the file is treated as not found this
                // cycle. A record previously known at this path is simply not
                // re-confirmed and may be flagged for deletion.
                Err(err) => warn!("unreadable file, skipping: {}: {}", path.display(), err),
            }
        }
    }
    found
}
