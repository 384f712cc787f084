//! Reconciliation engine: converge the catalog to observed filesystem state.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use anyhow::bail;
use crossbeam_channel::Receiver;
use log::info;

use crate::rules::FileNameParser;
use crate::types::{Book, ContentHash, ExtensionFilter, ScanEvent, ScanSummary};
use crate::utils::config::SettingsKeys;

use super::db_ops::CatalogStore;
use super::walk::walk_roots;

/// Reconciles the catalog against the filesystem in one sequential pass:
/// walk, hash, diff, apply. Store mutations are applied in a fixed order
/// (content updates, then moves, inserts, deletes) so a record that changed
/// content and location in the same run is normalized onto its new hash
/// identity before its paths are compared.
///
/// A single `Scanner` refuses to start a second run while one is in
/// progress; concurrent runs against the same store would observe
/// overlapping stale snapshots.
pub struct Scanner {
    store: CatalogStore,
    parser: FileNameParser,
    running: AtomicBool,
}

/// Clears the running flag on every exit path, including store errors.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Scanner {
    pub fn new(store: CatalogStore, parser: FileNameParser) -> Self {
        Self {
            store,
            parser,
            running: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Run one reconciliation without an event sink. Progress still streams
    /// through the log.
    pub fn run(&self) -> crate::Result<ScanSummary> {
        self.run_with(|_| {})
    }

    /// Run one reconciliation, invoking `on_event` for the start/finish pair
    /// and each classified mutation. Fails up front when a run is already in
    /// progress. A store mutation failure aborts the run; mutations already
    /// applied remain committed.
    pub fn run_with<F>(&self, mut on_event: F) -> crate::Result<ScanSummary>
    where
        F: FnMut(ScanEvent),
    {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            bail!("a reconciliation run is already in progress");
        }
        let _guard = RunGuard(&self.running);
        self.reconcile(&mut on_event)
    }

    /// Move the scanner onto a worker thread so the caller's thread stays
    /// responsive. Events stream through the returned channel; the join
    /// handle yields the run result. The algorithm itself stays sequential.
    pub fn spawn(self) -> (Receiver<ScanEvent>, JoinHandle<crate::Result<ScanSummary>>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let handle = thread::spawn(move || {
            self.run_with(|event| {
                // Receiver may have been dropped; the run carries on.
                let _ = tx.send(event);
            })
        });
        (rx, handle)
    }

    fn reconcile(&self, on_event: &mut dyn FnMut(ScanEvent)) -> crate::Result<ScanSummary> {
        info!("scan started");
        on_event(ScanEvent::Started);

        // Snapshot configuration and walk the filesystem.
        let roots = self.store.scan_roots()?;
        let excluded = self.store.exclude_paths()?;
        let filter =
            ExtensionFilter::parse(self.store.setting(SettingsKeys::SCAN_EXTENSIONS)?.as_deref());
        let mut found = walk_roots(&roots, &excluded, &filter);
        info!("found {} files across {} roots", found.len(), roots.len());

        // Snapshot current store state.
        let books = self.store.all_books()?;
        let mut db_by_hash: HashMap<ContentHash, Book> =
            books.iter().map(|b| (b.hash, b.clone())).collect();
        let db_by_path: HashMap<PathBuf, Book> =
            books.into_iter().map(|b| (b.path.clone(), b)).collect();

        let mut summary = ScanSummary::default();

        // Content change at a stable path: rename the record onto its new
        // hash before move/insert/delete classification. Without this
        // pre-pass an edited-in-place file would be misclassified as one
        // deletion plus one addition, losing its accumulated metadata.
        for (path, book) in &db_by_path {
            let Some(&new_hash) = found.by_path.get(path) else {
                continue;
            };
            if new_hash == book.hash {
                continue;
            }
            info!("updated: {} ({})", book.display_title(), path.display());
            self.store.update_book_hash(&book.hash, &new_hash, path)?;
            on_event(ScanEvent::Updated { path: path.clone() });
            summary.updated += 1;
            // Prune both sides so the remaining sets partition cleanly.
            db_by_hash.remove(&book.hash);
            found.by_hash.remove(&new_hash);
        }

        // Moved: same hash, different location. Path update only.
        for (hash, book) in &db_by_hash {
            let Some(disk_path) = found.by_hash.get(hash) else {
                continue;
            };
            if *disk_path != book.path {
                info!(
                    "moved: {} -> {}",
                    book.path.display(),
                    disk_path.display()
                );
                self.store.update_book_path(hash, disk_path)?;
                on_event(ScanEvent::Moved {
                    from: book.path.clone(),
                    to: disk_path.clone(),
                });
                summary.moved += 1;
            }
        }

        // New: on disk but never recorded. Parse the filename into a draft
        // and register the record.
        for (hash, path) in &found.by_hash {
            if db_by_hash.contains_key(hash) {
                continue;
            }
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let draft = self.parser.parse(&name);
            let book = Book::from_draft(
                draft,
                *hash,
                path.clone(),
                chrono::Utc::now().to_rfc3339(),
            );
            info!("registered: {} ({})", book.display_title(), path.display());
            self.store.insert_book(&book)?;
            on_event(ScanEvent::Added { path: path.clone() });
            summary.added += 1;
        }

        // Deleted: recorded but absent from disk. Hard delete, no retention.
        for (hash, book) in &db_by_hash {
            if found.by_hash.contains_key(hash) {
                continue;
            }
            info!(
                "deleted: {} ({})",
                book.display_title(),
                book.path.display()
            );
            self.store.delete_book(hash)?;
            on_event(ScanEvent::Removed {
                path: book.path.clone(),
            });
            summary.removed += 1;
        }

        info!(
            "scan finished: {} added, {} removed, {} moved, {} updated",
            summary.added, summary.removed, summary.moved, summary.updated
        );
        on_event(ScanEvent::Finished(summary));
        Ok(summary)
    }
}
