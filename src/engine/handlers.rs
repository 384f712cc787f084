//! Command handlers: wire the CLI to the store, parser, and scanner.

use anyhow::Result;

use crate::rules::{FileNameParser, RuleLoader};
use crate::types::{Book, ScanRoot};
use crate::utils::setup_logging;

use super::arg_parser::{Cli, Command, ExcludeAction, RootAction};
use super::db_ops::CatalogStore;
use super::scanner::Scanner;
use super::walk::is_excluded;

/// Entry point for the binary: set up logging, open the store, dispatch.
pub fn handle_command(cli: &Cli) -> Result<()> {
    setup_logging(cli.verbose);
    let store = CatalogStore::open(&cli.db_path())?;

    match &cli.command {
        Command::Scan => handle_scan(cli, store),
        Command::List { private } => handle_list(&store, *private),
        Command::Root { action } => handle_root(&store, action),
        Command::Exclude { action } => handle_exclude(&store, action),
        Command::Get { key } => {
            match store.setting(key)? {
                Some(value) => println!("{value}"),
                None => println!("(unset)"),
            }
            Ok(())
        }
        Command::Set { key, value } => store.set_setting(key, value),
    }
}

/// Run one reconciliation on a worker thread, draining events as they
/// stream. The detailed progress lines come from the engine's log output;
/// the channel is what a UI would subscribe to.
fn handle_scan(cli: &Cli, store: CatalogStore) -> Result<()> {
    let rules = RuleLoader::new(cli.rules_path()).load()?;
    let scanner = Scanner::new(store, FileNameParser::new(rules));
    let (events, handle) = scanner.spawn();
    for event in events {
        log::debug!("event: {:?}", event);
    }
    let summary = handle
        .join()
        .map_err(|_| anyhow::anyhow!("scan thread panicked"))??;
    println!(
        "{} added, {} removed, {} moved, {} updated",
        summary.added, summary.removed, summary.moved, summary.updated
    );
    Ok(())
}

/// True when the book lives under a scan root flagged private. Display-time
/// concern only; reconciliation never looks at this.
fn is_private(book: &Book, roots: &[ScanRoot]) -> bool {
    roots
        .iter()
        .any(|r| r.is_private && book.path.starts_with(&r.path))
}

fn handle_list(store: &CatalogStore, show_private: bool) -> Result<()> {
    let roots = store.scan_roots()?;
    for book in store.all_books()? {
        if !show_private && is_private(&book, &roots) {
            continue;
        }
        let volume = book
            .volume
            .map(|v| format!(" vol.{v}"))
            .unwrap_or_default();
        let author = book
            .author
            .as_deref()
            .map(|a| format!(" [{a}]"))
            .unwrap_or_default();
        println!(
            "{}{volume}{author}  {}",
            book.display_title(),
            book.path.display()
        );
    }
    Ok(())
}

fn handle_root(store: &CatalogStore, action: &RootAction) -> Result<()> {
    match action {
        RootAction::Add { path, private } => store.add_scan_root(path, *private),
        RootAction::Remove { path } => store.remove_scan_root(path),
        RootAction::List => {
            for root in store.scan_roots()? {
                let marker = if root.is_private { " (private)" } else { "" };
                println!("{}{marker}", root.path.display());
            }
            Ok(())
        }
    }
}

fn handle_exclude(store: &CatalogStore, action: &ExcludeAction) -> Result<()> {
    match action {
        ExcludeAction::Add { path } => store.add_exclude_path(path),
        ExcludeAction::Remove { path } => store.remove_exclude_path(path),
        ExcludeAction::List => {
            let excluded = store.exclude_paths()?;
            for root in store.scan_roots()? {
                if is_excluded(&root.path, &excluded) {
                    log::warn!(
                        "scan root {} is itself excluded and will never be walked",
                        root.path.display()
                    );
                }
            }
            for path in excluded {
                println!("{}", path.display());
            }
            Ok(())
        }
    }
}
