use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::config::PackagePaths;

/// Manga/e-book catalog engine with content-addressed reconciliation.
#[derive(Clone, Parser)]
#[command(name = "bunko")]
#[command(about = "Catalog e-book files: scan roots, parse filenames, reconcile the catalog.")]
pub struct Cli {
    /// Path to the catalog database. Default: `bunko.db` in the current directory.
    #[arg(long, short)]
    pub db: Option<PathBuf>,

    /// Path to the filename-parsing rule file (JSON). Built-in rules are used
    /// when the file does not exist. Default: `bunko_rules.json` in the
    /// current directory.
    #[arg(long, short)]
    pub rules: Option<PathBuf>,

    /// Verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Subcommand)]
pub enum Command {
    /// Walk all scan roots and reconcile the catalog with the filesystem.
    Scan,
    /// Print catalog records. Books under private scan roots are hidden
    /// unless --private is given.
    List {
        #[arg(long)]
        private: bool,
    },
    /// Manage scan roots.
    Root {
        #[command(subcommand)]
        action: RootAction,
    },
    /// Manage excluded path prefixes.
    Exclude {
        #[command(subcommand)]
        action: ExcludeAction,
    },
    /// Read a setting.
    Get { key: String },
    /// Write a setting (e.g. `set scan_extensions cbz,zip,pdf`).
    Set { key: String, value: String },
}

#[derive(Clone, Subcommand)]
pub enum RootAction {
    /// Register a directory for scanning.
    Add {
        path: PathBuf,
        /// Hide this root's books outside private mode.
        #[arg(long)]
        private: bool,
    },
    /// Unregister a scan root.
    Remove { path: PathBuf },
    /// List scan roots.
    List,
}

#[derive(Clone, Subcommand)]
pub enum ExcludeAction {
    /// Exclude a directory prefix from every scan.
    Add { path: PathBuf },
    /// Remove an exclusion.
    Remove { path: PathBuf },
    /// List exclusions.
    List,
}

impl Cli {
    /// Catalog path, defaulting to the package db filename in the current directory.
    pub fn db_path(&self) -> PathBuf {
        self.db
            .clone()
            .unwrap_or_else(|| PathBuf::from(PackagePaths::get().db_filename()))
    }

    /// Rule file path, defaulting to the package rules filename in the current directory.
    pub fn rules_path(&self) -> PathBuf {
        self.rules
            .clone()
            .unwrap_or_else(|| PathBuf::from(PackagePaths::get().rules_filename()))
    }
}
