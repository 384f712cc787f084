//! Application configuration constants.
//! Tuning, filenames, and setting keys in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived filenames: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    db_filename: String,
    rules_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache paths from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                db_filename: format!("{pkg}.db"),
                rules_filename: format!("{pkg}_rules.json"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Default catalog database filename (`bunko.db`).
    pub fn db_filename(&self) -> &str {
        &self.db_filename
    }

    /// Default filename-parsing rule file (`bunko_rules.json`).
    pub fn rules_filename(&self) -> &str {
        &self.rules_filename
    }
}

// ---- Hashing ----

/// Hashing I/O thresholds and buffer sizes.
pub struct HashingConsts;

impl HashingConsts {
    /// File size above which hashing uses memory-mapped I/O (bytes). 100 MB.
    pub const HASH_MMAP_THRESHOLD: u64 = 100 * 1024 * 1024;
    /// Chunk size for reading files below mmap threshold (bytes). 1 MB.
    pub const HASH_READ_CHUNK_SIZE: usize = 1024 * 1024;
}

// ---- Settings keys ----

/// Keys in the settings table consumed by the engine.
pub struct SettingsKeys;

impl SettingsKeys {
    /// Comma-separated, case-insensitive target extensions. Empty or absent
    /// means no extension filter.
    pub const SCAN_EXTENSIONS: &'static str = "scan_extensions";
}
