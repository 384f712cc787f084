//! Engine: hashing, walking, reconciliation, and the catalog store.

pub mod arg_parser;
pub mod db_ops;
pub mod handlers;
pub mod hashing;
pub mod scanner;
pub mod walk;

// Re-export commonly used items
pub use arg_parser::{Cli, Command};
pub use db_ops::{CatalogStore, open_db, open_db_in_memory};
pub use handlers::handle_command;
pub use hashing::hash_file;
pub use scanner::Scanner;
pub use walk::{FoundFiles, extension_of, is_excluded, walk_roots};
