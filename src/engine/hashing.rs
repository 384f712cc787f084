//! File hashing utilities

use anyhow::Result;
use memmap2::Mmap;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::path::Path;

use crate::types::ContentHash;
use crate::utils::config::HashingConsts;

/// Hash a file with SHA-256. Uses memory-mapped I/O for files above
/// threshold, chunked reading otherwise.
///
/// Any I/O error is the "content unavailable" signal: callers must treat the
/// file as not found for this cycle and skip it, so it contributes neither a
/// new, moved, nor deleted record.
pub fn hash_file(path: &Path) -> Result<ContentHash> {
    let file = File::open(path)?;
    let size = file.metadata()?.len();
    let mut hasher = Sha256::new();

    if size > HashingConsts::HASH_MMAP_THRESHOLD {
        // Memory-mapped I/O for large files
        let mmap = unsafe { Mmap::map(&file)? };
        hasher.update(&mmap[..]);
    } else {
        // Chunked reading for smaller files
        use std::io::Read;
        let mut reader =
            std::io::BufReader::with_capacity(HashingConsts::HASH_READ_CHUNK_SIZE, file);
        let mut buffer = vec![0u8; HashingConsts::HASH_READ_CHUNK_SIZE];
        loop {
            let n = reader.read(&mut buffer)?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }
    }

    Ok(ContentHash::from_bytes(hasher.finalize().into()))
}
