//! SHA-256 digests for checksum comparison

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

/// SHA-256 digest of a file
pub type FileHash = [u8; 32];

/// Streams a file through SHA-256
pub struct FileHasher;

impl FileHasher {
    /// Compute the SHA-256 digest of a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn hash(path: &Path) -> io::Result<FileHash> {
        let mut reader = BufReader::new(File::open(path)?);
        let mut hasher = Sha256::new();
        let mut buffer = [0; 8192];

        loop {
            let bytes_read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(hasher.finalize().into())
    }
}
