//! Streaming byte-for-byte comparison

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

const CHUNK_SIZE: usize = 8192;

/// Compares two files chunk by chunk without loading either into memory
pub struct ContentComparator;

impl ContentComparator {
    /// Whether both files yield the same byte stream
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be opened or read.
    pub fn equal(a: &Path, b: &Path) -> io::Result<bool> {
        let mut reader_a = BufReader::new(File::open(a)?);
        let mut reader_b = BufReader::new(File::open(b)?);

        let mut buf_a = [0u8; CHUNK_SIZE];
        let mut buf_b = [0u8; CHUNK_SIZE];

        loop {
            let read_a = read_chunk(&mut reader_a, &mut buf_a)?;
            let read_b = read_chunk(&mut reader_b, &mut buf_b)?;

            if read_a != read_b || buf_a[..read_a] != buf_b[..read_b] {
                return Ok(false);
            }

            if read_a == 0 {
                return Ok(true);
            }
        }
    }
}

/// Fill `buf` as far as the stream allows; short only at end of stream
fn read_chunk(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
