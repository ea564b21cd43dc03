//! Golden-vector file loading.
//!
//! Vector files are flat sequences of fixed-width little-endian
//! records: 1 byte value + 2 bytes flags for 8-bit results, 2 + 2 for
//! 16-bit results. No record count is stored in the file; the domain
//! shape determines the per-block entry count, and a file may hold
//! several blocks back to back (one per initial-flags condition).
//! Slicing into blocks is the caller's job.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Input domain shape of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Two 8-bit operands, a-major then b-minor: 65536 entries.
    Pair8,
    /// One 8-bit operand: 256 entries.
    Single8,
    /// One 16-bit operand: 65536 entries.
    Single16,
}

impl Shape {
    /// On-disk record width in bytes.
    pub fn record_len(self) -> usize {
        match self {
            Shape::Pair8 | Shape::Single8 => 3,
            Shape::Single16 => 4,
        }
    }

    /// Number of entries in one domain block.
    pub fn block_len(self) -> usize {
        match self {
            Shape::Pair8 | Shape::Single16 => 65536,
            Shape::Single8 => 256,
        }
    }
}

/// One golden (expected-value, expected-flags) pair. The value is
/// stored widened to u16; 8-bit operations only use the low byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorEntry {
    pub value: u16,
    pub flags: u16,
}

#[derive(Debug, Error)]
pub enum VectorError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{len} bytes is not a whole number of {record_len}-byte records")]
    TrailingBytes { len: usize, record_len: usize },
    #[error("{count} records is not a multiple of the {block_len}-entry block size")]
    BadBlockCount { count: usize, block_len: usize },
    #[error("'{path}': {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: Box<VectorError>,
    },
}

/// Decode a raw byte buffer into vector entries.
///
/// The whole buffer must be consumed as complete records, and the
/// record count must be an exact multiple of the shape's block length;
/// anything else is a fatal format error.
pub fn decode(bytes: &[u8], shape: Shape) -> Result<Vec<VectorEntry>, VectorError> {
    let record_len = shape.record_len();
    let chunks = bytes.chunks_exact(record_len);
    if !chunks.remainder().is_empty() {
        return Err(VectorError::TrailingBytes {
            len: bytes.len(),
            record_len,
        });
    }

    let entries: Vec<VectorEntry> = chunks
        .map(|rec| match shape {
            Shape::Pair8 | Shape::Single8 => VectorEntry {
                value: rec[0] as u16,
                flags: u16::from_le_bytes([rec[1], rec[2]]),
            },
            Shape::Single16 => VectorEntry {
                value: u16::from_le_bytes([rec[0], rec[1]]),
                flags: u16::from_le_bytes([rec[2], rec[3]]),
            },
        })
        .collect();

    let block_len = shape.block_len();
    if entries.len() % block_len != 0 {
        return Err(VectorError::BadBlockCount {
            count: entries.len(),
            block_len,
        });
    }
    Ok(entries)
}

/// Read a vector file fully into memory and decode it. The file handle
/// does not outlive the load.
pub fn load(path: &Path, shape: Shape) -> Result<Vec<VectorEntry>, VectorError> {
    let bytes = fs::read(path).map_err(|source| VectorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&bytes, shape).map_err(|source| VectorError::Format {
        path: path.to_path_buf(),
        source: Box::new(source),
    })
}
