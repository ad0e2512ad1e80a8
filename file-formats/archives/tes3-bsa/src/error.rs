//! Error types for the BSA library

use crate::handle::ArchiveId;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for BSA operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading an archive
///
/// Every variant is fatal to construction: no partially loaded archive is
/// ever returned.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The archive could not be opened for reading
    #[error("Cannot open {} for reading: {source}", .path.display())]
    Unreadable {
        /// Path that was opened
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The header does not start with the TES3 version word
    #[error("{}", bad_magic_message(.found))]
    BadMagic {
        /// Version word found, `None` if it could not be read
        found: Option<u32>,
    },

    /// The header ended after the version word
    #[error("Header truncated after the version word: expected 12 bytes")]
    TruncatedHeader,

    /// The offset table ended early
    #[error("Offset table truncated: expected {expected} entries, read {read}")]
    TruncatedOffsetTable {
        /// Number of entries announced by the header
        expected: u32,
        /// Number of entries actually read
        read: u32,
    },

    /// Could not position the reader at the hash table
    #[error("Failed to seek to hash table at {target}: {reason}")]
    SeekFailed {
        /// Absolute position of the hash table, negative for corrupt offsets
        target: i64,
        /// What went wrong
        reason: String,
    },

    /// The hash table ended early
    #[error("Hash table truncated: expected {expected} entries, read {read}")]
    TruncatedHashTable {
        /// Number of entries announced by the header
        expected: u32,
        /// Number of entries actually read
        read: u32,
    },

    /// The hash table is not in ascending order (only with `verify_sorted`)
    #[error("Hash table is not sorted at entry {index}")]
    UnsortedHashTable {
        /// First entry that is not greater than its predecessor
        index: usize,
    },

    /// A file's data lies past the end of the archive (only with `verify_bounds`)
    #[error("Entry {index} ends at 0x{end:X}, past the archive end 0x{len:X}")]
    EntryOutOfBounds {
        /// Offset table index
        index: usize,
        /// Absolute end position of the entry
        end: u64,
        /// Archive length
        len: u64,
    },

    /// Positioning or measuring the underlying stream failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn bad_magic_message(found: &Option<u32>) -> String {
    match *found {
        Some(found) => format!(
            "Not a TES3 BSA archive: version 0x{found:08X}, expected 0x{:08X}",
            crate::signatures::TES3_VERSION
        ),
        None => "Not a TES3 BSA archive: header too short".to_string(),
    }
}

impl LoadError {
    /// Create a new SeekFailed error
    pub fn seek_failed<S: Into<String>>(target: i64, reason: S) -> Self {
        LoadError::SeekFailed {
            target,
            reason: reason.into(),
        }
    }
}

/// Handle misuse
///
/// These are programming errors. They are always checked and reported
/// instead of being asserted in debug builds only.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleError {
    /// The handle came from a lookup that found nothing
    #[error("Handle does not refer to a file")]
    NotFound,

    /// The handle was produced by another archive
    #[error("Handle belongs to archive {handle_owner}, not archive {archive}")]
    ForeignArchive {
        /// Archive that produced the handle
        handle_owner: ArchiveId,
        /// Archive the handle was used with
        archive: ArchiveId,
    },

    /// The handle index is outside the offset table
    #[error("Handle index {index} out of range for {len} entries")]
    OutOfRange {
        /// Index carried by the handle
        index: usize,
        /// Number of entries in the archive
        len: usize,
    },
}

/// Errors raised while extracting a file
///
/// The archive stays usable after any of these; the destination buffer
/// contents are unspecified.
#[derive(Error, Debug)]
pub enum ReadError {
    /// The archive ended before the whole file was read
    #[error("Unexpected end of archive reading {size} bytes at 0x{offset:X}")]
    EndOfArchive {
        /// Absolute position of the file data
        offset: u64,
        /// Size of the file
        size: u32,
    },

    /// Any other I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The destination cannot hold the file
    #[error("Destination buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// File size
        needed: usize,
        /// Buffer length
        available: usize,
    },

    /// The handle is not valid for this archive
    #[error(transparent)]
    Handle(#[from] HandleError),
}

/// Main error type for BSA operations
#[derive(Error, Debug)]
pub enum Error {
    /// Loading the archive failed
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Extracting a file failed
    #[error(transparent)]
    Read(#[from] ReadError),

    /// A handle was misused
    #[error(transparent)]
    Handle(#[from] HandleError),

    /// File not found in archive
    #[error("File not found: {0}")]
    FileNotFound(String),
}

impl Error {
    /// Check if this error indicates the archive is corrupted
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Error::Load(
                LoadError::BadMagic { .. }
                    | LoadError::TruncatedHeader
                    | LoadError::TruncatedOffsetTable { .. }
                    | LoadError::SeekFailed { .. }
                    | LoadError::TruncatedHashTable { .. }
                    | LoadError::UnsortedHashTable { .. }
                    | LoadError::EntryOutOfBounds { .. }
            ) | Error::Read(ReadError::EndOfArchive { .. })
        )
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::FileNotFound(_) | Error::Read(ReadError::BufferTooSmall { .. })
        )
    }
}
