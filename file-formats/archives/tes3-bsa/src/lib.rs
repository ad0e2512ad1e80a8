//! # tes3_bsa - Morrowind BSA Archive Library
//!
//! A read-only loader and random-access extractor for the BSA archives
//! shipped with The Elder Scrolls III: Morrowind and its expansions.
//!
//! ## Archive Layout
//!
//! All scalar fields are little-endian 32-bit words.
//!
//! | Section      | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | Header       | version (`0x100`), hash table offset, file count          |
//! | Offset table | `file_count` × (size, offset relative to the data section) |
//! | Name block   | file names, skipped by this reader                        |
//! | Hash table   | `file_count` × (hash1, hash2), sorted ascending           |
//! | Data         | raw file contents                                         |
//!
//! The hash table offset is relative to the end of the 12-byte header and
//! the data section starts immediately after the hash table.
//!
//! ## Examples
//!
//! ```no_run
//! use tes3_bsa::Archive;
//!
//! # fn main() -> Result<(), tes3_bsa::Error> {
//! let mut archive = Archive::open("Tribunal.bsa")?;
//!
//! // Case and slash direction do not matter
//! let handle = archive.lookup("Textures/AMEL_Summon_Spark.dds");
//! assert!(handle.exists());
//!
//! let size = archive.size(handle)?;
//! let offset = archive.offset(handle)?;
//! println!("{size} bytes at 0x{offset:X}");
//!
//! let mut data = vec![0u8; size as usize];
//! archive.extract(handle, &mut data)?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod archive;
pub mod error;
pub mod handle;
pub mod hash;
pub mod header;
pub mod path;
pub mod tables;

// Re-export commonly used types
pub use archive::{Archive, ArchiveInfo, OpenOptions};
pub use error::{Error, HandleError, LoadError, ReadError, Result};
pub use handle::{ArchiveId, FileHandle, Slot};
pub use hash::{hash_bytes, hash_string};
pub use header::{BsaHeader, HEADER_SIZE};
pub use tables::{HashEntry, HashTable, OffsetEntry, OffsetTable};

/// BSA signature constants
pub mod signatures {
    /// Version word at the start of every TES3 BSA archive
    pub const TES3_VERSION: u32 = 0x0000_0100;
}
