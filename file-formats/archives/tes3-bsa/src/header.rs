//! BSA header structure and parsing

use crate::error::LoadError;
use crate::signatures::TES3_VERSION;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Read;

/// Size of the on-disk header in bytes
pub const HEADER_SIZE: u64 = 12;

/// TES3 BSA header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BsaHeader {
    /// Format version, always [`TES3_VERSION`]
    pub version: u32,
    /// Offset of the hash table, relative to the end of the header.
    /// Signed on disk.
    pub hash_table_offset: i32,
    /// Number of files in the archive
    pub file_count: u32,
}

impl BsaHeader {
    /// Read and validate a header from the start of an archive
    pub fn read<R: Read>(reader: &mut R) -> Result<Self, LoadError> {
        let version = reader
            .read_u32::<LittleEndian>()
            .map_err(|_| LoadError::BadMagic { found: None })?;
        if version != TES3_VERSION {
            return Err(LoadError::BadMagic {
                found: Some(version),
            });
        }

        let hash_table_offset = reader
            .read_i32::<LittleEndian>()
            .map_err(|_| LoadError::TruncatedHeader)?;
        let file_count = reader
            .read_u32::<LittleEndian>()
            .map_err(|_| LoadError::TruncatedHeader)?;

        Ok(Self {
            version,
            hash_table_offset,
            file_count,
        })
    }

    /// Absolute position of the hash table
    ///
    /// `None` when the offset is negative or the position does not fit in
    /// the signed 32-bit range the format addresses.
    pub fn hash_table_position(&self) -> Option<u64> {
        if self.hash_table_offset < 0 {
            return None;
        }
        self.hash_table_offset
            .checked_add(HEADER_SIZE as i32)
            .map(|pos| pos as u64)
    }

    /// Hash table position as a signed sum, in range or not
    pub fn raw_hash_table_position(&self) -> i64 {
        i64::from(self.hash_table_offset) + HEADER_SIZE as i64
    }
}
