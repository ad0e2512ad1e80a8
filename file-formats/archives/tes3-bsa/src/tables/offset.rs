//! Offset table for TES3 BSA archives

use super::preallocation;
use crate::error::LoadError;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read};

/// Offset table entry (8 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetEntry {
    /// Size of the file data in bytes
    pub size: u32,
    /// Start of the file data, relative to the data section
    pub offset: u32,
}

impl OffsetEntry {
    /// Read one entry
    pub fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            size: reader.read_u32::<LittleEndian>()?,
            offset: reader.read_u32::<LittleEndian>()?,
        })
    }

    /// Relative end of the file data
    pub fn end(&self) -> u64 {
        u64::from(self.offset) + u64::from(self.size)
    }
}

/// Offset table, index-aligned with the hash table
#[derive(Debug, Clone, Default)]
pub struct OffsetTable {
    entries: Vec<OffsetEntry>,
}

impl OffsetTable {
    /// Read `count` entries from the current position
    pub fn read<R: Read>(reader: &mut R, count: u32) -> Result<Self, LoadError> {
        let mut entries = Vec::with_capacity(preallocation(count));

        for read in 0..count {
            match OffsetEntry::read(reader) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    log::debug!("Offset table ended after {read} of {count} entries: {e}");
                    return Err(LoadError::TruncatedOffsetTable {
                        expected: count,
                        read,
                    });
                }
            }
        }

        Ok(Self { entries })
    }

    /// Get an entry by index
    pub fn get(&self, index: usize) -> Option<&OffsetEntry> {
        self.entries.get(index)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in table order
    pub fn entries(&self) -> &[OffsetEntry] {
        &self.entries
    }
}
