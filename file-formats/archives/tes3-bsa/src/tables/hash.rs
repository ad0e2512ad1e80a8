//! Hash table for TES3 BSA archives

use super::preallocation;
use crate::error::LoadError;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read};

/// Hash table entry (8 bytes)
///
/// Entries order by `hash1` first and `hash2` second, which is the order the
/// archive stores them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HashEntry {
    /// Hash of the first half of the name
    pub hash1: u32,
    /// Hash of the second half of the name
    pub hash2: u32,
}

impl HashEntry {
    /// Read one entry
    pub fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            hash1: reader.read_u32::<LittleEndian>()?,
            hash2: reader.read_u32::<LittleEndian>()?,
        })
    }

    /// Both words as one 64-bit value, `hash1` in the low half
    pub fn as_u64(&self) -> u64 {
        u64::from(self.hash1) | (u64::from(self.hash2) << 32)
    }
}

/// Sorted hash table
#[derive(Debug, Clone, Default)]
pub struct HashTable {
    entries: Vec<HashEntry>,
}

impl HashTable {
    /// Read `count` entries from the current position
    pub fn read<R: Read>(reader: &mut R, count: u32) -> Result<Self, LoadError> {
        let mut entries = Vec::with_capacity(preallocation(count));

        for read in 0..count {
            match HashEntry::read(reader) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    log::debug!("Hash table ended after {read} of {count} entries: {e}");
                    return Err(LoadError::TruncatedHashTable {
                        expected: count,
                        read,
                    });
                }
            }
        }

        Ok(Self { entries })
    }

    /// Binary search for an entry equal to `hash`
    ///
    /// Only meaningful when the table is sorted. With duplicate entries one of
    /// the matching indices is returned; which one is unspecified but stable.
    pub fn find(&self, hash: &HashEntry) -> Option<usize> {
        self.entries.binary_search(hash).ok()
    }

    /// Index of the first entry that is smaller than its predecessor
    pub fn first_unsorted(&self) -> Option<usize> {
        self.entries
            .windows(2)
            .position(|pair| pair[0] > pair[1])
            .map(|i| i + 1)
    }

    /// Get an entry by index
    pub fn get(&self, index: usize) -> Option<&HashEntry> {
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
}
