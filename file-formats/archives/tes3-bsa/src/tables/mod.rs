//! BSA table structures
//!
//! A TES3 archive carries two index-aligned tables: the offset table right
//! after the header and the hash table after the (skipped) name block.

pub mod hash;
pub mod offset;

pub use hash::{HashEntry, HashTable};
pub use offset::{OffsetEntry, OffsetTable};

/// Size in bytes of one record in either table
pub const RECORD_SIZE: u64 = 8;

/// Upper bound on entries reserved up front when reading a table
///
/// The entry count comes straight from the file, so a corrupt header must
/// not translate into a huge allocation before the first short read.
pub const MAX_PREALLOCATED_ENTRIES: usize = 1 << 16;

pub(crate) fn preallocation(count: u32) -> usize {
    (count as usize).min(MAX_PREALLOCATED_ENTRIES)
}
