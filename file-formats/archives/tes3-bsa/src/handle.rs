//! File handles returned by archive lookups
//!
//! A [`FileHandle`] is a small copyable value that remembers which archive
//! produced it and where the file sits in that archive's tables. It holds no
//! borrow of the archive, so it can be stored, sent across threads, and
//! compared freely. Every accessor that dereferences a handle checks that it
//! is used with its owning archive and returns
//! [`HandleError`](crate::HandleError) otherwise.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ARCHIVE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a loaded archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArchiveId(u64);

impl ArchiveId {
    /// Allocate a fresh identity. Identities are never reused within a process.
    pub(crate) fn next() -> Self {
        Self(NEXT_ARCHIVE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw identity value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ArchiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Index into the offset and hash tables
    Found(usize),
    /// No entry matched the name
    NotFound,
}

/// Reference to a file (or the absence of one) inside a specific archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileHandle {
    owner: ArchiveId,
    slot: Slot,
}

impl FileHandle {
    pub(crate) fn new(owner: ArchiveId, slot: Slot) -> Self {
        Self { owner, slot }
    }

    /// Returns true if the lookup found a file
    pub fn exists(&self) -> bool {
        matches!(self.slot, Slot::Found(_))
    }

    /// Archive that produced this handle
    pub fn owner(&self) -> ArchiveId {
        self.owner
    }

    /// Lookup result carried by this handle
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Table index, if the file was found
    pub fn index(&self) -> Option<usize> {
        match self.slot {
            Slot::Found(index) => Some(index),
            Slot::NotFound => None,
        }
    }
}
