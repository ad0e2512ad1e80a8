//! Archive loading, lookup and extraction
//!
//! An [`Archive`] is created only by a fully successful load and keeps its
//! reader open until it is dropped. Lookups work purely on the in-memory hash
//! table; extraction seeks the shared reader, which is why it needs
//! `&mut self`.
//!
//! # Examples
//!
//! ```no_run
//! use tes3_bsa::Archive;
//!
//! # fn main() -> Result<(), tes3_bsa::Error> {
//! let mut archive = Archive::open("Data Files/Tribunal.bsa")?;
//!
//! let handle = archive.lookup("meshes/i/act_sotha_powertubes.nif");
//! if handle.exists() {
//!     let mut data = vec![0u8; archive.size(handle)? as usize];
//!     archive.extract(handle, &mut data)?;
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, HandleError, LoadError, ReadError, Result};
use crate::handle::{ArchiveId, FileHandle, Slot};
use crate::hash::hash_bytes;
use crate::header::BsaHeader;
use crate::tables::{HashTable, OffsetEntry, OffsetTable, RECORD_SIZE};
use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Options for opening BSA archives
///
/// The defaults trust the archive the way the game does: the hash table is
/// assumed to be sorted and offsets are not checked against the file length.
///
/// # Examples
///
/// ```no_run
/// use tes3_bsa::OpenOptions;
///
/// let archive = OpenOptions::new()
///     .verify_sorted(true)
///     .verify_bounds(true)
///     .open("Morrowind.bsa")?;
/// # Ok::<(), tes3_bsa::LoadError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    /// Reject archives whose hash table is not in ascending order.
    ///
    /// Lookups binary-search the hash table, so an unsorted table makes them
    /// unreliable. When `false` (default) the order is trusted.
    pub verify_sorted: bool,

    /// Reject archives with offset entries that point past the end of the
    /// file. When `false` (default) such entries fail at extraction time with
    /// [`ReadError::EndOfArchive`].
    pub verify_bounds: bool,
}

impl OpenOptions {
    /// Create new default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the hash table order is verified on open
    pub fn verify_sorted(mut self, verify: bool) -> Self {
        self.verify_sorted = verify;
        self
    }

    /// Set whether file entries are checked against the archive length
    pub fn verify_bounds(mut self, verify: bool) -> Self {
        self.verify_bounds = verify;
        self
    }

    /// Open an archive file with these options
    pub fn open<P: AsRef<Path>>(self, path: P) -> std::result::Result<Archive, LoadError> {
        Archive::open_with_options(path, &self)
    }
}

/// Summary of a loaded archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveInfo {
    /// Path the archive was opened from, if any
    pub path: Option<PathBuf>,
    /// Total archive size in bytes
    pub archive_size: u64,
    /// Number of files
    pub file_count: u32,
    /// Absolute position of the hash table
    pub hash_table_position: u64,
    /// Absolute position of the data section
    pub data_offset: u64,
}

/// A loaded TES3 BSA archive
///
/// Not `Clone`: each archive owns exactly one reader over its storage.
#[derive(Debug)]
pub struct Archive<R = BufReader<File>> {
    path: Option<PathBuf>,
    reader: R,
    id: ArchiveId,
    header: BsaHeader,
    offsets: OffsetTable,
    hashes: HashTable,
    hash_table_position: u64,
    data_offset: u64,
}

impl Archive {
    /// Open an archive file
    pub fn open<P: AsRef<Path>>(path: P) -> std::result::Result<Self, LoadError> {
        Self::open_with_options(path, &OpenOptions::default())
    }

    /// Open an archive file with specific options
    pub fn open_with_options<P: AsRef<Path>>(
        path: P,
        options: &OpenOptions,
    ) -> std::result::Result<Self, LoadError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| LoadError::Unreadable {
            path: path.clone(),
            source,
        })?;

        log::debug!("Opening BSA archive {}", path.display());

        let mut archive = Self::from_reader_with_options(BufReader::new(file), options)?;
        archive.path = Some(path);
        Ok(archive)
    }
}

impl<R: Read + Seek> Archive<R> {
    /// Load an archive from any seekable reader
    ///
    /// Positions are absolute from the start of the stream, so the reader is
    /// rewound before the header is read.
    pub fn from_reader(reader: R) -> std::result::Result<Self, LoadError> {
        Self::from_reader_with_options(reader, &OpenOptions::default())
    }

    /// Load an archive from a reader with specific options
    pub fn from_reader_with_options(
        mut reader: R,
        options: &OpenOptions,
    ) -> std::result::Result<Self, LoadError> {
        reader.rewind()?;

        let header = BsaHeader::read(&mut reader)?;
        log::debug!(
            "BSA header: version=0x{:08X}, hash_table_offset=0x{:X}, file_count={}",
            header.version,
            header.hash_table_offset,
            header.file_count
        );

        let offsets = OffsetTable::read(&mut reader, header.file_count)?;

        // The name block between the two tables is skipped
        let target = header.raw_hash_table_position();
        let Some(hash_table_pos) = header.hash_table_position() else {
            return Err(LoadError::seek_failed(
                target,
                "outside the signed 32-bit range of the format",
            ));
        };
        match reader.seek(SeekFrom::Start(hash_table_pos)) {
            Ok(pos) if pos == hash_table_pos => {}
            Ok(pos) => {
                return Err(LoadError::seek_failed(
                    target,
                    format!("landed at 0x{pos:X}"),
                ));
            }
            Err(e) => return Err(LoadError::seek_failed(target, e.to_string())),
        }

        let hashes = HashTable::read(&mut reader, header.file_count)?;

        // Data starts right where the hash table ends
        let data_offset = hash_table_pos + RECORD_SIZE * u64::from(header.file_count);
        log::debug!(
            "Loaded {} entries, hash table at 0x{:X}, data section at 0x{:X}",
            offsets.len(),
            hash_table_pos,
            data_offset
        );

        if options.verify_sorted
            && let Some(index) = hashes.first_unsorted()
        {
            log::warn!("Hash table out of order at entry {index}");
            return Err(LoadError::UnsortedHashTable { index });
        }

        if options.verify_bounds {
            let len = reader.seek(SeekFrom::End(0))?;
            for (index, entry) in offsets.entries().iter().enumerate() {
                let end = data_offset + entry.end();
                if end > len {
                    log::warn!("Entry {index} ends at 0x{end:X}, archive is 0x{len:X} bytes");
                    return Err(LoadError::EntryOutOfBounds { index, end, len });
                }
            }
        }

        Ok(Self {
            path: None,
            reader,
            id: ArchiveId::next(),
            header,
            offsets,
            hashes,
            hash_table_position: hash_table_pos,
            data_offset,
        })
    }

    /// Extract a file into `buf`
    ///
    /// Reads exactly [`size`](Self::size) bytes into the start of `buf`. On
    /// error the contents of `buf` are unspecified; the archive stays usable.
    pub fn extract(
        &mut self,
        handle: FileHandle,
        buf: &mut [u8],
    ) -> std::result::Result<(), ReadError> {
        let entry = *self.resolve(handle)?;
        let offset = self.data_offset + u64::from(entry.offset);
        let needed = entry.size as usize;
        let available = buf.len();

        let dest = buf
            .get_mut(..needed)
            .ok_or(ReadError::BufferTooSmall { needed, available })?;

        log::trace!("Extracting {needed} bytes at 0x{offset:X}");

        self.reader.seek(SeekFrom::Start(offset))?;
        self.reader.read_exact(dest).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => ReadError::EndOfArchive {
                offset,
                size: entry.size,
            },
            _ => ReadError::Io(e),
        })
    }

    /// Look up and read a whole file
    pub fn read_file(&mut self, name: &str) -> Result<Vec<u8>> {
        let handle = self.lookup(name);
        if !handle.exists() {
            return Err(Error::FileNotFound(name.to_string()));
        }

        let mut data = vec![0u8; self.size(handle)? as usize];
        self.extract(handle, &mut data)?;
        Ok(data)
    }

    /// Get a summary of the archive
    pub fn info(&mut self) -> io::Result<ArchiveInfo> {
        let archive_size = self.reader.seek(SeekFrom::End(0))?;

        Ok(ArchiveInfo {
            path: self.path.clone(),
            archive_size,
            file_count: self.header.file_count,
            hash_table_position: self.hash_table_position,
            data_offset: self.data_offset,
        })
    }
}

impl<R> Archive<R> {
    /// Find a file by name
    ///
    /// Case and slash direction are ignored. The returned handle reports
    /// [`exists`](FileHandle::exists) `false` when no entry matches.
    pub fn lookup(&self, name: &str) -> FileHandle {
        self.lookup_bytes(name.as_bytes())
    }

    /// Find a file by its raw name bytes
    ///
    /// For names in the archive's code page that are not valid UTF-8.
    pub fn lookup_bytes(&self, name: &[u8]) -> FileHandle {
        let hash = hash_bytes(name);
        let slot = match self.hashes.find(&hash) {
            Some(index) => Slot::Found(index),
            None => Slot::NotFound,
        };

        log::trace!(
            "Lookup {:?}: hash={:08X}:{:08X} -> {slot:?}",
            String::from_utf8_lossy(name),
            hash.hash1,
            hash.hash2
        );

        FileHandle::new(self.id, slot)
    }

    /// Check whether a file exists
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).exists()
    }

    /// Size of a file in bytes
    pub fn size(&self, handle: FileHandle) -> std::result::Result<u32, HandleError> {
        Ok(self.resolve(handle)?.size)
    }

    /// Absolute position of a file's data within the archive
    pub fn offset(&self, handle: FileHandle) -> std::result::Result<u64, HandleError> {
        Ok(self.data_offset + u64::from(self.resolve(handle)?.offset))
    }

    fn resolve(&self, handle: FileHandle) -> std::result::Result<&OffsetEntry, HandleError> {
        if handle.owner() != self.id {
            return Err(HandleError::ForeignArchive {
                handle_owner: handle.owner(),
                archive: self.id,
            });
        }

        let index = handle.index().ok_or(HandleError::NotFound)?;
        self.offsets.get(index).ok_or(HandleError::OutOfRange {
            index,
            len: self.offsets.len(),
        })
    }

    /// Identity used to match handles to this archive
    pub fn id(&self) -> ArchiveId {
        self.id
    }

    /// Path the archive was opened from
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Archive header
    pub fn header(&self) -> &BsaHeader {
        &self.header
    }

    /// Number of files in the archive
    pub fn file_count(&self) -> usize {
        self.offsets.len()
    }

    /// Absolute position of the data section
    pub fn data_offset(&self) -> u64 {
        self.data_offset
    }

    /// Offset table
    pub fn offset_table(&self) -> &OffsetTable {
        &self.offsets
    }

    /// Hash table
    pub fn hash_table(&self) -> &HashTable {
        &self.hashes
    }
}
