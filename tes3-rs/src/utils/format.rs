//! Formatting utilities

use humansize::{DECIMAL, format_size};
use tes3_bsa::HashEntry;

/// Format file size in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// Format an archive position as hex
pub fn format_offset(offset: u64) -> String {
    format!("0x{offset:08X}")
}

/// Format both words of a name hash
pub fn format_hash(hash: &HashEntry) -> String {
    format!("{:08X}:{:08X}", hash.hash1, hash.hash2)
}
