//! File name hashing for TES3 BSA archives
//!
//! The archive stores no searchable names. Each file is keyed by a 64-bit
//! fingerprint of its normalized path split into two words: `hash1` mixes the
//! first half of the path, `hash2` mixes the second half with a data-dependent
//! rotation. Lookups must reproduce this bit for bit.
//!
//! Bytes are sign-extended before mixing, so `0xE9` contributes
//! `0xFFFF_FFE9`. Archives built by the game's tools hash non-ASCII names
//! that way.

use crate::tables::HashEntry;

#[inline]
fn normalize_byte(byte: u8) -> u32 {
    let byte = if byte == b'/' {
        b'\\'
    } else {
        byte.to_ascii_lowercase()
    };
    i32::from(byte as i8) as u32
}

/// Hash a file name the way the archive's hash table was built
///
/// The name is normalized on the fly (ASCII lower case, `/` becomes `\`), so
/// `"Meshes/A.nif"` and `"meshes\\a.nif"` produce the same entry.
///
/// # Examples
///
/// ```
/// use tes3_bsa::hash_string;
///
/// let hash = hash_string("meshes\\i\\act_sotha_powertubes.nif");
/// assert_eq!(hash, hash_string("MESHES/I/ACT_SOTHA_POWERTUBES.NIF"));
/// assert_eq!((hash.hash1, hash.hash2), (0x0123_040B, 0x16CA_84D1));
/// ```
pub fn hash_string(name: &str) -> HashEntry {
    hash_bytes(name.as_bytes())
}

/// Hash a raw file name
///
/// Names in localized archives are stored in the game's code page (usually
/// Windows-1252) and are not valid UTF-8. This takes the bytes as stored.
///
/// ```
/// use tes3_bsa::hash_bytes;
///
/// // "icônes" in Windows-1252
/// let hash = hash_bytes(b"ic\xF4nes");
/// assert_eq!(hash, hash_bytes(b"IC\xF4NES"));
/// ```
pub fn hash_bytes(name: &[u8]) -> HashEntry {
    let (first, second) = name.split_at(name.len() >> 1);

    let mut sum: u32 = 0;
    let mut off: u32 = 0;
    for &byte in first {
        sum ^= normalize_byte(byte) << (off & 0x1F);
        off = off.wrapping_add(8);
    }
    let hash1 = sum;

    sum = 0;
    off = 0;
    for &byte in second {
        let temp = normalize_byte(byte) << (off & 0x1F);
        sum ^= temp;
        sum = sum.rotate_right(temp & 0x1F);
        off = off.wrapping_add(8);
    }
    let hash2 = sum;

    HashEntry { hash1, hash2 }
}
