//! Path utilities for BSA archives
//!
//! BSA archives identify files by the hash of a lower-case path that uses
//! backslashes (`\`) as separators. Lookups accept either separator and any
//! case; this module exposes the normalization used before hashing and the
//! conversion used when writing extracted files to disk.
//!
//! # Examples
//!
//! ```
//! use tes3_bsa::path::normalize_bsa_path;
//!
//! assert_eq!(
//!     normalize_bsa_path("Meshes/I/Act_Sotha_PowerTubes.NIF"),
//!     "meshes\\i\\act_sotha_powertubes.nif"
//! );
//! ```

/// Normalize a path the way the archive hash expects it
///
/// Converts ASCII letters to lower case and forward slashes to backslashes.
///
/// # Examples
///
/// ```
/// use tes3_bsa::path::normalize_bsa_path;
///
/// assert_eq!(normalize_bsa_path("dir/file.txt"), "dir\\file.txt");
/// assert_eq!(normalize_bsa_path("DIR\\File.TXT"), "dir\\file.txt");
/// ```
pub fn normalize_bsa_path(path: &str) -> String {
    path.chars()
        .map(|c| match c {
            '/' => '\\',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Convert a BSA path to a system path
///
/// On Windows, this is a no-op since Windows uses backslashes.
/// On Unix-like systems, this converts backslashes to forward slashes.
///
/// # Examples
///
/// ```
/// use tes3_bsa::path::bsa_path_to_system;
///
/// #[cfg(unix)]
/// assert_eq!(bsa_path_to_system("meshes\\i\\a.nif"), "meshes/i/a.nif");
///
/// #[cfg(windows)]
/// assert_eq!(bsa_path_to_system("meshes\\i\\a.nif"), "meshes\\i\\a.nif");
/// ```
pub fn bsa_path_to_system(path: &str) -> String {
    #[cfg(unix)]
    {
        path.replace('\\', "/")
    }

    #[cfg(windows)]
    {
        path.to_string()
    }
}
