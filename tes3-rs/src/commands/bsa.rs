//! BSA archive command implementations

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use std::fs;
use std::path::{Path, PathBuf};
use tes3_bsa::path::{bsa_path_to_system, normalize_bsa_path};
use tes3_bsa::{Archive, OpenOptions, hash_string};

use crate::utils::{
    add_table_row, create_progress_bar, create_table, format_bytes, format_hash, format_offset,
};

#[derive(Subcommand)]
pub enum BsaCommands {
    /// Show information about a BSA archive
    Info {
        /// Path to the BSA archive
        #[arg(env = "TES3_BSA_ARCHIVE")]
        archive: String,

        /// Check hash table order and entry bounds while opening
        #[arg(long)]
        verify: bool,
    },

    /// Look up files and show their size and position
    Lookup {
        /// Path to the BSA archive
        archive: String,

        /// File names to look up (case and slash direction are ignored)
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// Extract files from a BSA archive
    Extract {
        /// Path to the BSA archive
        archive: String,

        /// File names to extract
        #[arg(required = true)]
        files: Vec<String>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: String,

        /// Preserve directory structure
        #[arg(short, long)]
        preserve_paths: bool,

        /// Check hash table order and entry bounds while opening
        #[arg(long)]
        verify: bool,
    },

    /// Show the name hash the archive uses for a file name
    Hash {
        /// File names to hash
        #[arg(required = true)]
        names: Vec<String>,
    },
}

pub fn execute(command: BsaCommands, quiet: bool) -> Result<()> {
    match command {
        BsaCommands::Info { archive, verify } => show_info(&archive, verify),
        BsaCommands::Lookup { archive, files } => lookup_files(&archive, &files),
        BsaCommands::Extract {
            archive,
            files,
            output,
            preserve_paths,
            verify,
        } => extract_files(&archive, &files, &output, preserve_paths, verify, quiet),
        BsaCommands::Hash { names } => {
            show_hashes(&names);
            Ok(())
        }
    }
}

fn open_archive(path: &str, verify: bool) -> Result<Archive> {
    OpenOptions::new()
        .verify_sorted(verify)
        .verify_bounds(verify)
        .open(path)
        .with_context(|| format!("Failed to open archive {path}"))
}

fn show_info(path: &str, verify: bool) -> Result<()> {
    let mut archive = open_archive(path, verify)?;
    let info = archive.info().context("Failed to read archive size")?;
    let header = archive.header();

    println!("BSA Archive Information");
    println!("=======================");
    println!("Path: {path}");
    println!("Version: 0x{:08X}", header.version);
    println!("Archive size: {}", format_bytes(info.archive_size));
    println!("Number of files: {}", info.file_count);
    println!("Hash table: {}", format_offset(info.hash_table_position));
    println!("Data section: {}", format_offset(info.data_offset));
    if verify {
        println!("Verification: passed");
    }

    Ok(())
}

fn lookup_files(path: &str, files: &[String]) -> Result<()> {
    let archive = open_archive(path, false)?;
    let mut table = create_table(vec!["Name", "Found", "Size", "Offset"]);

    for name in files {
        let handle = archive.lookup(name);
        let row = if handle.exists() {
            let size = archive.size(handle)?;
            let offset = archive.offset(handle)?;
            vec![
                name.clone(),
                "yes".to_string(),
                size.to_string(),
                format_offset(offset),
            ]
        } else {
            log::info!("{name} not found in {path}");
            vec![name.clone(), "no".to_string(), "-".into(), "-".into()]
        };
        add_table_row(&mut table, row);
    }

    table.printstd();
    Ok(())
}

fn output_path(output_dir: &Path, name: &str, preserve_paths: bool) -> PathBuf {
    let system = bsa_path_to_system(name);
    let relative = Path::new(&system);

    if preserve_paths {
        output_dir.join(relative)
    } else {
        output_dir.join(relative.file_name().unwrap_or(relative.as_os_str()))
    }
}

fn extract_files(
    path: &str,
    files: &[String],
    output_dir: &str,
    preserve_paths: bool,
    verify: bool,
    quiet: bool,
) -> Result<()> {
    let mut archive = open_archive(path, verify)?;
    let output_dir = Path::new(output_dir);
    let pb = create_progress_bar(files.len() as u64, "Extracting files", quiet);

    let mut missing = 0usize;
    let mut buf = Vec::new();

    for name in files {
        pb.set_message(format!("Extracting: {name}"));

        let handle = archive.lookup(name);
        if !handle.exists() {
            log::warn!("{name} not found in {path}");
            missing += 1;
            pb.inc(1);
            continue;
        }

        let size = archive.size(handle)? as usize;
        buf.resize(size, 0);
        archive
            .extract(handle, &mut buf)
            .with_context(|| format!("Failed to extract {name}"))?;

        let target = output_path(output_dir, &normalize_bsa_path(name), preserve_paths);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&target, &buf).with_context(|| format!("Failed to write {}", target.display()))?;
        log::info!("Extracted {name} ({}) to {}", format_bytes(size as u64), target.display());

        pb.inc(1);
    }

    pb.finish_with_message("Extraction complete");

    if missing > 0 {
        bail!("{missing} of {} files not found in {path}", files.len());
    }
    Ok(())
}

fn show_hashes(names: &[String]) {
    for name in names {
        let hash = hash_string(name);
        println!("{}  {}", format_hash(&hash), normalize_bsa_path(name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        let out = Path::new("out");

        assert_eq!(
            output_path(out, "meshes\\i\\a.nif", false),
            Path::new("out").join("a.nif")
        );

        #[cfg(unix)]
        assert_eq!(
            output_path(out, "meshes\\i\\a.nif", true),
            Path::new("out/meshes/i/a.nif")
        );
    }
}
