//! Tests against the Tribunal.bsa shipped with Morrowind
//!
//! Point `TES3_DATA` at a directory containing `Tribunal.bsa` (usually the
//! game's `Data Files`) or copy the archive to `tests/data/`. The extraction
//! test additionally needs an independently extracted
//! `act_sotha_powertubes.nif` next to it.
//!
//! These tests are ignored by default; run them with
//! `cargo test --test tribunal -- --ignored`.

use std::fs;
use std::path::PathBuf;
use tes3_bsa::Archive;

const POWERTUBES: &str = "meshes/i/act_sotha_powertubes.nif";
const SUMMON_SPARK: &str = "textures/amel_summon_spark.dds";

fn data_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(dir) = std::env::var("TES3_DATA") {
        dirs.push(PathBuf::from(dir));
    }
    dirs.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data"));
    dirs
}

fn find_data_file(name: &str) -> Option<PathBuf> {
    data_dirs()
        .into_iter()
        .map(|dir| dir.join(name))
        .find(|path| path.is_file())
}

fn open_tribunal() -> Option<Archive> {
    let _ = env_logger::builder().is_test(true).try_init();

    let Some(path) = find_data_file("Tribunal.bsa") else {
        log::warn!("Tribunal.bsa not found, set TES3_DATA");
        eprintln!("Skipping test: Tribunal.bsa not found (set TES3_DATA)");
        return None;
    };
    Some(Archive::open(path).expect("Failed to open Tribunal.bsa"))
}

#[test]
#[ignore = "Requires Tribunal.bsa from Morrowind (set TES3_DATA)"]
fn test_tribunal_lookup() {
    let Some(archive) = open_tribunal() else {
        return;
    };

    assert!(archive.lookup(POWERTUBES).exists());
    assert!(archive.lookup("meshes/i/act_sotha_poWertubeS.nif").exists());
    assert!(archive.lookup("meshes\\i\\act_sotha_powertubes.nif").exists());
    assert!(!archive.lookup("textures/THIS_IS_NOT_A_TEXTUEEEEE").exists());
}

#[test]
#[ignore = "Requires Tribunal.bsa from Morrowind (set TES3_DATA)"]
fn test_tribunal_sizes() {
    let Some(archive) = open_tribunal() else {
        return;
    };

    let handle = archive.lookup(POWERTUBES);
    assert_eq!(archive.size(handle), Ok(86473));

    let handle = archive.lookup(SUMMON_SPARK);
    assert_eq!(archive.size(handle), Ok(4224));
}

#[test]
#[ignore = "Requires Tribunal.bsa from Morrowind (set TES3_DATA)"]
fn test_tribunal_offsets() {
    let Some(archive) = open_tribunal() else {
        return;
    };

    let handle = archive.lookup(POWERTUBES);
    assert_eq!(archive.offset(handle), Ok(4_349_620));

    let handle = archive.lookup(SUMMON_SPARK);
    assert_eq!(archive.offset(handle), Ok(44_175_464));
}

#[test]
#[ignore = "Requires Tribunal.bsa from Morrowind (set TES3_DATA)"]
fn test_tribunal_extract_powertubes() {
    let Some(mut archive) = open_tribunal() else {
        return;
    };
    let Some(reference) = find_data_file("act_sotha_powertubes.nif") else {
        log::warn!("act_sotha_powertubes.nif reference not found");
        eprintln!("Skipping test: act_sotha_powertubes.nif reference not found");
        return;
    };

    let expected = fs::read(reference).unwrap();
    let handle = archive.lookup(POWERTUBES);
    assert_eq!(archive.size(handle).unwrap() as usize, expected.len());

    let mut data = vec![0u8; expected.len()];
    archive.extract(handle, &mut data).unwrap();
    assert!(data == expected, "extracted bytes differ from reference");

    // A second extraction yields the same bytes
    let again = archive.read_file(POWERTUBES).unwrap();
    assert!(again == expected);
}
