//! Common test utilities and fixtures

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tes3_bsa::{HashEntry, hash_string};

/// Create a temporary directory for tests
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Generate test data of a specific size
pub fn generate_test_data(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

/// A file to place in a fixture archive
#[derive(Debug, Clone)]
pub struct TestFile {
    /// Name as stored in the name block
    pub name: String,
    /// File content
    pub data: Vec<u8>,
}

impl TestFile {
    pub fn new(name: &str, data: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            data: data.to_vec(),
        }
    }
}

/// Writes TES3 BSA fixtures with the layout the game uses: header, offset
/// table, name offsets, NUL-terminated names, sorted hashes, data.
#[derive(Debug, Default)]
pub struct TestArchiveBuilder {
    files: Vec<TestFile>,
    version: Option<u32>,
}

impl TestArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(mut self, name: &str, data: &[u8]) -> Self {
        self.files.push(TestFile::new(name, data));
        self
    }

    pub fn add_files(mut self, files: impl IntoIterator<Item = TestFile>) -> Self {
        self.files.extend(files);
        self
    }

    /// Override the version word
    pub fn version(mut self, version: u32) -> Self {
        self.version = Some(version);
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut files: Vec<(HashEntry, &TestFile)> = self
            .files
            .iter()
            .map(|f| (hash_string(&f.name), f))
            .collect();
        files.sort_by_key(|(hash, _)| *hash);

        let count = files.len() as u32;
        let mut names = Vec::new();
        let mut name_offsets = Vec::new();
        for (_, file) in &files {
            name_offsets.push(names.len() as u32);
            names.extend_from_slice(file.name.to_lowercase().as_bytes());
            names.push(0);
        }
        let hash_table_offset = count * 8 + count * 4 + names.len() as u32;

        let mut out = Vec::new();
        for word in [self.version.unwrap_or(0x100), hash_table_offset, count] {
            out.extend_from_slice(&word.to_le_bytes());
        }

        let mut relative = 0u32;
        for (_, file) in &files {
            out.extend_from_slice(&(file.data.len() as u32).to_le_bytes());
            out.extend_from_slice(&relative.to_le_bytes());
            relative += file.data.len() as u32;
        }

        for offset in name_offsets {
            out.extend_from_slice(&offset.to_le_bytes());
        }
        out.extend_from_slice(&names);

        for (hash, _) in &files {
            out.extend_from_slice(&hash.hash1.to_le_bytes());
            out.extend_from_slice(&hash.hash2.to_le_bytes());
        }

        for (_, file) in &files {
            out.extend_from_slice(&file.data);
        }
        out
    }

    pub fn build(&self, path: &Path) -> PathBuf {
        fs::write(path, self.to_bytes()).expect("Failed to write test archive");
        path.to_path_buf()
    }
}

/// A small archive with a mesh, a texture and an icon
pub fn sample_files() -> Vec<TestFile> {
    vec![
        TestFile::new("meshes\\i\\act_sotha_powertubes.nif", &generate_test_data(4096)),
        TestFile::new("textures\\amel_summon_spark.dds", b"DDS |synthetic texture"),
        TestFile::new("icons\\m\\tx_sotha_tube.tga", &[0x00, 0x02, 0x00, 0x00]),
        TestFile::new("meshes\\empty.nif", b""),
    ]
}

/// Write the sample archive into `dir`
pub fn create_sample_archive(dir: &TempDir) -> PathBuf {
    TestArchiveBuilder::new()
        .add_files(sample_files())
        .build(&dir.path().join("sample.bsa"))
}
