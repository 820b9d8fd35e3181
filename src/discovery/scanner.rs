//! File system scanner for discovering ikon assets.
//!
//! Recursively scans directories to find all ikon definition files
//! (`.icon.md`, `.palette.md`).

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::manifest::Manifest;

/// The kinds of asset files ikon understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Icon,
    Palette,
}

/// Result of scanning a directory for assets.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Discovered icon files.
    pub icons: Vec<PathBuf>,
    /// Discovered palette files.
    pub palettes: Vec<PathBuf>,
}

impl ScanResult {
    /// Create a new empty scan result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of discovered files.
    pub fn total(&self) -> usize {
        self.icons.len() + self.palettes.len()
    }

    /// Check if no files were discovered.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// All discovered files, icons first.
    pub fn all_files(&self) -> impl Iterator<Item = &PathBuf> {
        self.icons.iter().chain(self.palettes.iter())
    }

    /// Merge another scan result into this one.
    pub fn merge(&mut self, other: ScanResult) {
        self.icons.extend(other.icons);
        self.palettes.extend(other.palettes);
    }
}

/// Scan a directory for ikon asset files.
///
/// Recursively walks the directory and categorizes files by their
/// double extension (`.icon.md`, `.palette.md`). Paths matched by the
/// manifest's exclude patterns are skipped.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.exists() {
        return result;
    }

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if path.is_dir() || manifest.is_excluded(path) {
            continue;
        }

        match detect_asset_kind(path) {
            Some(AssetKind::Icon) => result.icons.push(path.to_path_buf()),
            Some(AssetKind::Palette) => result.palettes.push(path.to_path_buf()),
            None => {}
        }
    }

    // Deterministic ordering regardless of filesystem iteration order.
    result.icons.sort();
    result.palettes.sort();

    result
}

/// Scan multiple source paths relative to a base directory.
pub fn scan_sources(sources: &[String], base_path: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    for source in sources {
        let source_path = if Path::new(source).is_absolute() {
            PathBuf::from(source)
        } else {
            base_path.join(source)
        };

        result.merge(scan_directory(&source_path, manifest));
    }

    result
}

/// Detect the asset kind from a file path's double extension.
pub fn detect_asset_kind(path: &Path) -> Option<AssetKind> {
    let filename = path.file_name()?.to_str()?;

    if filename.ends_with(".icon.md") {
        Some(AssetKind::Icon)
    } else if filename.ends_with(".palette.md") {
        Some(AssetKind::Palette)
    } else {
        None
    }
}
