//! JSON index of built icons.
//!
//! The build command can emit an `index.json` next to the rendered PNGs so
//! downstream tooling can locate icons without globbing the output directory.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IkonError, Result};

/// One built icon in the index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexEntry {
    /// Icon name.
    pub name: String,
    /// Output file name relative to the index.
    pub file: String,
    /// Canvas side length before scaling.
    pub size: u32,
    /// Applied integer scale factor.
    pub scale: u32,
}

/// Index of all icons produced by one build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IconIndex {
    pub icons: Vec<IndexEntry>,
}

impl IconIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a built icon.
    pub fn push(&mut self, name: impl Into<String>, file: impl Into<String>, size: u32, scale: u32) {
        self.icons.push(IndexEntry {
            name: name.into(),
            file: file.into(),
            size,
            scale,
        });
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

/// Write an icon index as pretty-printed JSON.
pub fn write_index_json(index: &IconIndex, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(index).map_err(|e| IkonError::Build {
        message: format!("Failed to serialize icon index: {}", e),
        help: None,
    })?;

    std::fs::write(path, json).map_err(|e| IkonError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write index: {}", e),
    })?;

    Ok(())
}
