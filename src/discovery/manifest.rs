//! Project manifest (ikon.yaml) parsing.
//!
//! The manifest defines project configuration including source paths,
//! output settings, and default options.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{IkonError, Result};

/// Project manifest loaded from ikon.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Source directories to scan for assets.
    /// Defaults to the project root if empty.
    #[serde(default)]
    pub sources: Vec<String>,

    /// Output directory for rendered icons.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Default palette file path.
    #[serde(default)]
    pub palette: Option<String>,

    /// Default palette variant.
    #[serde(default)]
    pub variant: Option<String>,

    /// Default scale factor for output.
    #[serde(default)]
    pub scale: Option<u32>,

    /// Patterns to exclude from discovery.
    #[serde(default)]
    pub excludes: Vec<String>,
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            sources: vec![],
            output: default_output(),
            palette: None,
            variant: None,
            scale: None,
            excludes: vec![],
        }
    }
}

impl Manifest {
    /// Load manifest from an ikon.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| IkonError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| IkonError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check ikon.yaml syntax".to_string()),
        })
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        self.excludes
            .iter()
            .any(|pattern| matches_pattern(&path_str, pattern))
    }

    /// Get effective source paths, defaulting to the project root.
    pub fn effective_sources(&self) -> Vec<String> {
        if self.sources.is_empty() {
            vec![".".to_string()]
        } else {
            self.sources.clone()
        }
    }

    /// Get the effective scale factor.
    pub fn effective_scale(&self) -> u32 {
        self.scale.unwrap_or(1)
    }
}

/// Simple glob-style pattern matching.
///
/// Supports the common shapes: `*.ext`, `dir/*`, `**/dir/*`, and bare
/// substring patterns.
fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix("**/") {
        if let Some(dir) = suffix.strip_suffix("/*") {
            return path.contains(&format!("{}/", dir)) || path.starts_with(&format!("{}/", dir));
        }
        return path.contains(suffix) || path.ends_with(suffix);
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        if !pattern.contains('/') {
            return path.ends_with(suffix);
        }
    }

    if let Some(prefix) = pattern.strip_suffix("/*") {
        return path.starts_with(&format!("{}/", prefix))
            || path.contains(&format!("/{}/", prefix));
    }

    path.contains(pattern)
}
