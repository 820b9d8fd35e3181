//! File discovery for ikon projects.
//!
//! This module handles finding all ikon definition files in a project
//! directory, either using convention-based discovery or an `ikon.yaml`
//! manifest.
//!
//! # Example
//!
//! ```ignore
//! use ikon::discovery::discover;
//!
//! let result = discover("./my-project")?;
//! println!("Found {} assets", result.scan.total());
//! ```

mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use manifest::Manifest;
pub use scanner::{detect_asset_kind, scan_directory, scan_sources, AssetKind, ScanResult};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "ikon.yaml";

/// Result of discovering assets in a project.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The project root directory.
    pub root: PathBuf,

    /// The loaded manifest (default if no ikon.yaml found).
    pub manifest: Manifest,

    /// Whether an ikon.yaml manifest was found.
    pub has_manifest: bool,

    /// Scan results with discovered files.
    pub scan: ScanResult,
}

/// Discover assets in a project directory.
///
/// Looks for an `ikon.yaml` manifest in the root directory. If found, scans
/// the manifest's source paths; otherwise scans the whole directory for
/// ikon definition files.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();

    let manifest_path = root.join(MANIFEST_FILENAME);
    let (manifest, has_manifest) = if manifest_path.exists() {
        (Manifest::load(&manifest_path)?, true)
    } else {
        (Manifest::default(), false)
    };

    let sources = manifest.effective_sources();
    let scan = scan_sources(&sources, &root, &manifest);

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        scan,
    })
}
