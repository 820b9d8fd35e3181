//! List command implementation.
//!
//! Discovers project assets and prints an organized inventory.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::discover;
use crate::error::Result;
use crate::output::{display_path, plural, Printer};

/// List discovered project assets
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Project directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let discovery = discover(&args.path)?;

    if discovery.has_manifest {
        printer.info("Manifest", &display_path(&discovery.root.join("ikon.yaml")));
    }

    let groups: &[(&str, &[PathBuf])] = &[
        ("Icons", &discovery.scan.icons),
        ("Palettes", &discovery.scan.palettes),
    ];

    for (label, files) in groups {
        for file in files.iter() {
            printer.info(label, &display_path(file));
        }
    }

    printer.success(
        "Found",
        &format!(
            "{}, {}",
            plural(discovery.scan.icons.len(), "icon file", "icon files"),
            plural(discovery.scan.palettes.len(), "palette file", "palette files")
        ),
    );

    Ok(())
}
