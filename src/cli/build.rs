//! Build command implementation.
//!
//! Processes icon definition files and outputs PNG textures.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{IkonError, Result};
use crate::output::{display_path, plural, Printer};
use crate::parser::{parse_icon_file, parse_palette_file};
use crate::render::{write_index_json, write_png, IconIndex, IconRenderer};
use crate::types::{Icon, Palette};
use crate::validation::{print_diagnostics, validate_icons};

/// Build icon textures from definition files
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Input .icon.md files to process
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Palette file to resolve colours against (default: builtin palette)
    #[arg(long)]
    pub palette: Option<PathBuf>,

    /// Palette variant to apply
    #[arg(long)]
    pub variant: Option<String>,

    /// Output directory
    #[arg(long, short, default_value = "dist")]
    pub output: PathBuf,

    /// Scale factor for output (integer upscaling)
    #[arg(long, default_value = "1")]
    pub scale: u32,

    /// Write an index.json describing the built icons
    #[arg(long)]
    pub index: bool,

    /// Rebuild whenever an input file changes
    #[arg(long)]
    pub watch: bool,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let palette = load_palette(&args)?;

    if let Some(variant) = &args.variant {
        if !palette.has_variant(variant) {
            printer.warning(
                "Warning",
                &format!(
                    "palette '{}' has no variant '{}'; base colours will be used",
                    palette.name, variant
                ),
            );
        }
    }

    build_all(&args, &palette, printer)?;

    if args.watch {
        watch_loop(&args, printer)?;
    }

    Ok(())
}

/// Run one full build over all input files.
fn build_all(args: &BuildArgs, palette: &Palette, printer: &Printer) -> Result<()> {
    if !args.output.exists() {
        fs::create_dir_all(&args.output).map_err(|e| IkonError::Io {
            path: args.output.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let icons = parse_inputs(&args.files, printer)?;

    let validation = validate_icons(&icons, palette);
    if !validation.is_ok() {
        print_diagnostics(&validation, printer);
    }
    if validation.has_errors() {
        return Err(IkonError::Validation {
            message: format!(
                "{} failed validation",
                plural(validation.error_count(), "icon error", "icon errors")
            ),
            help: Some("Fix the errors above and rebuild".to_string()),
        });
    }

    let renderer = match &args.variant {
        Some(variant) => IconRenderer::new(palette).with_variant(variant),
        None => IconRenderer::new(palette),
    };

    let mut index = IconIndex::new();

    for icon in &icons {
        let scale = effective_scale(args.scale, icon);
        let rendered = renderer.render(icon)?;

        let file_name = format!("{}.png", icon.name);
        let output_path = args.output.join(&file_name);
        write_png(&rendered, &output_path, scale)?;

        printer.status(
            "Rendering",
            &format!(
                "{} ({}x{}{}) -> {}",
                icon.name,
                icon.size,
                icon.size,
                if scale > 1 {
                    format!(" @{}x", scale)
                } else {
                    String::new()
                },
                display_path(&output_path)
            ),
        );

        index.push(&icon.name, file_name, icon.size, scale);
    }

    if args.index {
        let index_path = args.output.join("index.json");
        write_index_json(&index, &index_path)?;
        printer.info("Indexed", &display_path(&index_path));
    }

    printer.success(
        "Finished",
        &format!(
            "{} to {}",
            plural(index.len(), "icon", "icons"),
            display_path(&args.output)
        ),
    );

    Ok(())
}

/// Parse every input file into icons.
fn parse_inputs(files: &[PathBuf], printer: &Printer) -> Result<Vec<Icon>> {
    let mut icons = Vec::new();

    for file in files {
        let is_icon_file = file
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with(".icon.md"))
            .unwrap_or(false);

        if !is_icon_file {
            printer.warning("Skipping", &format!("{} (not an .icon.md file)", file.display()));
            continue;
        }

        let source = fs::read_to_string(file).map_err(|e| IkonError::Io {
            path: file.clone(),
            message: format!("Failed to read file: {}", e),
        })?;

        icons.extend(parse_icon_file(&source)?);
    }

    Ok(icons)
}

/// CLI scale takes precedence over frontmatter scale.
fn effective_scale(cli_scale: u32, icon: &Icon) -> u32 {
    if cli_scale > 1 {
        cli_scale
    } else {
        icon.scale.unwrap_or(1)
    }
}

/// Load the palette from --palette, or fall back to the builtin default.
fn load_palette(args: &BuildArgs) -> Result<Palette> {
    let Some(path) = &args.palette else {
        return Ok(Palette::default_palette());
    };

    let source = fs::read_to_string(path).map_err(|e| IkonError::Io {
        path: path.clone(),
        message: format!("Failed to read palette file: {}", e),
    })?;

    let builder = parse_palette_file(&source)?
        .into_iter()
        .next()
        .ok_or_else(|| IkonError::Parse {
            message: format!("No palettes found in {}", path.display()),
            help: None,
        })?;

    builder.build()
}

/// Block on file change notifications, rebuilding after each relevant event.
///
/// The palette is reloaded per rebuild so palette edits are picked up too.
fn watch_loop(args: &BuildArgs, printer: &Printer) -> Result<()> {
    use notify::{RecursiveMode, Watcher};

    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).map_err(|e| IkonError::Build {
        message: format!("Failed to start file watcher: {}", e),
        help: None,
    })?;

    // Watch each input's parent directory; editors often replace files
    // rather than writing in place.
    let roots: BTreeSet<PathBuf> = args
        .files
        .iter()
        .chain(args.palette.iter())
        .filter_map(|f| f.parent())
        .map(|p| {
            if p.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                p.to_path_buf()
            }
        })
        .collect();

    for root in &roots {
        watcher
            .watch(root, RecursiveMode::NonRecursive)
            .map_err(|e| IkonError::Build {
                message: format!("Failed to watch {}: {}", root.display(), e),
                help: None,
            })?;
    }

    printer.info(
        "Watching",
        &format!("{} for changes (ctrl-c to stop)", plural(roots.len(), "directory", "directories")),
    );

    for event in rx {
        match event {
            Ok(event) if is_relevant(&event) => {
                let rebuild = load_palette(args).and_then(|palette| build_all(args, &palette, printer));
                if let Err(e) = rebuild {
                    printer.error("Error", &e.to_string());
                }
            }
            Ok(_) => {}
            Err(e) => printer.error("Error", &format!("watch error: {}", e)),
        }
    }

    Ok(())
}

/// Only data changes to markdown files trigger a rebuild.
fn is_relevant(event: &notify::Event) -> bool {
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return false;
    }

    event
        .paths
        .iter()
        .any(|p| p.extension().and_then(|e| e.to_str()) == Some("md"))
}
