//! Validate command implementation.
//!
//! Parses and validates definition files without rendering anything.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{IkonError, Result};
use crate::output::{plural, Printer};
use crate::parser::{parse_icon_file, parse_palette_file};
use crate::types::{Icon, Palette};
use crate::validation::{print_diagnostics, validate_icons, validate_palette, ValidationResult};

/// Validate definition files without rendering
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Files to validate (.icon.md and .palette.md)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Palette file to resolve colour references against
    #[arg(long)]
    pub palette: Option<PathBuf>,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let mut icons: Vec<Icon> = Vec::new();
    let mut palettes: Vec<Palette> = Vec::new();

    for file in &args.files {
        let name = file.file_name().and_then(|n| n.to_str()).unwrap_or("");
        let source = fs::read_to_string(file).map_err(|e| IkonError::Io {
            path: file.clone(),
            message: format!("Failed to read file: {}", e),
        })?;

        if name.ends_with(".icon.md") {
            icons.extend(parse_icon_file(&source)?);
        } else if name.ends_with(".palette.md") {
            for builder in parse_palette_file(&source)? {
                palettes.push(builder.build()?);
            }
        } else {
            printer.warning("Skipping", &format!("{} (unknown file type)", file.display()));
        }
    }

    // Colour references resolve against --palette, the first validated
    // palette, or the builtin default, in that order.
    let reference_palette = match &args.palette {
        Some(path) => {
            let source = fs::read_to_string(path).map_err(|e| IkonError::Io {
                path: path.clone(),
                message: format!("Failed to read palette file: {}", e),
            })?;
            let builder =
                parse_palette_file(&source)?
                    .into_iter()
                    .next()
                    .ok_or_else(|| IkonError::Parse {
                        message: format!("No palettes found in {}", path.display()),
                        help: None,
                    })?;
            builder.build()?
        }
        None => palettes
            .first()
            .cloned()
            .unwrap_or_else(Palette::default_palette),
    };

    let mut result = ValidationResult::new();
    result.merge(validate_icons(&icons, &reference_palette));
    for palette in &palettes {
        result.merge(validate_palette(palette));
    }

    print_diagnostics(&result, printer);

    let checked = plural(icons.len(), "icon", "icons");
    if result.has_errors() {
        Err(IkonError::Validation {
            message: format!(
                "{} error(s), {} warning(s) in {}",
                result.error_count(),
                result.warning_count(),
                checked
            ),
            help: None,
        })
    } else if result.has_warnings() {
        printer.warning(
            "Finished",
            &format!("{} with {} warning(s)", checked, result.warning_count()),
        );
        Ok(())
    } else {
        printer.success("Finished", &format!("{} valid", checked));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_ok() {
        let dir = tempdir().unwrap();
        let icon_path = dir.path().join("orb.icon.md");

        fs::write(
            &icon_path,
            "---\nname: orb\nsize: 16\n---\n\n```icon\n- disc: { center: [8, 8], radius: 6 }\n  fill: $black\n```\n",
        )
        .unwrap();

        let args = ValidateArgs {
            files: vec![icon_path],
            palette: None,
        };

        run(args, &Printer::new()).unwrap();
    }

    #[test]
    fn test_validate_reports_unknown_colour() {
        let dir = tempdir().unwrap();
        let icon_path = dir.path().join("orb.icon.md");

        fs::write(
            &icon_path,
            "---\nname: orb\nsize: 16\n---\n\n```icon\n- disc: { center: [8, 8], radius: 6 }\n  fill: $mystery\n```\n",
        )
        .unwrap();

        let args = ValidateArgs {
            files: vec![icon_path],
            palette: None,
        };

        assert!(run(args, &Printer::new()).is_err());
    }

    #[test]
    fn test_validate_icon_against_palette_file() {
        let dir = tempdir().unwrap();
        let icon_path = dir.path().join("orb.icon.md");
        let palette_path = dir.path().join("game.palette.md");

        fs::write(&palette_path, "---\nname: game\n---\n$ember: #E25822\n").unwrap();
        fs::write(
            &icon_path,
            "---\nname: orb\nsize: 16\n---\n\n```icon\n- disc: { center: [8, 8], radius: 6 }\n  fill: $ember\n```\n",
        )
        .unwrap();

        // Palette passed as a validated file: its colours are in scope.
        let args = ValidateArgs {
            files: vec![palette_path, icon_path],
            palette: None,
        };

        run(args, &Printer::new()).unwrap();
    }

    #[test]
    fn test_validate_parse_error_propagates() {
        let dir = tempdir().unwrap();
        let icon_path = dir.path().join("broken.icon.md");

        fs::write(&icon_path, "---\nname: broken\n---\n").unwrap();

        let args = ValidateArgs {
            files: vec![icon_path],
            palette: None,
        };

        assert!(run(args, &Printer::new()).is_err());
    }
}
