//! Validation system for ikon assets.
//!
//! Runs a suite of checks against parsed icons and palettes and reports
//! errors and warnings. Used by both `ikon validate` and `ikon build`.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::output::Printer;
use crate::types::{Icon, Palette};

/// Run all icon checks against a palette.
pub fn validate_icons(icons: &[Icon], palette: &Palette) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_duplicate_names(icons));
    result.merge(checks::check_canvas_sizes(icons));
    result.merge(checks::check_empty_icons(icons));
    result.merge(checks::check_geometry(icons));
    result.merge(checks::check_colour_refs(icons, palette));

    result
}

/// Run palette-level checks.
pub fn validate_palette(palette: &Palette) -> ValidationResult {
    checks::check_palette(palette)
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let label = printer.severity(&d.severity.to_string(), d.severity == Severity::Error);
        eprintln!("  {}[{}]: {}", label, printer.dim(&d.code), d.message);
        if let Some(help) = &d.help {
            eprintln!("    help: {}", help);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColourExpr, Geometry, Icon, PaletteBuilder, Point, ShapeSpec};

    fn palette() -> Palette {
        let mut builder = PaletteBuilder::new("test");
        builder.define("ember", "#E25822").unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_validate_no_icons() {
        let result = validate_icons(&[], &palette());
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_valid_icon() {
        let icon = Icon::new(
            "orb",
            vec![ShapeSpec::new(
                Geometry::Disc {
                    center: Point::new(32.0, 32.0),
                    radius: 16.0,
                },
                ColourExpr::parse("$ember").unwrap(),
            )],
        )
        .with_size(64);

        let result = validate_icons(&[icon], &palette());
        assert!(!result.has_errors());
    }

    #[test]
    fn test_validate_catches_missing_colour() {
        let icon = Icon::new(
            "orb",
            vec![ShapeSpec::new(
                Geometry::Disc {
                    center: Point::new(32.0, 32.0),
                    radius: 16.0,
                },
                ColourExpr::parse("$missing").unwrap(),
            )],
        )
        .with_size(64);

        let result = validate_icons(&[icon], &palette());
        assert!(result.has_errors());
    }

    #[test]
    fn test_validate_palette_empty() {
        let empty = PaletteBuilder::new("empty").build().unwrap();
        assert!(validate_palette(&empty).has_warnings());
        assert!(validate_palette(&palette()).is_ok());
    }
}
