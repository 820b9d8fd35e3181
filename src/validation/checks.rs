//! Validation checks for icons and palettes.
//!
//! Each check takes the parsed assets and returns a `ValidationResult`.

use std::collections::HashSet;

use crate::types::{ExprEvaluator, Geometry, Icon, Palette, Point};

use super::warning::{Diagnostic, ValidationResult};

/// Canvas sizes above this trigger a size warning.
const SIZE_WARN_LIMIT: u32 = 1024;

/// Canvas sizes above this are rejected.
const SIZE_ERROR_LIMIT: u32 = 4096;

/// Check for duplicate icon names across all parsed icons.
pub fn check_duplicate_names(icons: &[Icon]) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen = HashSet::new();

    for icon in icons {
        if !seen.insert(icon.name.as_str()) {
            result.push(
                Diagnostic::error(
                    "ikon::validate::duplicate-name",
                    format!("Icon '{}' is defined more than once", icon.name),
                )
                .with_help("Icon names become output file names and must be unique"),
            );
        }
    }

    result
}

/// Check canvas size bounds.
pub fn check_canvas_sizes(icons: &[Icon]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for icon in icons {
        if icon.size > SIZE_ERROR_LIMIT {
            result.push(
                Diagnostic::error(
                    "ikon::validate::canvas-size",
                    format!(
                        "Icon '{}' has canvas size {} (maximum is {})",
                        icon.name, icon.size, SIZE_ERROR_LIMIT
                    ),
                )
                .with_help("Render at a smaller size and use scale for large outputs"),
            );
        } else if icon.size > SIZE_WARN_LIMIT {
            result.push(Diagnostic::warning(
                "ikon::validate::canvas-size",
                format!(
                    "Icon '{}' has a large canvas ({}); rendering is per-pixel and will be slow",
                    icon.name, icon.size
                ),
            ));
        }
    }

    result
}

/// Check for icons with no shapes.
pub fn check_empty_icons(icons: &[Icon]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for icon in icons {
        if icon.is_empty() {
            result.push(
                Diagnostic::warning(
                    "ikon::validate::empty-icon",
                    format!("Icon '{}' has no shapes and renders fully transparent", icon.name),
                )
                .with_help("Add at least one shape to the ```icon block"),
            );
        }
    }

    result
}

/// Check shape geometry for degenerate or out-of-canvas parameters.
pub fn check_geometry(icons: &[Icon]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for icon in icons {
        for (i, shape) in icon.shapes.iter().enumerate() {
            let label = format!("Icon '{}', shape {} ({})", icon.name, i + 1, shape.geometry.kind());

            check_shape_geometry(&mut result, &label, &shape.geometry);

            let center = shape.geometry.center();
            let size = icon.size as f32;
            if center.x < 0.0 || center.y < 0.0 || center.x > size || center.y > size {
                result.push(Diagnostic::warning(
                    "ikon::validate::off-canvas",
                    format!(
                        "{}: center ({}, {}) lies outside the {}x{} canvas",
                        label, center.x, center.y, icon.size, icon.size
                    ),
                ));
            }

            if shape.falloff.softness <= 0.0 {
                result.push(
                    Diagnostic::warning(
                        "ikon::validate::falloff",
                        format!("{}: falloff softness must be positive", label),
                    )
                    .with_help("Softness is the edge ramp width in pixels; 1.0 is a good default"),
                );
            }
            if shape.falloff.power <= 0.0 {
                result.push(Diagnostic::warning(
                    "ikon::validate::falloff",
                    format!("{}: falloff power must be positive", label),
                ));
            }
        }
    }

    result
}

fn check_shape_geometry(result: &mut ValidationResult, label: &str, geometry: &Geometry) {
    let mut require_positive = |value: f32, field: &str| {
        if value <= 0.0 {
            result.push(Diagnostic::warning(
                "ikon::validate::degenerate-shape",
                format!("{}: '{}' must be positive (got {})", label, field, value),
            ));
        }
    };

    match geometry {
        Geometry::Disc { radius, .. } => require_positive(*radius, "radius"),
        Geometry::Segment { from, to, width } => {
            require_positive(*width, "width");
            if segment_is_degenerate(*from, *to) {
                result.push(Diagnostic::warning(
                    "ikon::validate::degenerate-shape",
                    format!("{}: zero-length segment renders as a dot", label),
                ));
            }
        }
        Geometry::Ellipse { rx, ry, .. } => {
            require_positive(*rx, "rx");
            require_positive(*ry, "ry");
        }
        Geometry::Ring { radius, width, .. } => {
            require_positive(*radius, "radius");
            require_positive(*width, "width");
        }
        Geometry::Arc {
            radius,
            width,
            sweep,
            ..
        } => {
            require_positive(*radius, "radius");
            require_positive(*width, "width");
            if *sweep <= 0.0 || *sweep > 360.0 {
                result.push(
                    Diagnostic::warning(
                        "ikon::validate::arc-sweep",
                        format!("{}: sweep must be in (0, 360] degrees (got {})", label, sweep),
                    )
                    .with_help("Use sweep: 360 for a full ring"),
                );
            }
        }
    }
}

fn segment_is_degenerate(from: Point, to: Point) -> bool {
    from.distance(to) == 0.0
}

/// Check that every colour expression resolves against the palette.
pub fn check_colour_refs(icons: &[Icon], palette: &Palette) -> ValidationResult {
    let mut result = ValidationResult::new();
    let eval = ExprEvaluator::new(|name: &str| palette.get(name));

    for icon in icons {
        for (i, shape) in icon.shapes.iter().enumerate() {
            let exprs = [Some(&shape.fill), shape.edge.as_ref()];
            for expr in exprs.into_iter().flatten() {
                if let Err(e) = eval.eval(expr) {
                    result.push(
                        Diagnostic::error(
                            "ikon::validate::colour",
                            format!("Icon '{}', shape {}: {}", icon.name, i + 1, e),
                        )
                        .with_help(format!(
                            "Palette '{}' defines: {}",
                            palette.name,
                            sorted_names(palette)
                        )),
                    );
                }
            }
        }
    }

    result
}

/// Check for an empty palette.
pub fn check_palette(palette: &Palette) -> ValidationResult {
    let mut result = ValidationResult::new();

    if palette.is_empty() {
        result.push(Diagnostic::warning(
            "ikon::validate::empty-palette",
            format!("Palette '{}' defines no colours", palette.name),
        ));
    }

    result
}

fn sorted_names(palette: &Palette) -> String {
    let mut names: Vec<&str> = palette.colour_names().collect();
    names.sort_unstable();
    names.join(", ")
}
