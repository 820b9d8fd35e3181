//! Palette file parser.
//!
//! Parses `.palette.md` files into `PaletteBuilder` instances.
//!
//! Unlike icon files, palette definitions are not fenced: the colour lines
//! follow directly after the frontmatter.
//!
//! ```text
//! ---
//! name: flame
//! ---
//! $ember: #E25822
//! $glow: lighten($ember, 30%)
//!
//! @night:
//!   $ember: #802A10
//! ```

use crate::error::{IkonError, Result};
use crate::types::PaletteBuilder;

use super::frontmatter::extract_frontmatter;

/// Parse a palette file into one or more palette builders.
///
/// Each document in the file becomes a separate builder; call `build()` on a
/// builder to resolve references and expressions into a `Palette`.
pub fn parse_palette_file(source: &str) -> Result<Vec<PaletteBuilder>> {
    let sections = split_sections(source);

    if sections.is_empty() {
        return Err(IkonError::Parse {
            message: "No palette definitions found".to_string(),
            help: Some("Add a palette with ---\\nname: my-palette\\n---".to_string()),
        });
    }

    sections.iter().map(|s| parse_section(s)).collect()
}

/// Split a multi-palette file on `---` + `name:` boundaries.
fn split_sections(source: &str) -> Vec<String> {
    let lines: Vec<&str> = source.lines().collect();
    let mut sections = Vec::new();
    let mut current_start = 0;
    let mut offset = 0;

    for (i, line) in lines.iter().enumerate() {
        let next_is_name = lines
            .get(i + 1)
            .map(|l| l.trim().starts_with("name:"))
            .unwrap_or(false);

        if line.trim() == "---" && i > 0 && next_is_name {
            let section = &source[current_start..offset];
            if !section.trim().is_empty() {
                sections.push(section.to_string());
            }
            current_start = offset;
        }

        offset += line.len() + 1;
    }

    let last = &source[current_start..];
    if !last.trim().is_empty() {
        sections.push(last.to_string());
    }

    sections
}

/// Parse one palette section into a builder.
fn parse_section(source: &str) -> Result<PaletteBuilder> {
    let frontmatter = extract_frontmatter(source, 0)?;

    let name = frontmatter
        .values
        .get("name")
        .and_then(|v| v.value.as_str())
        .ok_or_else(|| IkonError::Parse {
            message: "Palette missing required 'name' field".to_string(),
            help: Some("Add name: my-palette to frontmatter".to_string()),
        })?;

    let mut builder = PaletteBuilder::new(name);
    parse_colour_lines(&source[frontmatter.content_start..], &mut builder)?;

    Ok(builder)
}

/// Parse the colour definition lines after the frontmatter.
///
/// - `$name: value` defines a base colour
/// - `@variant:` opens a variant block; `$name: value` lines inside it
///   (indented or not, until the next variant header) define overrides
/// - `//` lines are comments
fn parse_colour_lines(content: &str, builder: &mut PaletteBuilder) -> Result<()> {
    let mut current_variant: Option<String> = None;

    for (line_no, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        if let Some(header) = trimmed.strip_prefix('@') {
            let variant = header.strip_suffix(':').unwrap_or(header).trim();
            if variant.is_empty() {
                return Err(IkonError::Parse {
                    message: format!("Empty variant name on line {}", line_no + 1),
                    help: Some("Use @variant-name:".to_string()),
                });
            }
            current_variant = Some(variant.to_string());
            continue;
        }

        if let Some(def) = trimmed.strip_prefix('$') {
            let (name, value) = split_definition(def, line_no)?;
            match &current_variant {
                Some(variant) => builder.define_variant(variant, name, value)?,
                None => builder.define(name, value)?,
            }
            continue;
        }

        return Err(IkonError::Parse {
            message: format!("Unexpected palette line {}: {}", line_no + 1, trimmed),
            help: Some("Expected $name: value or @variant:".to_string()),
        });
    }

    Ok(())
}

/// Split a `name: value` definition line.
fn split_definition(def: &str, line_no: usize) -> Result<(&str, &str)> {
    let colon = def.find(':').ok_or_else(|| IkonError::Parse {
        message: format!("Missing ':' in colour definition on line {}", line_no + 1),
        help: Some("Use $name: #RRGGBB".to_string()),
    })?;

    let name = def[..colon].trim();
    let value = def[colon + 1..].trim();

    if name.is_empty() || value.is_empty() {
        return Err(IkonError::Parse {
            message: format!("Incomplete colour definition on line {}", line_no + 1),
            help: Some("Use $name: #RRGGBB".to_string()),
        });
    }

    Ok((name, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;

    #[test]
    fn test_parse_simple_palette() {
        let source = "---\nname: flame\n---\n$ember: #E25822\n$ash: #888888\n";

        let builders = parse_palette_file(source).unwrap();
        assert_eq!(builders.len(), 1);

        let palette = builders.into_iter().next().unwrap().build().unwrap();
        assert_eq!(palette.name, "flame");
        assert_eq!(palette.get("ember"), Some(Colour::rgb(0xE2, 0x58, 0x22)));
    }

    #[test]
    fn test_parse_palette_with_expressions() {
        let source =
            "---\nname: flame\n---\n$ember: #E25822\n$glow: lighten($ember, 30%)\n";

        let palette = parse_palette_file(source)
            .unwrap()
            .remove(0)
            .build()
            .unwrap();

        assert!(palette.get("glow").is_some());
        assert_ne!(palette.get("glow"), palette.get("ember"));
    }

    #[test]
    fn test_parse_palette_with_variant() {
        let source = "---\nname: flame\n---\n$ember: #E25822\n\n@night:\n  $ember: #802A10\n";

        let palette = parse_palette_file(source)
            .unwrap()
            .remove(0)
            .build()
            .unwrap();

        assert!(palette.has_variant("night"));
        assert_eq!(
            palette.get_with_variant("ember", "night"),
            Some(Colour::rgb(0x80, 0x2A, 0x10))
        );
    }

    #[test]
    fn test_parse_palette_with_comments() {
        let source = "---\nname: flame\n---\n// the base colour\n$ember: #E25822\n";

        let builders = parse_palette_file(source).unwrap();
        assert_eq!(builders[0].len(), 1);
    }

    #[test]
    fn test_parse_multiple_palettes() {
        let source = "---\nname: one\n---\n$a: #111111\n\n---\nname: two\n---\n$b: #222222\n";

        let builders = parse_palette_file(source).unwrap();
        assert_eq!(builders.len(), 2);
        assert_eq!(builders[0].name(), "one");
        assert_eq!(builders[1].name(), "two");
    }

    #[test]
    fn test_parse_palette_bad_line() {
        let source = "---\nname: broken\n---\nnot a definition\n";
        assert!(parse_palette_file(source).is_err());
    }

    #[test]
    fn test_parse_palette_missing_value() {
        let source = "---\nname: broken\n---\n$ember:\n";
        assert!(parse_palette_file(source).is_err());
    }

    #[test]
    fn test_parse_palette_empty_file() {
        assert!(parse_palette_file("").is_err());
    }
}
