//! Icon file parser.
//!
//! Parses `.icon.md` files into `Icon` instances. The document body is an
//! `icon` code block holding a YAML sequence of shape entries:
//!
//! ````text
//! ---
//! name: fire-orb
//! size: 64
//! ---
//!
//! ```icon
//! - disc: { center: [32, 32], radius: 24 }
//!   fill: $ember
//!   edge: darken($ember, 40%)
//!   falloff: { softness: 2, power: 1.5 }
//! - ring: { center: [32, 32], radius: 28, width: 3 }
//!   fill: "#FFFFFF"
//! ```
//! ````

use serde_yaml::Value;

use crate::error::{IkonError, Result};
use crate::types::{ColourExpr, Falloff, Geometry, Icon, Point, ShapeSpec};

use super::document::parse_documents;
use super::types::RawDocument;

const GEOMETRY_KINDS: &[&str] = &["disc", "segment", "ellipse", "ring", "arc"];

/// Parse an icon file into one or more icons.
pub fn parse_icon_file(source: &str) -> Result<Vec<Icon>> {
    let documents = parse_documents(source)?;

    documents.into_iter().map(parse_icon_document).collect()
}

/// Parse a single icon document.
fn parse_icon_document(doc: RawDocument) -> Result<Icon> {
    let name = doc.name.value.clone();

    let body = doc.body.as_ref().ok_or_else(|| IkonError::Parse {
        message: format!("Icon '{}' has no shape list", name),
        help: Some("Add an ```icon code block with a YAML list of shapes".to_string()),
    })?;

    let shapes = parse_shape_list(&body.value, &name)?;

    let mut icon = Icon::new(name, shapes);
    if let Some(size) = doc.get_frontmatter_u32("size")? {
        icon = icon.with_size(size);
    }
    if let Some(scale) = doc.get_frontmatter_u32("scale")? {
        icon = icon.with_scale(scale);
    }

    Ok(icon)
}

/// Parse the YAML shape sequence from a code block body.
fn parse_shape_list(body: &str, icon_name: &str) -> Result<Vec<ShapeSpec>> {
    let value: Value = serde_yaml::from_str(body).map_err(|e| IkonError::Parse {
        message: format!("Icon '{}': invalid YAML in shape list: {}", icon_name, e),
        help: None,
    })?;

    let entries = match value {
        Value::Sequence(seq) => seq,
        Value::Null => Vec::new(),
        _ => {
            return Err(IkonError::Parse {
                message: format!("Icon '{}': shape list must be a YAML sequence", icon_name),
                help: Some("Start each shape with '- disc:', '- ring:', ...".to_string()),
            });
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            parse_shape_entry(entry).map_err(|e| prefix_error(e, icon_name, i + 1))
        })
        .collect()
}

/// Add icon/shape context to an inner parse error.
fn prefix_error(err: IkonError, icon_name: &str, shape_no: usize) -> IkonError {
    match err {
        IkonError::Parse { message, help } => IkonError::Parse {
            message: format!("Icon '{}', shape {}: {}", icon_name, shape_no, message),
            help,
        },
        other => other,
    }
}

/// Parse one shape entry.
fn parse_shape_entry(entry: Value) -> Result<ShapeSpec> {
    let map = match entry {
        Value::Mapping(map) => map,
        _ => {
            return Err(IkonError::Parse {
                message: "shape entry must be a mapping".to_string(),
                help: Some("Use '- disc: { center: [x, y], radius: r }'".to_string()),
            });
        }
    };

    let mut geometry: Option<Geometry> = None;
    let mut fill: Option<ColourExpr> = None;
    let mut edge: Option<ColourExpr> = None;
    let mut falloff = Falloff::default();

    for (key, value) in map {
        let key = key.as_str().ok_or_else(|| IkonError::Parse {
            message: "shape keys must be strings".to_string(),
            help: None,
        })?;

        match key {
            k if GEOMETRY_KINDS.contains(&k) => {
                if geometry.is_some() {
                    return Err(IkonError::Parse {
                        message: "multiple geometry kinds in one shape entry".to_string(),
                        help: Some("Each list entry defines exactly one shape".to_string()),
                    });
                }
                geometry = Some(parse_geometry(k, value)?);
            }
            "fill" => fill = Some(parse_colour_value(value, "fill")?),
            "edge" => edge = Some(parse_colour_value(value, "edge")?),
            "falloff" => falloff = parse_falloff(value)?,
            other => {
                return Err(IkonError::Parse {
                    message: format!("unknown key '{}'", other),
                    help: Some(
                        "Valid keys: disc, segment, ellipse, ring, arc, fill, edge, falloff"
                            .to_string(),
                    ),
                });
            }
        }
    }

    let geometry = geometry.ok_or_else(|| IkonError::Parse {
        message: "missing geometry".to_string(),
        help: Some("Add one of: disc, segment, ellipse, ring, arc".to_string()),
    })?;

    let fill = fill.ok_or_else(|| IkonError::Parse {
        message: "missing 'fill' colour".to_string(),
        help: Some("Add fill: $name or fill: \"#RRGGBB\"".to_string()),
    })?;

    Ok(ShapeSpec {
        geometry,
        fill,
        edge,
        falloff,
    })
}

/// Parse a geometry mapping for the given kind.
fn parse_geometry(kind: &str, value: Value) -> Result<Geometry> {
    let map = match value {
        Value::Mapping(map) => map,
        _ => {
            return Err(IkonError::Parse {
                message: format!("'{}' must be a mapping of fields", kind),
                help: Some(format!("Use {}: {{ center: [x, y], ... }}", kind)),
            });
        }
    };

    let mut fields = Fields::new(kind, map)?;

    let geometry = match kind {
        "disc" => Geometry::Disc {
            center: fields.point("center")?,
            radius: fields.number("radius")?,
        },
        "segment" => Geometry::Segment {
            from: fields.point("from")?,
            to: fields.point("to")?,
            width: fields.number("width")?,
        },
        "ellipse" => Geometry::Ellipse {
            center: fields.point("center")?,
            rx: fields.number("rx")?,
            ry: fields.number("ry")?,
        },
        "ring" => Geometry::Ring {
            center: fields.point("center")?,
            radius: fields.number("radius")?,
            width: fields.number("width")?,
        },
        "arc" => Geometry::Arc {
            center: fields.point("center")?,
            radius: fields.number("radius")?,
            width: fields.number("width")?,
            start: fields.number("start")?,
            sweep: fields.number("sweep")?,
        },
        _ => unreachable!("kind checked against GEOMETRY_KINDS"),
    };

    fields.finish()?;

    Ok(geometry)
}

/// Typed access to a geometry field mapping with leftover-key detection.
struct Fields<'a> {
    kind: &'a str,
    map: std::collections::HashMap<String, Value>,
}

impl<'a> Fields<'a> {
    fn new(kind: &'a str, map: serde_yaml::Mapping) -> Result<Self> {
        let mut fields = std::collections::HashMap::new();
        for (key, value) in map {
            let key = key.as_str().ok_or_else(|| IkonError::Parse {
                message: format!("'{}' field names must be strings", kind),
                help: None,
            })?;
            fields.insert(key.to_string(), value);
        }
        Ok(Self { kind, map: fields })
    }

    fn number(&mut self, name: &str) -> Result<f32> {
        let value = self.take(name)?;
        as_f32(&value).ok_or_else(|| IkonError::Parse {
            message: format!("'{}.{}' must be a number", self.kind, name),
            help: None,
        })
    }

    fn point(&mut self, name: &str) -> Result<Point> {
        let value = self.take(name)?;
        let seq = value.as_sequence().filter(|s| s.len() == 2).ok_or_else(|| {
            IkonError::Parse {
                message: format!("'{}.{}' must be a two-element [x, y] list", self.kind, name),
                help: None,
            }
        })?;

        let x = as_f32(&seq[0]);
        let y = as_f32(&seq[1]);
        match (x, y) {
            (Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => Err(IkonError::Parse {
                message: format!("'{}.{}' coordinates must be numbers", self.kind, name),
                help: None,
            }),
        }
    }

    fn take(&mut self, name: &str) -> Result<Value> {
        self.map.remove(name).ok_or_else(|| IkonError::Parse {
            message: format!("'{}' is missing required field '{}'", self.kind, name),
            help: None,
        })
    }

    fn finish(self) -> Result<()> {
        if let Some(leftover) = self.map.keys().next() {
            return Err(IkonError::Parse {
                message: format!("'{}' has unknown field '{}'", self.kind, leftover),
                help: None,
            });
        }
        Ok(())
    }
}

/// Parse a fill/edge colour expression value.
fn parse_colour_value(value: Value, key: &str) -> Result<ColourExpr> {
    let s = value.as_str().ok_or_else(|| IkonError::Parse {
        message: format!("'{}' must be a string", key),
        help: Some("Hex colours need quotes in YAML: fill: \"#FF0000\"".to_string()),
    })?;

    ColourExpr::parse(s)
}

/// Parse a falloff value: a bare number is the power, a mapping sets
/// softness and/or power.
fn parse_falloff(value: Value) -> Result<Falloff> {
    if let Some(power) = as_f32(&value) {
        return Ok(Falloff {
            power,
            ..Falloff::default()
        });
    }

    let map = match value {
        Value::Mapping(map) => map,
        _ => {
            return Err(IkonError::Parse {
                message: "'falloff' must be a number or a mapping".to_string(),
                help: Some("Use falloff: 2 or falloff: { softness: 2, power: 1.5 }".to_string()),
            });
        }
    };

    let mut falloff = Falloff::default();
    for (key, value) in map {
        let number = as_f32(&value);
        match (key.as_str(), number) {
            (Some("softness"), Some(n)) => falloff.softness = n,
            (Some("power"), Some(n)) => falloff.power = n,
            (Some(other), _) => {
                return Err(IkonError::Parse {
                    message: format!("unknown falloff field '{}'", other),
                    help: Some("Valid fields: softness, power".to_string()),
                });
            }
            (None, _) => {
                return Err(IkonError::Parse {
                    message: "falloff field names must be strings".to_string(),
                    help: None,
                });
            }
        }
    }

    Ok(falloff)
}

/// Extract an f32 from a YAML number.
fn as_f32(value: &Value) -> Option<f32> {
    value.as_f64().map(|n| n as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn single_icon(source: &str) -> Icon {
        let mut icons = parse_icon_file(source).unwrap();
        assert_eq!(icons.len(), 1);
        icons.remove(0)
    }

    #[test]
    fn test_parse_disc_icon() {
        let icon = single_icon(
            r#"---
name: fire-orb
size: 64
---

```icon
- disc: { center: [32, 32], radius: 24 }
  fill: $ember
```
"#,
        );

        assert_eq!(icon.name, "fire-orb");
        assert_eq!(icon.size, 64);
        assert_eq!(icon.shape_count(), 1);
        assert_eq!(
            icon.shapes[0].geometry,
            Geometry::Disc {
                center: Point::new(32.0, 32.0),
                radius: 24.0
            }
        );
        assert_eq!(
            icon.shapes[0].fill,
            ColourExpr::Reference("ember".to_string())
        );
    }

    #[test]
    fn test_parse_default_size() {
        let icon = single_icon(
            "---\nname: plain\n---\n\n```icon\n- disc: { center: [128, 128], radius: 96 }\n  fill: \"#FFF\"\n```\n",
        );
        assert_eq!(icon.size, 256);
    }

    #[test]
    fn test_parse_all_geometry_kinds() {
        let icon = single_icon(
            r##"---
name: kitchen-sink
---

```icon
- disc: { center: [128, 128], radius: 96 }
  fill: "#111111"
- segment: { from: [40, 200], to: [216, 72], width: 10 }
  fill: "#222222"
- ellipse: { center: [128, 96], rx: 60, ry: 30 }
  fill: "#333333"
- ring: { center: [128, 128], radius: 110, width: 8 }
  fill: "#444444"
- arc: { center: [128, 128], radius: 100, width: 12, start: 45, sweep: 180 }
  fill: "#555555"
```
"##,
        );

        let kinds: Vec<&str> = icon.shapes.iter().map(|s| s.geometry.kind()).collect();
        assert_eq!(kinds, vec!["disc", "segment", "ellipse", "ring", "arc"]);
    }

    #[test]
    fn test_parse_edge_and_falloff() {
        let icon = single_icon(
            r#"---
name: shaded
---

```icon
- disc: { center: [16, 16], radius: 12 }
  fill: $gold
  edge: darken($gold, 40%)
  falloff: { softness: 2, power: 1.5 }
```
"#,
        );

        let shape = &icon.shapes[0];
        assert!(shape.edge.is_some());
        assert_eq!(shape.falloff, Falloff::new(2.0, 1.5));
    }

    #[test]
    fn test_parse_falloff_shorthand_is_power() {
        let icon = single_icon(
            "---\nname: s\n---\n\n```icon\n- disc: { center: [8, 8], radius: 4 }\n  fill: \"#FFF\"\n  falloff: 3\n```\n",
        );

        assert_eq!(icon.shapes[0].falloff, Falloff::new(1.0, 3.0));
    }

    #[test]
    fn test_parse_multiple_icons_in_file() {
        let icons = parse_icon_file(
            r##"---
name: first
---

```icon
- disc: { center: [8, 8], radius: 4 }
  fill: "#FFF"
```

---
name: second
size: 32
---

```icon
- ring: { center: [16, 16], radius: 10, width: 2 }
  fill: "#000"
```
"##,
        )
        .unwrap();

        assert_eq!(icons.len(), 2);
        assert_eq!(icons[0].name, "first");
        assert_eq!(icons[1].name, "second");
        assert_eq!(icons[1].size, 32);
    }

    #[test]
    fn test_parse_missing_body() {
        let result = parse_icon_file("---\nname: empty\n---\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_missing_fill() {
        let result = parse_icon_file(
            "---\nname: nofill\n---\n\n```icon\n- disc: { center: [8, 8], radius: 4 }\n```\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_unknown_shape_kind() {
        let result = parse_icon_file(
            "---\nname: bad\n---\n\n```icon\n- blob: { center: [8, 8], radius: 4 }\n  fill: \"#FFF\"\n```\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_unknown_geometry_field() {
        let result = parse_icon_file(
            "---\nname: bad\n---\n\n```icon\n- disc: { center: [8, 8], radius: 4, wobble: 1 }\n  fill: \"#FFF\"\n```\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_missing_geometry_field() {
        let result = parse_icon_file(
            "---\nname: bad\n---\n\n```icon\n- disc: { center: [8, 8] }\n  fill: \"#FFF\"\n```\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_two_geometries_in_one_entry() {
        let result = parse_icon_file(
            "---\nname: bad\n---\n\n```icon\n- disc: { center: [8, 8], radius: 4 }\n  ring: { center: [8, 8], radius: 6, width: 1 }\n  fill: \"#FFF\"\n```\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_bad_point() {
        let result = parse_icon_file(
            "---\nname: bad\n---\n\n```icon\n- disc: { center: [8], radius: 4 }\n  fill: \"#FFF\"\n```\n",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_error_names_icon_and_shape() {
        let err = parse_icon_file(
            "---\nname: ctx\n---\n\n```icon\n- disc: { center: [8, 8], radius: 4 }\n  fill: \"#FFF\"\n- disc: { center: [8, 8] }\n  fill: \"#FFF\"\n```\n",
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("ctx"), "message: {}", message);
        assert!(message.contains("shape 2"), "message: {}", message);
    }

    #[test]
    fn test_parse_zero_size_rejected() {
        let result = parse_icon_file(
            "---\nname: tiny\nsize: 0\n---\n\n```icon\n- disc: { center: [1, 1], radius: 1 }\n  fill: \"#FFF\"\n```\n",
        );
        assert!(result.is_err());
    }
}
