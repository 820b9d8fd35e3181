//! Icon definition type.

use super::shape::ShapeSpec;

/// Default canvas side length in pixels.
pub const DEFAULT_SIZE: u32 = 256;

/// An icon definition: a named, ordered list of shapes on a square canvas.
#[derive(Debug, Clone)]
pub struct Icon {
    /// Icon name (unique identifier, used as the output file stem).
    pub name: String,

    /// Canvas side length in pixels.
    pub size: u32,

    /// Integer output scale from frontmatter (CLI --scale takes precedence).
    pub scale: Option<u32>,

    /// Shapes in declaration (compositing) order.
    pub shapes: Vec<ShapeSpec>,
}

impl Icon {
    /// Create a new icon with the default canvas size.
    pub fn new(name: impl Into<String>, shapes: Vec<ShapeSpec>) -> Self {
        Self {
            name: name.into(),
            size: DEFAULT_SIZE,
            scale: None,
            shapes,
        }
    }

    /// Set the canvas size.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the frontmatter scale.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Number of shapes.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the icon defines no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColourExpr, Geometry, Point, ShapeSpec};

    #[test]
    fn test_icon_defaults() {
        let icon = Icon::new("orb", vec![]);
        assert_eq!(icon.name, "orb");
        assert_eq!(icon.size, DEFAULT_SIZE);
        assert_eq!(icon.scale, None);
        assert!(icon.is_empty());
    }

    #[test]
    fn test_icon_with_size_and_scale() {
        let shape = ShapeSpec::new(
            Geometry::Disc {
                center: Point::new(16.0, 16.0),
                radius: 8.0,
            },
            ColourExpr::Hex("#FFF".to_string()),
        );

        let icon = Icon::new("orb", vec![shape]).with_size(32).with_scale(4);

        assert_eq!(icon.size, 32);
        assert_eq!(icon.scale, Some(4));
        assert_eq!(icon.shape_count(), 1);
    }
}
