//! Analytic shape descriptors.
//!
//! A shape is a piece of closed-form geometry plus the colour and falloff
//! configuration used to rasterize it. Shapes are transient: the parser
//! builds them and the renderer consumes them within a single render call.

use super::expr::ColourExpr;

/// A point in canvas space (pixels, origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Closed-form geometry kinds.
///
/// Each variant defines a signed scalar field over the canvas: negative or
/// zero inside the shape, positive outside, measured in pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Filled circle: distance to `center` minus `radius`.
    Disc { center: Point, radius: f32 },

    /// Stroked line segment: distance to the segment minus half `width`.
    Segment { from: Point, to: Point, width: f32 },

    /// Filled ellipse with semi-axes `rx` and `ry`.
    Ellipse { center: Point, rx: f32, ry: f32 },

    /// Annulus centred on `radius` with the given stroke `width`.
    Ring {
        center: Point,
        radius: f32,
        width: f32,
    },

    /// Ring section limited to an angular sector.
    ///
    /// `start` is measured in degrees clockwise from the positive x axis
    /// (y points down); the sector spans `sweep` degrees.
    Arc {
        center: Point,
        radius: f32,
        width: f32,
        start: f32,
        sweep: f32,
    },
}

impl Geometry {
    /// The geometry kind name as used in definition files.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Disc { .. } => "disc",
            Geometry::Segment { .. } => "segment",
            Geometry::Ellipse { .. } => "ellipse",
            Geometry::Ring { .. } => "ring",
            Geometry::Arc { .. } => "arc",
        }
    }

    /// The reference point used for bounds checks.
    pub fn center(&self) -> Point {
        match self {
            Geometry::Disc { center, .. }
            | Geometry::Ellipse { center, .. }
            | Geometry::Ring { center, .. }
            | Geometry::Arc { center, .. } => *center,
            Geometry::Segment { from, to, .. } => {
                Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0)
            }
        }
    }
}

/// Coverage falloff configuration.
///
/// Coverage is `clamp(1 - d/softness, 0, 1) ^ power` where `d` is the signed
/// field value. `softness` is the width of the edge ramp in pixels; `power`
/// shapes the ramp curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Falloff {
    pub softness: f32,
    pub power: f32,
}

impl Falloff {
    pub const fn new(softness: f32, power: f32) -> Self {
        Self { softness, power }
    }
}

impl Default for Falloff {
    fn default() -> Self {
        Self {
            softness: 1.0,
            power: 1.0,
        }
    }
}

/// A fully configured shape, ready to rasterize.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSpec {
    /// The analytic geometry.
    pub geometry: Geometry,

    /// Colour at full coverage.
    pub fill: ColourExpr,

    /// Colour at zero coverage (defaults to `fill`, giving a flat shape).
    pub edge: Option<ColourExpr>,

    /// Edge falloff configuration.
    pub falloff: Falloff,
}

impl ShapeSpec {
    /// Create a shape with default falloff and no edge gradient.
    pub fn new(geometry: Geometry, fill: ColourExpr) -> Self {
        Self {
            geometry,
            fill,
            edge: None,
            falloff: Falloff::default(),
        }
    }

    /// Set the edge colour expression.
    pub fn with_edge(mut self, edge: ColourExpr) -> Self {
        self.edge = Some(edge);
        self
    }

    /// Set the falloff.
    pub fn with_falloff(mut self, falloff: Falloff) -> Self {
        self.falloff = falloff;
        self
    }
}
