//! Core domain types for ikon.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! colours and colour expressions, palettes, shape descriptors, and icons.

mod colour;
mod expr;
mod icon;
mod palette;
mod shape;

pub use colour::Colour;
pub use expr::{ColourExpr, ExprEvaluator};
pub use icon::Icon;
pub use palette::{Palette, PaletteBuilder};
pub use shape::{Falloff, Geometry, Point, ShapeSpec};
