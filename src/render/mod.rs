//! Rendering module for ikon.
//!
//! This module turns icon definitions into pixel buffers: field evaluation,
//! coverage, compositing, PNG encoding, and the optional JSON index.

mod canvas;
pub mod field;
mod icon;
mod index;
mod png;

pub use canvas::Canvas;
pub use icon::{IconRenderer, RenderedIcon};
pub use index::{write_index_json, IconIndex, IndexEntry};
pub use png::write_png;
