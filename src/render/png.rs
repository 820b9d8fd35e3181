//! PNG output for rendered icons.
//!
//! Encodes a rendered icon to a PNG file with optional integer scaling.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{IkonError, Result};

use super::RenderedIcon;

/// Write a rendered icon to a PNG file.
///
/// # Arguments
///
/// * `rendered` - The rendered icon to write
/// * `path` - Output file path
/// * `scale` - Integer scale factor (1 = no scaling, 0 treated as 1)
///
/// Scaling is nearest-neighbour: each source pixel becomes a scale x scale
/// block, keeping edges crisp.
pub fn write_png(rendered: &RenderedIcon, path: &Path, scale: u32) -> Result<()> {
    let scale = scale.max(1);
    let side = rendered.size() * scale;

    let img: RgbaImage = ImageBuffer::from_fn(side, side, |x, y| {
        let colour = rendered
            .get(x / scale, y / scale)
            .unwrap_or(crate::types::Colour::TRANSPARENT);
        Rgba(colour.to_rgba())
    });

    img.save(path).map_err(|e| IkonError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    Ok(())
}
