//! PNG output for composited frames.
//!
//! Maps display bytes through a `DisplayPalette` and writes them with
//! optional integer scaling.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{RoomError, Result};
use crate::types::{DisplayPalette, PixelGrid};

/// Convert a frame of display bytes to an RGBA image.
///
/// # Arguments
///
/// * `frame` - Display bytes, as produced by the compositor
/// * `palette` - Colour table the bytes index into
/// * `scale` - Integer scale factor (1 = no scaling)
pub fn frame_to_image(frame: &PixelGrid<u8>, palette: &DisplayPalette, scale: u32) -> RgbaImage {
    let scale = scale.max(1); // Minimum scale of 1

    let width = frame.width() as u32 * scale;
    let height = frame.height() as u32 * scale;

    let mut img: RgbaImage = ImageBuffer::new(width, height);

    for y in 0..frame.height() {
        let Some(row) = frame.row(y) else { continue };
        for (x, &byte) in row.iter().enumerate() {
            let rgba = Rgba(palette.lookup(byte).to_rgba8());

            // Fill scaled pixels
            for sy in 0..scale {
                for sx in 0..scale {
                    img.put_pixel(x as u32 * scale + sx, y as u32 * scale + sy, rgba);
                }
            }
        }
    }

    img
}

/// Write a frame to a PNG file.
pub fn write_png(
    frame: &PixelGrid<u8>,
    palette: &DisplayPalette,
    path: &Path,
    scale: u32,
) -> Result<()> {
    if frame.is_empty() {
        return Err(RoomError::Render {
            message: "Cannot write an empty frame".to_string(),
            help: Some("Check the scroll window dimensions in roomview.yaml".to_string()),
        });
    }

    frame_to_image(frame, palette, scale)
        .save(path)
        .map_err(|e| RoomError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })?;

    Ok(())
}
