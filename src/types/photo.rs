//! Loaded room photos and sprite images.

use crate::error::{RoomError, Result};

use super::palette::PALETTE_SIZE;
use super::{ObjectColor, Palette, PixelGrid};

/// The four-byte header shared by photo and image files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhotoHeader {
    pub width: u16,
    pub height: u16,
}

impl PhotoHeader {
    pub const SIZE: usize = 4;

    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Decode `width, height` as little-endian u16s.
    pub const fn from_le_bytes(bytes: [u8; Self::SIZE]) -> Self {
        Self {
            width: u16::from_le_bytes([bytes[0], bytes[1]]),
            height: u16::from_le_bytes([bytes[2], bytes[3]]),
        }
    }

    pub const fn to_le_bytes(self) -> [u8; Self::SIZE] {
        let w = self.width.to_le_bytes();
        let h = self.height.to_le_bytes();
        [w[0], w[1], h[0], h[1]]
    }

    pub const fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// A room photo reduced to an indexed image plus its own palette.
#[derive(Debug, Clone)]
pub struct Photo {
    header: PhotoHeader,
    palette: Palette,
    indices: PixelGrid<u8>,
    fallback: PixelGrid<u8>,
}

impl Photo {
    /// Assemble a photo, checking that both grids match the header and
    /// that every index addresses the palette.
    pub fn new(
        header: PhotoHeader,
        palette: Palette,
        indices: PixelGrid<u8>,
        fallback: PixelGrid<u8>,
    ) -> Result<Self> {
        for grid in [&indices, &fallback] {
            if grid.width() != header.width as usize || grid.height() != header.height as usize {
                return Err(RoomError::malformed(format!(
                    "photo grid is {}x{} but header declares {}x{}",
                    grid.width(),
                    grid.height(),
                    header.width,
                    header.height
                )));
            }
        }
        if let Some(bad) = indices.iter().find(|&i| i as usize >= PALETTE_SIZE) {
            return Err(RoomError::malformed(format!(
                "palette index {} out of range (palette has {} entries)",
                bad, PALETTE_SIZE
            )));
        }

        Ok(Self {
            header,
            palette,
            indices,
            fallback,
        })
    }

    pub fn header(&self) -> PhotoHeader {
        self.header
    }

    pub fn width(&self) -> usize {
        self.header.width as usize
    }

    pub fn height(&self) -> usize {
        self.header.height as usize
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette index for every pixel, top row first.
    pub fn indices(&self) -> &PixelGrid<u8> {
        &self.indices
    }

    /// The 2:2:2 reduction of every source pixel, for displays without a
    /// per-photo palette.
    pub fn fallback(&self) -> &PixelGrid<u8> {
        &self.fallback
    }
}

/// A sprite image: 2:2:2 pixels with one reserved transparent value.
#[derive(Debug, Clone)]
pub struct SpriteImage {
    header: PhotoHeader,
    pixels: PixelGrid<u8>,
}

impl SpriteImage {
    pub fn new(header: PhotoHeader, pixels: PixelGrid<u8>) -> Result<Self> {
        if pixels.width() != header.width as usize || pixels.height() != header.height as usize {
            return Err(RoomError::malformed(format!(
                "image grid is {}x{} but header declares {}x{}",
                pixels.width(),
                pixels.height(),
                header.width,
                header.height
            )));
        }
        Ok(Self { header, pixels })
    }

    /// Build an image directly from rows of pixel bytes (top row first).
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        if rows.iter().any(|r| r.len() != width) {
            return Err(RoomError::malformed("image rows have different lengths"));
        }
        let header = PhotoHeader::new(dimension(width)?, dimension(height)?);
        let pixels = PixelGrid::from_vec(width, height, rows.concat())?;
        Self::new(header, pixels)
    }

    pub fn header(&self) -> PhotoHeader {
        self.header
    }

    pub fn width(&self) -> usize {
        self.header.width as usize
    }

    pub fn height(&self) -> usize {
        self.header.height as usize
    }

    pub fn pixels(&self) -> &PixelGrid<u8> {
        &self.pixels
    }

    /// Count of non-transparent pixels.
    pub fn opaque_pixels(&self) -> usize {
        self.pixels
            .iter()
            .filter(|&p| !ObjectColor(p).is_transparent())
            .count()
    }
}

fn dimension(n: usize) -> Result<u16> {
    u16::try_from(n).map_err(|_| RoomError::malformed(format!("dimension {} exceeds 65535", n)))
}
