//! Photo and sprite image loaders.
//!
//! Both file kinds start with a `width, height` header (little-endian u16)
//! followed by `width * height` pixels, bottom row first. Photos use two
//! bytes per 5:6:5 pixel, sprite images one byte per 2:2:2 pixel. Pixels are
//! stored in memory top row first.

mod reader;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{RoomError, Result};
use crate::quantize::quantize;
use crate::types::{Palette, Photo, PhotoHeader, PixelGrid, RawColor, SpriteImage};

use reader::{read_header, read_rows_bottom_up};

/// How a photo's palette is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteMode {
    /// Per-photo 192-colour palette from the quantizer.
    #[default]
    Adaptive,
    /// Fixed 2:2:2 colours shared with sprites; no quantization.
    Fixed,
}

/// Limits and options applied while loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    pub max_photo_width: u16,
    pub max_photo_height: u16,
    pub max_image_width: u16,
    pub max_image_height: u16,
    pub palette_mode: PaletteMode,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_photo_width: 1024,
            max_photo_height: 1024,
            max_image_width: 160,
            max_image_height: 100,
            palette_mode: PaletteMode::Adaptive,
        }
    }
}

/// Load and quantize a room photo from a file.
pub fn load_photo(path: &Path, options: &LoadOptions) -> Result<Photo> {
    let mut reader = open(path)?;
    let photo = read_photo(&mut reader, options).map_err(|e| with_path(e, path))?;
    debug!(
        "loaded photo {} ({}x{})",
        path.display(),
        photo.width(),
        photo.height()
    );
    Ok(photo)
}

/// Load a sprite image from a file.
pub fn load_image(path: &Path, options: &LoadOptions) -> Result<SpriteImage> {
    let mut reader = open(path)?;
    let image = read_image(&mut reader, options).map_err(|e| with_path(e, path))?;
    debug!(
        "loaded image {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Load a photo's 16-bit pixels without quantizing them.
pub fn load_raw_photo(path: &Path, options: &LoadOptions) -> Result<PixelGrid<RawColor>> {
    let mut reader = open(path)?;
    read_raw_photo(&mut reader, options).map_err(|e| with_path(e, path))
}

/// Read a photo's header and 16-bit pixels from any byte stream.
pub fn read_raw_photo<R: Read>(reader: &mut R, options: &LoadOptions) -> Result<PixelGrid<RawColor>> {
    let header = read_header(reader)?;
    check_bounds(
        "photo",
        header,
        options.max_photo_width,
        options.max_photo_height,
    )?;

    read_rows_bottom_up(reader, header, |bytes: [u8; 2]| RawColor::from_le_bytes(bytes))
}

/// Read a photo from any byte stream.
pub fn read_photo<R: Read>(reader: &mut R, options: &LoadOptions) -> Result<Photo> {
    let raw = read_raw_photo(reader, options)?;
    let header = PhotoHeader::new(raw.width() as u16, raw.height() as u16);
    let fallback = raw.try_map(|pixel| pixel.to_object_color().bits())?;

    match options.palette_mode {
        PaletteMode::Adaptive => {
            let quantized = quantize(&raw)?;
            Photo::new(header, quantized.palette, quantized.indices, fallback)
        }
        PaletteMode::Fixed => Photo::new(header, Palette::fixed(), fallback.clone(), fallback),
    }
}

/// Read a sprite image from any byte stream.
///
/// Pixel bytes are kept verbatim, including the transparent sentinel.
pub fn read_image<R: Read>(reader: &mut R, options: &LoadOptions) -> Result<SpriteImage> {
    let header = read_header(reader)?;
    check_bounds(
        "image",
        header,
        options.max_image_width,
        options.max_image_height,
    )?;

    let pixels = read_rows_bottom_up(reader, header, |[pixel]: [u8; 1]| pixel)?;
    SpriteImage::new(header, pixels)
}

/// Read only the header of a photo or image file.
pub fn read_file_header(path: &Path) -> Result<PhotoHeader> {
    let mut reader = open(path)?;
    read_header(&mut reader).map_err(|e| with_path(e, path))
}

fn open(path: &Path) -> Result<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(RoomError::NotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(RoomError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to open: {}", e),
        }),
    }
}

fn with_path(err: RoomError, path: &Path) -> RoomError {
    match err {
        RoomError::IoError(e) => RoomError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read: {}", e),
        },
        RoomError::Malformed { message, help } => RoomError::Malformed {
            message: format!("{}: {}", path.display(), message),
            help,
        },
        other => other,
    }
}

fn check_bounds(kind: &str, header: PhotoHeader, max_width: u16, max_height: u16) -> Result<()> {
    if header.width > max_width || header.height > max_height {
        return Err(RoomError::Malformed {
            message: format!(
                "{} is {}x{}, larger than the {}x{} maximum",
                kind, header.width, header.height, max_width, max_height
            ),
            help: Some("Check the file header or raise the limits in roomview.yaml".to_string()),
        });
    }
    Ok(())
}
