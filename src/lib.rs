//! roomview - Room photo quantizer and scanline compositor
//!
//! Loads 16-bit room photos, reduces each to a 192-colour adaptive palette,
//! and composites photo and sprite pixels into display lines for a
//! scrolling viewer.

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod output;
pub mod quantize;
pub mod render;
pub mod room;
pub mod types;

pub use config::{RoomManifest, SpriteDef, ViewConfig};
pub use error::{Result, RoomError};
pub use loader::{load_image, load_photo, read_image, read_photo, LoadOptions, PaletteMode};
pub use quantize::{quantize, QuantizeStats, Quantized};
pub use render::{fill_horizontal, fill_vertical, render_window, write_png, ScanOrder};
pub use room::{PaletteSink, PlacedSprite, RecordingSink, RenderContext, Room};
pub use types::{
    DisplayPalette, ObjectColor, Palette, PaletteEntry, Photo, PhotoHeader, PixelGrid, RawColor,
    SpriteImage,
};
