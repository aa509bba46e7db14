//! Core domain types for roomview.
//!
//! This module contains the fundamental types used throughout the engine:
//! - `RawColor`, `PaletteEntry`, `ObjectColor` - colours at each depth
//! - `Palette` - the 192-slot photo palette
//! - `PixelGrid` - row-major pixel storage
//! - `Photo`, `SpriteImage` - loaded assets

mod colour;
mod grid;
pub mod palette;
mod photo;

pub use colour::{ObjectColor, PaletteEntry, RawColor};
pub use grid::PixelGrid;
pub use palette::{object_palette, DisplayPalette, Palette};
pub use photo::{Photo, PhotoHeader, SpriteImage};
