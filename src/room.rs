//! Rooms and the render context that tracks which one is on screen.

use std::sync::Arc;

use log::info;

use crate::error::{Result, RoomError};
use crate::render::scanline::{self, DEFAULT_PIXEL};
use crate::types::palette::MAX_PALETTE_OFFSET;
use crate::types::{Photo, SpriteImage};

/// Write-only sink for the display's palette registers.
///
/// Receives the 192 photo colours as consecutive `r, g, b` bytes (6 bits
/// per channel).
pub trait PaletteSink {
    fn set_palette(&mut self, bytes: &[u8]);
}

/// A sink that keeps the last palette it was sent. Useful for previews and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub last: Option<Vec<u8>>,
    pub writes: usize,
}

impl PaletteSink for RecordingSink {
    fn set_palette(&mut self, bytes: &[u8]) {
        self.last = Some(bytes.to_vec());
        self.writes += 1;
    }
}

/// A sprite placed at a map position (top-left corner, may be negative).
#[derive(Debug, Clone)]
pub struct PlacedSprite {
    pub x: i32,
    pub y: i32,
    pub image: Arc<SpriteImage>,
}

impl PlacedSprite {
    pub fn new(x: i32, y: i32, image: Arc<SpriteImage>) -> Self {
        Self { x, y, image }
    }
}

/// A room: its photo and the sprites currently placed in it.
///
/// Sprites draw in placement order, so later ones cover earlier ones.
#[derive(Debug, Clone)]
pub struct Room {
    name: String,
    photo: Arc<Photo>,
    sprites: Vec<PlacedSprite>,
}

impl Room {
    pub fn new(name: impl Into<String>, photo: Arc<Photo>) -> Self {
        Self {
            name: name.into(),
            photo,
            sprites: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn photo(&self) -> &Photo {
        &self.photo
    }

    /// Add a sprite on top of everything already placed.
    pub fn place(&mut self, sprite: PlacedSprite) {
        self.sprites.push(sprite);
    }

    /// Placed sprites, back to front.
    pub fn sprites(&self) -> impl Iterator<Item = &PlacedSprite> {
        self.sprites.iter()
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }
}

/// Which room is being drawn, and where photo colours sit in the display table.
///
/// Owned by whatever runs the frame loop. Switching rooms swaps the `Arc`,
/// so line fills already holding the previous room are unaffected; callers
/// should still only switch between frames.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    active: Option<Arc<Room>>,
    palette_offset: u8,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display slot at which photo colours start.
    ///
    /// Above 64 the top photo indices would wrap onto object colours, so
    /// such offsets are rejected.
    pub fn with_palette_offset(mut self, offset: u8) -> Result<Self> {
        check_palette_offset(offset)?;
        self.palette_offset = offset;
        Ok(self)
    }

    pub fn palette_offset(&self) -> u8 {
        self.palette_offset
    }

    /// Make `room` the active room and send its photo palette to `sink`.
    pub fn activate_room(&mut self, room: Arc<Room>, sink: &mut impl PaletteSink) {
        info!(
            "activating room '{}' ({} sprites)",
            room.name(),
            room.sprite_count()
        );
        sink.set_palette(&room.photo().palette().to_bytes());
        self.active = Some(room);
    }

    pub fn active_room(&self) -> Option<&Arc<Room>> {
        self.active.as_ref()
    }

    /// Horizontal line of the active room; all default bytes if none is active.
    pub fn fill_horizontal(&self, x: i32, y: i32, buf: &mut [u8]) {
        match &self.active {
            Some(room) => scanline::fill_horizontal(room, x, y, self.palette_offset, buf),
            None => buf.fill(DEFAULT_PIXEL),
        }
    }

    /// Vertical line of the active room; all default bytes if none is active.
    pub fn fill_vertical(&self, x: i32, y: i32, buf: &mut [u8]) {
        match &self.active {
            Some(room) => scanline::fill_vertical(room, x, y, self.palette_offset, buf),
            None => buf.fill(DEFAULT_PIXEL),
        }
    }
}

/// Reject a palette offset that would push photo colours past slot 255.
pub fn check_palette_offset(offset: u8) -> Result<()> {
    if offset > MAX_PALETTE_OFFSET {
        return Err(RoomError::Render {
            message: format!(
                "palette_offset {} would push photo colours past slot 255",
                offset
            ),
            help: Some(format!("Use a value between 0 and {}", MAX_PALETTE_OFFSET)),
        });
    }
    Ok(())
}
