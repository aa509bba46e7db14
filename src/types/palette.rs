//! Fixed-size palettes.
//!
//! A photo palette has 192 slots: the fine region `[0, 128)` holds the most
//! frequent 4:4:4 buckets and the coarse region `[128, 192)` holds one slot
//! per 2:2:2 bucket. The display additionally reserves 64 slots for the
//! 2:2:2 object colours; `DisplayPalette` models that combined layout.

use std::fmt;

use super::{ObjectColor, PaletteEntry};
use crate::error::{Result, RoomError};

/// Total number of photo palette slots.
pub const PALETTE_SIZE: usize = 192;

/// Slots reserved for the most frequent fine buckets.
pub const FINE_SLOTS: usize = 128;

/// Slots holding one colour per coarse bucket.
pub const COARSE_SLOTS: usize = 64;

/// First slot of the coarse region.
pub const COARSE_BASE: usize = FINE_SLOTS;

/// Number of fixed 2:2:2 object colours.
pub const OBJECT_COLOURS: usize = 64;

/// Size of the hardware colour table.
pub const DISPLAY_SIZE: usize = 256;

/// Highest slot a photo palette can start at and still fit the display table.
pub const MAX_PALETTE_OFFSET: u8 = (DISPLAY_SIZE - PALETTE_SIZE) as u8;

/// The 192-entry palette belonging to one photo.
#[derive(Clone, PartialEq, Eq)]
pub struct Palette {
    entries: [PaletteEntry; PALETTE_SIZE],
}

impl Palette {
    /// A palette with every slot black.
    pub const fn black() -> Self {
        Self {
            entries: [PaletteEntry::BLACK; PALETTE_SIZE],
        }
    }

    /// The legacy palette: the 64 object colours in slots `[0, 64)`, black elsewhere.
    ///
    /// Paired with the 2:2:2 fallback image, every index maps to its own
    /// object colour.
    pub fn fixed() -> Self {
        let mut palette = Self::black();
        palette.entries[..OBJECT_COLOURS].copy_from_slice(&object_palette());
        palette
    }

    /// Entry at `slot`, or `None` past the end.
    pub fn get(&self, slot: usize) -> Option<PaletteEntry> {
        self.entries.get(slot).copied()
    }

    pub(crate) fn set(&mut self, slot: usize, entry: PaletteEntry) {
        self.entries[slot] = entry;
    }

    pub fn entries(&self) -> &[PaletteEntry; PALETTE_SIZE] {
        &self.entries
    }

    /// The fine region `[0, 128)`.
    pub fn fine(&self) -> &[PaletteEntry] {
        &self.entries[..FINE_SLOTS]
    }

    /// The coarse region `[128, 192)`.
    pub fn coarse(&self) -> &[PaletteEntry] {
        &self.entries[COARSE_BASE..]
    }

    pub const fn len(&self) -> usize {
        PALETTE_SIZE
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Flatten to `r, g, b` triples, the form the display palette sink takes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.entries.iter().flat_map(|e| e.to_array()).collect()
    }

    /// Rebuild a palette from the `r, g, b` bytes a sink received.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PALETTE_SIZE * 3 {
            return Err(RoomError::malformed(format!(
                "palette needs {} bytes, got {}",
                PALETTE_SIZE * 3,
                bytes.len()
            )));
        }
        let mut palette = Self::black();
        for (entry, rgb) in palette.entries.iter_mut().zip(bytes.chunks_exact(3)) {
            *entry = PaletteEntry::new(rgb[0], rgb[1], rgb[2]);
        }
        Ok(palette)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::black()
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Palette")
            .field("fine", &self.fine().len())
            .field("coarse", &self.coarse().len())
            .finish()
    }
}

/// The 64 fixed object colours, indexed by their 2:2:2 value.
pub fn object_palette() -> [PaletteEntry; OBJECT_COLOURS] {
    let mut entries = [PaletteEntry::BLACK; OBJECT_COLOURS];
    for (i, entry) in entries.iter_mut().enumerate() {
        *entry = ObjectColor(i as u8).to_palette_entry();
    }
    entries
}

/// The full 256-slot colour table as the display would hold it.
///
/// Object colours occupy `[0, 64)`; the photo palette starts at `offset`.
/// Slots a photo palette would push past 255 are dropped.
#[derive(Clone)]
pub struct DisplayPalette {
    entries: [PaletteEntry; DISPLAY_SIZE],
}

impl DisplayPalette {
    pub fn new(photo: &Palette, offset: u8) -> Self {
        let mut entries = [PaletteEntry::BLACK; DISPLAY_SIZE];
        entries[..OBJECT_COLOURS].copy_from_slice(&object_palette());

        let start = offset as usize;
        let count = PALETTE_SIZE.min(DISPLAY_SIZE - start);
        entries[start..start + count].copy_from_slice(&photo.entries()[..count]);

        Self { entries }
    }

    /// Colour shown for a line-buffer byte.
    pub fn lookup(&self, index: u8) -> PaletteEntry {
        self.entries[index as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions() {
        let palette = Palette::black();
        assert_eq!(palette.len(), 192);
        assert_eq!(palette.fine().len(), 128);
        assert_eq!(palette.coarse().len(), 64);
    }

    #[test]
    fn test_to_bytes_layout() {
        let mut palette = Palette::black();
        palette.set(0, PaletteEntry::new(1, 2, 3));
        palette.set(191, PaletteEntry::new(4, 5, 6));

        let bytes = palette.to_bytes();
        assert_eq!(bytes.len(), 192 * 3);
        assert_eq!(&bytes[..3], &[1, 2, 3]);
        assert_eq!(&bytes[573..], &[4, 5, 6]);
    }

    #[test]
    fn test_from_bytes_matches_to_bytes() {
        let mut palette = Palette::black();
        palette.set(7, PaletteEntry::new(1, 2, 3));
        palette.set(150, PaletteEntry::new(60, 61, 62));

        let rebuilt = Palette::from_bytes(&palette.to_bytes()).unwrap();
        assert_eq!(rebuilt, palette);
    }

    #[test]
    fn test_from_bytes_rejects_wrong_length() {
        assert!(matches!(
            Palette::from_bytes(&[0; 575]),
            Err(RoomError::Malformed { .. })
        ));
    }

    #[test]
    fn test_object_palette() {
        let objects = object_palette();
        assert_eq!(objects[0], PaletteEntry::BLACK);
        assert_eq!(objects[63], PaletteEntry::new(63, 63, 63));
        assert_eq!(objects[0b00_00_01], PaletteEntry::new(0, 0, 0x15));
        assert_eq!(objects[0b10_00_00], PaletteEntry::new(0x2A, 0, 0));
    }

    #[test]
    fn test_fixed_palette() {
        let palette = Palette::fixed();
        assert_eq!(palette.get(63), Some(PaletteEntry::new(63, 63, 63)));
        assert_eq!(palette.get(64), Some(PaletteEntry::BLACK));
        assert_eq!(palette.get(192), None);
    }

    #[test]
    fn test_display_palette_offset() {
        let mut photo = Palette::black();
        photo.set(0, PaletteEntry::new(10, 10, 10));
        photo.set(191, PaletteEntry::new(20, 20, 20));

        let display = DisplayPalette::new(&photo, 64);
        assert_eq!(display.lookup(63), PaletteEntry::new(63, 63, 63));
        assert_eq!(display.lookup(64), PaletteEntry::new(10, 10, 10));
        assert_eq!(display.lookup(255), PaletteEntry::new(20, 20, 20));
    }

    #[test]
    fn test_display_palette_zero_offset_overrides_objects() {
        let mut photo = Palette::black();
        photo.set(5, PaletteEntry::new(1, 1, 1));

        let display = DisplayPalette::new(&photo, 0);
        assert_eq!(display.lookup(5), PaletteEntry::new(1, 1, 1));
        // Past the end of the photo palette the table stays black.
        assert_eq!(display.lookup(200), PaletteEntry::BLACK);
    }
}
