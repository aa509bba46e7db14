//! Colour types at the three depths the engine deals with.
//!
//! - `RawColor` - 16-bit 5:6:5 source pixels from room photos
//! - `PaletteEntry` - 6-bit-per-channel colours programmed into the display
//! - `ObjectColor` - 2:2:2 sprite pixels, plus the transparent sentinel

use std::fmt;

/// A 5:6:5 source pixel: 5 bits red (high), 6 bits green, 5 bits blue (low).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RawColor(pub u16);

impl RawColor {
    /// Wrap a packed 5:6:5 value.
    pub const fn new(bits: u16) -> Self {
        Self(bits)
    }

    /// Pack channel values; extra high bits are discarded.
    pub const fn from_channels(r5: u8, g6: u8, b5: u8) -> Self {
        Self(((r5 as u16 & 0x1F) << 11) | ((g6 as u16 & 0x3F) << 5) | (b5 as u16 & 0x1F))
    }

    /// Decode from the little-endian byte pair used in photo files.
    pub const fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_le_bytes(bytes))
    }

    /// The packed value.
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// 5-bit red channel.
    pub const fn red(self) -> u8 {
        (self.0 >> 11) as u8 & 0x1F
    }

    /// 6-bit green channel.
    pub const fn green(self) -> u8 {
        (self.0 >> 5) as u8 & 0x3F
    }

    /// 5-bit blue channel.
    pub const fn blue(self) -> u8 {
        self.0 as u8 & 0x1F
    }

    /// Channels widened to 6 bits each (red and blue shifted up by one).
    pub const fn to_rgb6(self) -> [u8; 3] {
        [self.red() << 1, self.green(), self.blue() << 1]
    }

    /// 12-bit histogram key from the top 4 bits of each channel (`r4:g4:b4`).
    pub const fn fine_key(self) -> u16 {
        let r = (self.0 & 0xF000) >> 12;
        let g = (self.0 & 0x0780) >> 7;
        let b = (self.0 & 0x001E) >> 1;
        (r << 8) | (g << 4) | b
    }

    /// 6-bit histogram key from the top 2 bits of each channel (`r2:g2:b2`).
    pub const fn coarse_key(self) -> u8 {
        let r = (self.0 & 0xC000) >> 14;
        let g = (self.0 & 0x0600) >> 9;
        let b = (self.0 & 0x0018) >> 3;
        ((r << 4) | (g << 2) | b) as u8
    }

    /// Reduce to the fixed 2:2:2 object depth.
    ///
    /// This is the same bit selection as the coarse key, so the fallback
    /// image and the coarse palette region agree on what each pixel means.
    pub const fn to_object_color(self) -> ObjectColor {
        ObjectColor(self.coarse_key())
    }
}

/// One display palette entry with 6-bit channels (0..=63).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PaletteEntry {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PaletteEntry {
    /// Create an entry; channels are masked to 6 bits.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r & 0x3F,
            g: g & 0x3F,
            b: b & 0x3F,
        }
    }

    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Channels as an `[r, g, b]` array, the layout the display sink expects.
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Expand to 8-bit opaque RGBA by bit replication.
    pub const fn to_rgba8(self) -> [u8; 4] {
        [widen6(self.r), widen6(self.g), widen6(self.b), 255]
    }
}

impl From<[u8; 3]> for PaletteEntry {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl fmt::Display for PaletteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, _] = self.to_rgba8();
        write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
    }
}

const fn widen6(v: u8) -> u8 {
    (v << 2) | (v >> 4)
}

/// A sprite pixel: a 2:2:2 colour in the low six bits, or the transparent sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ObjectColor(pub u8);

impl ObjectColor {
    /// Reserved value marking a transparent sprite pixel.
    pub const TRANSPARENT: Self = Self(0x40);

    /// Pack 2-bit channels into `rrggbb`.
    pub const fn from_channels(r2: u8, g2: u8, b2: u8) -> Self {
        Self(((r2 & 3) << 4) | ((g2 & 3) << 2) | (b2 & 3))
    }

    /// The raw byte as stored in image files and line buffers.
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_transparent(self) -> bool {
        self.0 == Self::TRANSPARENT.0
    }

    /// Expand to a 6-bit palette entry (each 2-bit step is 0x15).
    ///
    /// Only the low six bits are considered, so the sentinel maps to black.
    pub const fn to_palette_entry(self) -> PaletteEntry {
        let r = (self.0 >> 4) & 3;
        let g = (self.0 >> 2) & 3;
        let b = self.0 & 3;
        PaletteEntry::new(r * 0x15, g * 0x15, b * 0x15)
    }
}
