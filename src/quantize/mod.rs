//! Adaptive palette selection for room photos.
//!
//! Every photo pixel is counted twice: once in a 4096-bucket fine histogram
//! (top four bits per channel) and once in a 64-bucket coarse histogram
//! (top two bits per channel). The 128 most frequent fine buckets get their
//! own palette slots; every coarse bucket gets a slot unconditionally, so a
//! pixel whose fine bucket missed the cut still has a close colour.

mod histogram;

pub use histogram::{Bucket, Histogram};

use log::debug;

use crate::error::Result;
use crate::types::palette::{COARSE_BASE, COARSE_SLOTS, FINE_SLOTS};
use crate::types::{Palette, PixelGrid, RawColor};

/// Number of distinct fine keys (4 bits x 3 channels).
pub const FINE_KEYS: usize = 1 << 12;

/// Number of distinct coarse keys (2 bits x 3 channels).
pub const COARSE_KEYS: usize = 1 << 6;

/// Result of quantizing one photo.
#[derive(Debug, Clone)]
pub struct Quantized {
    pub palette: Palette,
    /// Palette slot for every pixel, each below 192.
    pub indices: PixelGrid<u8>,
    pub stats: QuantizeStats,
}

/// Figures about how well the fine selection covered the photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuantizeStats {
    /// Total pixels processed.
    pub pixels: usize,
    /// Fine buckets holding at least one pixel.
    pub fine_buckets_used: usize,
    /// Coarse buckets holding at least one pixel.
    pub coarse_buckets_used: usize,
    /// Pixels that landed in a selected fine bucket.
    pub fine_coverage: usize,
}

impl QuantizeStats {
    /// Share of pixels drawn from the fine region, in `[0, 1]`.
    pub fn fine_ratio(&self) -> f64 {
        if self.pixels == 0 {
            1.0
        } else {
            self.fine_coverage as f64 / self.pixels as f64
        }
    }
}

/// Build the 192-colour palette for `raw` and remap every pixel to it.
///
/// Only fails if a working buffer cannot be allocated.
pub fn quantize(raw: &PixelGrid<RawColor>) -> Result<Quantized> {
    let mut fine = Histogram::new(FINE_KEYS)?;
    let mut coarse = Histogram::new(COARSE_KEYS)?;

    for pixel in raw.iter() {
        let rgb = pixel.to_rgb6();
        fine.record(pixel.fine_key() as usize, rgb);
        coarse.record(pixel.coarse_key() as usize, rgb);
    }

    let mut palette = Palette::black();

    // Fine key -> palette slot, for the keys that survived selection.
    let mut fine_slot = [None::<u8>; FINE_KEYS];
    for (slot, bucket) in fine.ranked()?.iter().take(FINE_SLOTS).enumerate() {
        palette.set(slot, bucket.to_entry());
        fine_slot[bucket.key() as usize] = Some(slot as u8);
    }

    // Zero-count coarse buckets still take their slot, left black.
    for (key, bucket) in coarse.buckets().iter().enumerate().take(COARSE_SLOTS) {
        palette.set(COARSE_BASE + key, bucket.to_entry());
    }

    let mut fine_coverage = 0;
    let indices = raw.try_map(|pixel| match fine_slot[pixel.fine_key() as usize] {
        Some(slot) => {
            fine_coverage += 1;
            slot
        }
        None => (COARSE_BASE + pixel.coarse_key() as usize) as u8,
    })?;

    let stats = QuantizeStats {
        pixels: raw.len(),
        fine_buckets_used: fine.occupied(),
        coarse_buckets_used: coarse.occupied(),
        fine_coverage,
    };
    debug!(
        "quantized {}x{}: {} fine / {} coarse buckets used, {:.1}% of pixels in fine slots",
        raw.width(),
        raw.height(),
        stats.fine_buckets_used,
        stats.coarse_buckets_used,
        stats.fine_ratio() * 100.0
    );

    Ok(Quantized {
        palette,
        indices,
        stats,
    })
}
