//! Colour-frequency histograms with exact running averages.

use crate::error::{RoomError, Result};
use crate::types::PaletteEntry;

/// One histogram bucket: how many pixels landed here and the mean of their
/// widened colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bucket {
    key: u16,
    count: u64,
    average: [u8; 3],
}

impl Bucket {
    pub fn new(key: u16) -> Self {
        Self {
            key,
            count: 0,
            average: [0; 3],
        }
    }

    /// Fold one colour into the running mean.
    ///
    /// Each channel becomes `(avg * count + value) / (count + 1)` with
    /// truncating division, applied per sample in arrival order.
    pub fn add(&mut self, rgb: [u8; 3]) {
        let n = self.count;
        for (avg, value) in self.average.iter_mut().zip(rgb) {
            *avg = ((*avg as u64 * n + value as u64) / (n + 1)) as u8;
        }
        self.count += 1;
    }

    pub fn key(&self) -> u16 {
        self.key
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn average(&self) -> [u8; 3] {
        self.average
    }

    /// The running mean as a palette colour. Empty buckets are black.
    pub fn to_entry(&self) -> PaletteEntry {
        PaletteEntry::from(self.average)
    }
}

/// A dense histogram with one bucket per key in `0..size`.
#[derive(Debug, Clone)]
pub struct Histogram {
    buckets: Vec<Bucket>,
}

impl Histogram {
    /// Allocate `size` empty buckets, keyed `0..size`.
    pub fn new(size: usize) -> Result<Self> {
        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(size)
            .map_err(|e| RoomError::exhausted("histogram", e))?;
        buckets.extend((0..size).map(|key| Bucket::new(key as u16)));
        Ok(Self { buckets })
    }

    /// Record one pixel under `key`.
    ///
    /// # Panics
    ///
    /// If `key` is not below the histogram size.
    pub fn record(&mut self, key: usize, rgb: [u8; 3]) {
        self.buckets[key].add(rgb);
    }

    pub fn bucket(&self, key: usize) -> Option<&Bucket> {
        self.buckets.get(key)
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of buckets that received at least one pixel.
    pub fn occupied(&self) -> usize {
        self.buckets.iter().filter(|b| b.count > 0).count()
    }

    /// Buckets ordered by count descending, then key ascending.
    pub fn ranked(&self) -> Result<Vec<Bucket>> {
        let mut ranked = Vec::new();
        ranked
            .try_reserve_exact(self.buckets.len())
            .map_err(|e| RoomError::exhausted("histogram ranking", e))?;
        ranked.extend_from_slice(&self.buckets);
        ranked.sort_unstable_by(|a, b| b.count.cmp(&a.count).then(a.key.cmp(&b.key)));
        Ok(ranked)
    }
}
