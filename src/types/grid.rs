//! Row-major pixel grid over a flat, unpadded buffer.

use crate::error::{RoomError, Result};

/// A `width * height` grid of pixels stored top row first, no padding.
///
/// The length invariant is checked once at construction; every accessor
/// after that works in (x, y) coordinates rather than raw offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Copy> PixelGrid<T> {
    /// Wrap an existing buffer, checking that it holds exactly `width * height` pixels.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        let expected = width.checked_mul(height).ok_or_else(|| {
            RoomError::malformed(format!("grid dimensions {}x{} overflow", width, height))
        })?;
        if data.len() != expected {
            return Err(RoomError::malformed(format!(
                "grid {}x{} needs {} pixels, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    /// Allocate a grid with every pixel set to `value`.
    ///
    /// Allocation failure is reported as `ResourceExhausted` instead of aborting.
    pub fn filled(width: usize, height: usize, value: T) -> Result<Self> {
        let len = width.checked_mul(height).ok_or_else(|| RoomError::ResourceExhausted {
            message: format!("grid dimensions {}x{} overflow", width, height),
        })?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| RoomError::exhausted("pixel grid", e))?;
        data.resize(len, value);
        Ok(Self { width, height, data })
    }

    /// Build a new grid of the same shape by mapping every pixel.
    pub fn try_map<U: Copy>(&self, f: impl FnMut(T) -> U) -> Result<PixelGrid<U>> {
        let mut data = Vec::new();
        data.try_reserve_exact(self.data.len())
            .map_err(|e| RoomError::exhausted("pixel grid", e))?;
        data.extend(self.data.iter().copied().map(f));
        Ok(PixelGrid {
            width: self.width,
            height: self.height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total pixel count.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Buffer offset of (x, y), or `None` outside the grid.
    pub fn offset(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Pixel at (x, y), or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        self.offset(x, y).map(|i| self.data[i])
    }

    /// Pixel at signed coordinates; anything negative or past the edge is `None`.
    pub fn get_signed(&self, x: i64, y: i64) -> Option<T> {
        self.get(usize::try_from(x).ok()?, usize::try_from(y).ok()?)
    }

    /// One row as a slice.
    pub fn row(&self, y: usize) -> Option<&[T]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.data[start..start + self.width])
    }

    /// One row, mutably.
    pub fn row_mut(&mut self, y: usize) -> Option<&mut [T]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&mut self.data[start..start + self.width])
    }

    /// Overwrite one pixel. Returns `false` if (x, y) is outside the grid.
    pub fn set(&mut self, x: usize, y: usize, value: T) -> bool {
        match self.offset(x, y) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    /// Pixels in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.data.iter().copied()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_checks_length() {
        assert!(PixelGrid::from_vec(2, 2, vec![0u8; 4]).is_ok());
        assert!(matches!(
            PixelGrid::from_vec(2, 2, vec![0u8; 3]),
            Err(RoomError::Malformed { .. })
        ));
    }

    #[test]
    fn test_row_major_access() {
        let grid = PixelGrid::from_vec(3, 2, vec![1u8, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(grid.get(0, 0), Some(1));
        assert_eq!(grid.get(2, 0), Some(3));
        assert_eq!(grid.get(0, 1), Some(4));
        assert_eq!(grid.row(1), Some(&[4u8, 5, 6][..]));
        assert_eq!(grid.offset(1, 1), Some(4));
    }

    #[test]
    fn test_out_of_bounds_is_none() {
        let grid = PixelGrid::filled(2, 2, 7u8).unwrap();
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.get_signed(-1, 0), None);
        assert_eq!(grid.get_signed(1, -1), None);
        assert_eq!(grid.get_signed(1, 1), Some(7));
        assert!(grid.row(2).is_none());
    }

    #[test]
    fn test_signed_far_coordinates_are_none() {
        let grid = PixelGrid::filled(2, 2, 7u8).unwrap();
        // Would truncate to (1, 0) if narrowed to a 32-bit usize.
        assert_eq!(grid.get_signed((1 << 32) + 1, 0), None);
        assert_eq!(grid.get_signed(0, (1 << 32) + 1), None);
        assert_eq!(grid.get_signed(i64::MAX, i64::MAX), None);
        assert_eq!(grid.get_signed(i64::MIN, 0), None);
    }

    #[test]
    fn test_set_and_map() {
        let mut grid = PixelGrid::filled(2, 1, 0u8).unwrap();
        assert!(grid.set(1, 0, 9));
        assert!(!grid.set(2, 0, 9));

        let doubled = grid.try_map(|v| v as u16 * 2).unwrap();
        assert_eq!(doubled.as_slice(), &[0u16, 18]);
        assert_eq!(doubled.width(), 2);
    }

    #[test]
    fn test_empty_grid() {
        let grid = PixelGrid::filled(0, 5, 0u8).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.row(0), Some(&[][..]));
    }
}
