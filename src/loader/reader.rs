//! Low-level reads shared by the photo and image loaders.

use std::io::{ErrorKind, Read};

use crate::error::{RoomError, Result};
use crate::types::{PhotoHeader, PixelGrid};

/// Read the four-byte `width, height` header.
pub(super) fn read_header<R: Read>(reader: &mut R) -> Result<PhotoHeader> {
    let mut bytes = [0u8; PhotoHeader::SIZE];
    reader.read_exact(&mut bytes).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            RoomError::malformed("truncated header")
        } else {
            RoomError::IoError(e)
        }
    })?;
    Ok(PhotoHeader::from_le_bytes(bytes))
}

/// Read `height` rows of `width` pixels, `N` bytes each, stored bottom row
/// first, into a top-row-first grid.
pub(super) fn read_rows_bottom_up<R, T, const N: usize>(
    reader: &mut R,
    header: PhotoHeader,
    decode: impl Fn([u8; N]) -> T,
) -> Result<PixelGrid<T>>
where
    R: Read,
    T: Copy + Default,
{
    let width = header.width as usize;
    let height = header.height as usize;
    let mut grid = PixelGrid::filled(width, height, T::default())?;

    let mut row_bytes = Vec::new();
    row_bytes
        .try_reserve_exact(width * N)
        .map_err(|e| RoomError::exhausted("row buffer", e))?;
    row_bytes.resize(width * N, 0);

    for y in (0..height).rev() {
        reader.read_exact(&mut row_bytes).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                RoomError::malformed(format!(
                    "truncated pixel data in row {} of {}x{}",
                    y, width, height
                ))
            } else {
                RoomError::IoError(e)
            }
        })?;

        if let Some(row) = grid.row_mut(y) {
            for (dst, chunk) in row.iter_mut().zip(row_bytes.chunks_exact(N)) {
                let mut px = [0u8; N];
                px.copy_from_slice(chunk);
                *dst = decode(px);
            }
        }
    }

    Ok(grid)
}
