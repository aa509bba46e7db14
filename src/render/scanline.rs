//! Scanline compositor.
//!
//! Fills one horizontal or vertical line of display bytes from a room's
//! photo, then draws the room's sprites over it in placement order. Runs
//! once per displayed line, so it never allocates: the caller owns the
//! line buffer and its length is the line length.

use crate::room::Room;
use crate::types::palette::MAX_PALETTE_OFFSET;
use crate::types::ObjectColor;

/// Byte written where the line runs off the edge of the photo.
pub const DEFAULT_PIXEL: u8 = 0;

/// Fill `buf` with the horizontal line starting at map pixel (x, y).
///
/// In-bounds photo bytes have `palette_offset` added; off-photo positions
/// get `DEFAULT_PIXEL`. Sprite pixels are copied as-is unless transparent.
/// `palette_offset` must not exceed `MAX_PALETTE_OFFSET`; `RenderContext`
/// checks this when the offset is set.
pub fn fill_horizontal(room: &Room, x: i32, y: i32, palette_offset: u8, buf: &mut [u8]) {
    debug_assert!(palette_offset <= MAX_PALETTE_OFFSET);
    let (x, y) = (x as i64, y as i64);
    let len = buf.len() as i64;
    let photo = room.photo().indices();

    let row = if y >= 0 { photo.row(y as usize) } else { None };
    match row {
        Some(row) => {
            for (i, out) in buf.iter_mut().enumerate() {
                let px = x + i as i64;
                *out = if px >= 0 && (px as usize) < row.len() {
                    row[px as usize].wrapping_add(palette_offset)
                } else {
                    DEFAULT_PIXEL
                };
            }
        }
        None => buf.fill(DEFAULT_PIXEL),
    }

    for sprite in room.sprites() {
        let image = sprite.image.pixels();
        let (sx, sy) = (sprite.x as i64, sprite.y as i64);
        let (iw, ih) = (image.width() as i64, image.height() as i64);

        // Is the sprite off this line?
        if y < sy || y >= sy + ih || x + len <= sx || x >= sx + iw {
            continue;
        }

        let Some(sprite_row) = image.row((y - sy) as usize) else {
            continue;
        };

        // Clip whichever side of the sprite hangs past the line start.
        let (start, image_start) = if x <= sx {
            ((sx - x) as usize, 0)
        } else {
            (0, (x - sx) as usize)
        };

        for (out, &pixel) in buf[start..].iter_mut().zip(&sprite_row[image_start..]) {
            if !ObjectColor(pixel).is_transparent() {
                *out = pixel;
            }
        }
    }
}

/// Fill `buf` with the vertical line starting at map pixel (x, y) and
/// running downwards. Same rules as [`fill_horizontal`].
pub fn fill_vertical(room: &Room, x: i32, y: i32, palette_offset: u8, buf: &mut [u8]) {
    debug_assert!(palette_offset <= MAX_PALETTE_OFFSET);
    let (x, y) = (x as i64, y as i64);
    let len = buf.len() as i64;
    let photo = room.photo().indices();

    for (i, out) in buf.iter_mut().enumerate() {
        *out = match photo.get_signed(x, y + i as i64) {
            Some(index) => index.wrapping_add(palette_offset),
            None => DEFAULT_PIXEL,
        };
    }

    for sprite in room.sprites() {
        let image = sprite.image.pixels();
        let (sx, sy) = (sprite.x as i64, sprite.y as i64);
        let (iw, ih) = (image.width() as i64, image.height() as i64);

        if x < sx || x >= sx + iw || y + len <= sy || y >= sy + ih {
            continue;
        }

        let column = (x - sx) as usize;
        let (start, image_start) = if y <= sy {
            ((sy - y) as usize, 0)
        } else {
            (0, (y - sy) as usize)
        };

        for (out, image_y) in buf[start..].iter_mut().zip(image_start..image.height()) {
            if let Some(pixel) = image.get(column, image_y) {
                if !ObjectColor(pixel).is_transparent() {
                    *out = pixel;
                }
            }
        }
    }
}
