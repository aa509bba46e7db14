//! Full-window compositing built from scanlines.

use crate::error::Result;
use crate::room::RenderContext;
use crate::types::PixelGrid;

/// Which line fill builds the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOrder {
    /// One `fill_horizontal` per row.
    #[default]
    Rows,
    /// One `fill_vertical` per column.
    Columns,
}

/// Composite a `width x height` window whose top-left map pixel is (x, y).
///
/// Both scan orders produce the same bytes; columns exercise the vertical
/// fill the way a vertical scroll would.
pub fn render_window(
    ctx: &RenderContext,
    x: i32,
    y: i32,
    width: usize,
    height: usize,
    order: ScanOrder,
) -> Result<PixelGrid<u8>> {
    let mut frame = PixelGrid::filled(width, height, 0u8)?;

    match order {
        ScanOrder::Rows => {
            for row in 0..height {
                if let Some(line) = frame.row_mut(row) {
                    ctx.fill_horizontal(x, y.saturating_add(row as i32), line);
                }
            }
        }
        ScanOrder::Columns => {
            let mut column = vec![0u8; height];
            for col in 0..width {
                ctx.fill_vertical(x.saturating_add(col as i32), y, &mut column);
                for (row, &byte) in column.iter().enumerate() {
                    frame.set(col, row, byte);
                }
            }
        }
    }

    Ok(frame)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::room::{PlacedSprite, RecordingSink, Room};
    use crate::types::{Palette, Photo, PhotoHeader, SpriteImage};

    fn context() -> RenderContext {
        let indices = PixelGrid::from_vec(5, 3, (0..15).collect()).unwrap();
        let photo = Photo::new(
            PhotoHeader::new(5, 3),
            Palette::black(),
            indices,
            PixelGrid::filled(5, 3, 0).unwrap(),
        )
        .unwrap();
        let mut room = Room::new("window", Arc::new(photo));
        let sprite = SpriteImage::from_rows(&[&[50, 0x40], &[51, 52]]).unwrap();
        room.place(PlacedSprite::new(3, 1, Arc::new(sprite)));

        let mut ctx = RenderContext::new();
        ctx.activate_room(Arc::new(room), &mut RecordingSink::default());
        ctx
    }

    #[test]
    fn test_rows_and_columns_agree() {
        let ctx = context();
        let rows = render_window(&ctx, -1, -1, 7, 5, ScanOrder::Rows).unwrap();
        let cols = render_window(&ctx, -1, -1, 7, 5, ScanOrder::Columns).unwrap();
        assert_eq!(rows, cols);
    }

    #[test]
    fn test_window_contents() {
        let ctx = context();
        let frame = render_window(&ctx, 2, 1, 3, 2, ScanOrder::Rows).unwrap();
        assert_eq!(frame.as_slice(), &[7, 50, 9, 12, 51, 52]);
    }
}
