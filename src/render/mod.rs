//! Rendering module for roomview.
//!
//! `scanline` is the per-frame hot path; `frame` and `png` build whole
//! windows on top of it for previews.

mod frame;
mod png;
pub mod scanline;

pub use frame::{render_window, ScanOrder};
pub use png::{frame_to_image, write_png};
pub use scanline::{fill_horizontal, fill_vertical, DEFAULT_PIXEL};
