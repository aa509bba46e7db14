//! Render command implementation.
//!
//! Loads a room manifest, activates the room and writes one scroll window
//! as a PNG preview.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use crate::config::{RoomManifest, ViewConfig};
use crate::error::{Result, RoomError};
use crate::output::{dimensions, display_path, plural, Printer};
use crate::render::{render_window, write_png, ScanOrder};
use crate::room::{RecordingSink, RenderContext};
use crate::types::{DisplayPalette, Palette};

/// Composite one scroll window of a room and write it as PNG
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Room manifest (*.room.yaml)
    #[arg(required = true)]
    pub room: PathBuf,

    /// Map x of the window's left edge
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub x: i32,

    /// Map y of the window's top edge
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub y: i32,

    /// Output PNG (defaults to <room>.png in the working directory)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Scale factor for output (integer upscaling)
    #[arg(long, default_value = "1")]
    pub scale: u32,

    /// Build the window column by column instead of row by row
    #[arg(long)]
    pub vertical: bool,
}

pub fn run(args: RenderArgs, config: &ViewConfig, printer: &Printer) -> Result<()> {
    let manifest = RoomManifest::load(&args.room)?;
    printer.status(
        "Loading",
        &format!(
            "{} ({})",
            manifest.name,
            plural(manifest.sprites.len(), "sprite", "sprites")
        ),
    );

    let room = Arc::new(manifest.build(&config.load)?);

    let mut sink = RecordingSink::default();
    let mut ctx = RenderContext::new().with_palette_offset(config.palette_offset)?;
    ctx.activate_room(Arc::clone(&room), &mut sink);

    // The preview shows the colours activation actually sent to the display.
    let sent = sink.last.as_deref().ok_or_else(|| RoomError::Render {
        message: format!("activating '{}' sent no palette", room.name()),
        help: None,
    })?;
    let palette = DisplayPalette::new(&Palette::from_bytes(sent)?, ctx.palette_offset());

    let order = if args.vertical {
        ScanOrder::Columns
    } else {
        ScanOrder::Rows
    };
    let frame = render_window(
        &ctx,
        args.x,
        args.y,
        config.scroll_width,
        config.scroll_height,
        order,
    )?;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.png", room.name())));
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| RoomError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    write_png(&frame, &palette, &output, args.scale)?;

    printer.status(
        "Rendered",
        &format!(
            "{} at ({}, {}) -> {}",
            dimensions(frame.width(), frame.height()),
            args.x,
            args.y,
            printer.cyan(&display_path(&output))
        ),
    );

    Ok(())
}
