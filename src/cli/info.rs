//! Info command implementation.
//!
//! Prints a file's header and, for photos, how the quantizer saw it.

use std::path::PathBuf;

use clap::Args;

use crate::config::ViewConfig;
use crate::error::Result;
use crate::loader::{load_image, load_raw_photo, read_file_header};
use crate::output::{dimensions, display_path, plural, Printer};
use crate::quantize::{quantize, COARSE_KEYS, FINE_KEYS};
use crate::types::palette::FINE_SLOTS;

/// Show the header of a photo or sprite image, and photo colour statistics
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Photo or sprite image file
    #[arg(required = true)]
    pub file: PathBuf,

    /// Treat the file as a sprite image (one byte per pixel)
    #[arg(long)]
    pub sprite: bool,
}

pub fn run(args: InfoArgs, config: &ViewConfig, printer: &Printer) -> Result<()> {
    let path = &args.file;
    let header = read_file_header(path)?;
    printer.info(
        "Header",
        &format!(
            "{} is {}",
            display_path(path),
            dimensions(header.width as usize, header.height as usize)
        ),
    );

    if args.sprite {
        let image = load_image(path, &config.load)?;
        let transparent = image.pixels().len() - image.opaque_pixels();
        println!("width: {}", image.width());
        println!("height: {}", image.height());
        println!("opaque: {}", image.opaque_pixels());
        println!("transparent: {}", transparent);
        return Ok(());
    }

    let raw = load_raw_photo(path, &config.load)?;
    let stats = quantize(&raw)?.stats;

    println!("width: {}", raw.width());
    println!("height: {}", raw.height());
    println!("pixels: {}", stats.pixels);
    println!("fine buckets: {}/{}", stats.fine_buckets_used, FINE_KEYS);
    println!("coarse buckets: {}/{}", stats.coarse_buckets_used, COARSE_KEYS);
    println!("fine coverage: {:.1}%", stats.fine_ratio() * 100.0);

    if stats.fine_buckets_used > FINE_SLOTS {
        printer.warning(
            "Reduced",
            &format!(
                "{} fell back to coarse colours",
                plural(stats.pixels - stats.fine_coverage, "pixel", "pixels")
            ),
        );
    }

    Ok(())
}
