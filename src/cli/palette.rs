//! Palette command implementation.
//!
//! Quantizes a photo and lists the palette it would load, fine region
//! first, then the 64 coarse slots.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::config::ViewConfig;
use crate::error::{Result, RoomError};
use crate::loader::load_raw_photo;
use crate::output::{display_path, plural, Printer};
use crate::quantize::quantize;
use crate::types::palette::{COARSE_BASE, FINE_SLOTS};
use crate::types::{Palette, PaletteEntry};

/// Quantize a photo and print its 192-colour palette
#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Photo file to quantize
    #[arg(required = true)]
    pub file: PathBuf,

    /// Maximum number of colours to output
    #[arg(long)]
    pub max: Option<usize>,

    /// Print a JSON array instead of `$name: #RRGGBB` lines
    #[arg(long)]
    pub json: bool,
}

/// One listed palette slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotLine {
    pub name: String,
    pub slot: usize,
    pub colour: String,
    pub rgb6: [u8; 3],
}

impl SlotLine {
    fn new(name: String, slot: usize, entry: PaletteEntry) -> Self {
        Self {
            name,
            slot,
            colour: entry.to_string(),
            rgb6: entry.to_array(),
        }
    }
}

/// Occupied fine slots (`$fine-1..`) followed by every coarse slot (`$coarse-0..63`).
pub fn palette_lines(palette: &Palette, fine_used: usize) -> Vec<SlotLine> {
    let fine = palette
        .fine()
        .iter()
        .take(fine_used.min(FINE_SLOTS))
        .enumerate()
        .map(|(i, &entry)| SlotLine::new(format!("fine-{}", i + 1), i, entry));
    let coarse = palette
        .coarse()
        .iter()
        .enumerate()
        .map(|(key, &entry)| SlotLine::new(format!("coarse-{}", key), COARSE_BASE + key, entry));
    fine.chain(coarse).collect()
}

pub fn run(args: PaletteArgs, config: &ViewConfig, printer: &Printer) -> Result<()> {
    let path = &args.file;
    let raw = load_raw_photo(path, &config.load)?;
    let quantized = quantize(&raw)?;

    let mut lines = palette_lines(&quantized.palette, quantized.stats.fine_buckets_used);
    if let Some(max) = args.max {
        lines.truncate(max);
    }

    printer.status(
        "Quantized",
        &format!(
            "{} from {}",
            plural(lines.len(), "colour", "colours"),
            display_path(path)
        ),
    );

    if args.json {
        let json = serde_json::to_string_pretty(&lines).map_err(|e| RoomError::Render {
            message: format!("Failed to serialize palette: {}", e),
            help: None,
        })?;
        println!("{}", json);
    } else {
        for line in &lines {
            println!("${}: {}", line.name, line.colour);
        }
    }

    Ok(())
}
