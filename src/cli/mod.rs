pub mod completions;
pub mod info;
pub mod palette;
pub mod render;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::ViewConfig;
use crate::error::Result;
use crate::output::{display_path, Printer};

/// roomview - Room photo quantizer and scanline compositor
#[derive(Parser, Debug)]
#[command(name = "roomview")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./roomview.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the header of a photo or sprite image, and photo colour statistics
    Info(info::InfoArgs),

    /// Quantize a photo and print its 192-colour palette
    Palette(palette::PaletteArgs),

    /// Composite one scroll window of a room and write it as PNG
    Render(render::RenderArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Load the configuration named on the command line, or the one in the
/// working directory, reporting which file was used.
pub fn load_config(explicit: Option<&Path>, printer: &Printer) -> Result<ViewConfig> {
    let (config, path) = ViewConfig::discover(explicit, Path::new("."))?;
    if let Some(path) = path {
        printer.info("Config", &display_path(&path));
    }
    Ok(config)
}
