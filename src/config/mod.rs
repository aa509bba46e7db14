//! Viewer configuration (roomview.yaml).
//!
//! Everything has a default, so an absent or empty file is valid.

mod manifest;

pub use manifest::{RoomManifest, SpriteDef};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RoomError, Result};
use crate::loader::LoadOptions;
use crate::room::check_palette_offset;
use crate::types::palette::MAX_PALETTE_OFFSET;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "roomview.yaml";

/// Viewer configuration loaded from roomview.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Width of the scrolling window in pixels.
    #[serde(default = "default_scroll_width")]
    pub scroll_width: usize,

    /// Height of the scrolling window in pixels (the status bar is not included).
    #[serde(default = "default_scroll_height")]
    pub scroll_height: usize,

    /// Display slot where photo colours start; 64 leaves room for the object colours.
    #[serde(default = "default_palette_offset")]
    pub palette_offset: u8,

    /// Loader limits and palette mode.
    #[serde(default)]
    pub load: LoadOptions,
}

fn default_scroll_width() -> usize {
    320
}

fn default_scroll_height() -> usize {
    182
}

fn default_palette_offset() -> u8 {
    MAX_PALETTE_OFFSET
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            scroll_width: default_scroll_width(),
            scroll_height: default_scroll_height(),
            palette_offset: default_palette_offset(),
            load: LoadOptions::default(),
        }
    }
}

impl ViewConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RoomError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(content).map_err(|e| RoomError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILE)),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Use `explicit` if given, else `roomview.yaml` in `dir` if present, else defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            Ok((Self::load(&candidate)?, Some(candidate)))
        } else {
            Ok((Self::default(), None))
        }
    }

    /// Reject settings the display cannot represent.
    pub fn validate(&self) -> Result<()> {
        check_palette_offset(self.palette_offset)?;
        if self.scroll_width == 0 || self.scroll_height == 0 {
            return Err(RoomError::Parse {
                message: format!(
                    "scroll window must be non-empty, got {}x{}",
                    self.scroll_width, self.scroll_height
                ),
                help: None,
            });
        }
        Ok(())
    }
}
