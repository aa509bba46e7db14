//! Room manifest (*.room.yaml) parsing.
//!
//! A manifest names a photo and the sprites placed over it. Relative paths
//! are resolved against the manifest's own directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{RoomError, Result};
use crate::loader::{load_image, load_photo, LoadOptions};
use crate::room::{PlacedSprite, Room};
use crate::types::SpriteImage;

/// One room as described on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomManifest {
    /// Room name (defaults to the file stem).
    #[serde(default)]
    pub name: String,

    /// Photo file for the background.
    pub photo: PathBuf,

    /// Sprites in draw order (later entries cover earlier ones).
    #[serde(default)]
    pub sprites: Vec<SpriteDef>,
}

/// A sprite placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteDef {
    pub image: PathBuf,
    pub x: i32,
    pub y: i32,
}

impl RoomManifest {
    /// Load a manifest and resolve its paths relative to the file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RoomError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                RoomError::Io {
                    path: path.to_path_buf(),
                    message: format!("Failed to read room manifest: {}", e),
                }
            }
        })?;

        let mut manifest = Self::parse(&content)?;
        if manifest.name.is_empty() {
            manifest.name = room_name_from_path(path);
        }
        if let Some(base) = path.parent() {
            manifest.resolve_paths(base);
        }
        Ok(manifest)
    }

    /// Parse a manifest from a YAML string. Paths are left as written.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| RoomError::Parse {
            message: format!("Invalid room manifest: {}", e),
            help: Some("A room needs at least a `photo:` entry".to_string()),
        })
    }

    /// Make relative paths relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        self.photo = resolve(base, &self.photo);
        for sprite in &mut self.sprites {
            sprite.image = resolve(base, &sprite.image);
        }
    }

    /// Load the photo and every sprite image and assemble the room.
    ///
    /// An image used by several placements is loaded once and shared.
    pub fn build(&self, options: &LoadOptions) -> Result<Room> {
        let photo = load_photo(&self.photo, options)?;
        let mut room = Room::new(self.name.clone(), Arc::new(photo));

        let mut images: HashMap<&Path, Arc<SpriteImage>> = HashMap::new();
        for def in &self.sprites {
            let image = match images.get(def.image.as_path()) {
                Some(image) => Arc::clone(image),
                None => {
                    let image = Arc::new(load_image(&def.image, options)?);
                    images.insert(def.image.as_path(), Arc::clone(&image));
                    image
                }
            };
            room.place(PlacedSprite::new(def.x, def.y, image));
        }

        debug!(
            "built room '{}': {} placements, {} distinct images",
            room.name(),
            room.sprite_count(),
            images.len()
        );
        Ok(room)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// `hall.room.yaml` -> `hall`.
fn room_name_from_path(path: &Path) -> String {
    let stem = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("room");
    stem.split('.').next().unwrap_or(stem).to_string()
}
