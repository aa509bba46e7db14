//! End-to-end tests: files on disk through load, activate and fill.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use roomview::cli::render::{self, RenderArgs};
use roomview::output::Printer;
use roomview::types::{ObjectColor, PaletteEntry, PhotoHeader, RawColor};
use roomview::{
    load_image, load_photo, LoadOptions, PlacedSprite, RecordingSink, RenderContext, Room,
    RoomManifest, ViewConfig,
};

const T: u8 = ObjectColor::TRANSPARENT.0;

/// Write a photo file; `rows` are top row first, stored bottom row first.
fn write_photo(dir: &Path, name: &str, rows: &[Vec<RawColor>]) -> PathBuf {
    let header = PhotoHeader::new(rows[0].len() as u16, rows.len() as u16);
    let mut bytes = header.to_le_bytes().to_vec();
    for row in rows.iter().rev() {
        for px in row {
            bytes.extend_from_slice(&px.bits().to_le_bytes());
        }
    }
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Write a sprite image file; `rows` are top row first.
fn write_image(dir: &Path, name: &str, rows: &[&[u8]]) -> PathBuf {
    let header = PhotoHeader::new(rows[0].len() as u16, rows.len() as u16);
    let mut bytes = header.to_le_bytes().to_vec();
    for row in rows.iter().rev() {
        bytes.extend_from_slice(row);
    }
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// 4x4 grey photo with a 2x2 sprite at (1,1) whose first stored pixel is transparent.
fn overlap_room(dir: &TempDir) -> Room {
    let grey = RawColor::from_channels(5, 10, 5);
    let photo_path = write_photo(dir.path(), "grey.photo", &vec![vec![grey; 4]; 4]);
    // Header 2x2, then pixels in file order (bottom row first).
    let sprite_path = dir.path().join("corner.obj");
    std::fs::write(&sprite_path, [2, 0, 2, 0, T, 5, 5, 5]).unwrap();

    let options = LoadOptions::default();
    let photo = load_photo(&photo_path, &options).unwrap();
    let sprite = load_image(&sprite_path, &options).unwrap();

    let mut room = Room::new("overlap", Arc::new(photo));
    room.place(PlacedSprite::new(1, 1, Arc::new(sprite)));
    room
}

#[test]
fn overlap_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let room = Arc::new(overlap_room(&dir));
    assert_eq!(room.photo().palette().get(0), Some(PaletteEntry::new(10, 10, 10)));

    let mut sink = RecordingSink::default();
    let mut ctx = RenderContext::new();
    ctx.activate_room(Arc::clone(&room), &mut sink);

    let mut line = [0xFFu8; 4];
    ctx.fill_horizontal(0, 1, &mut line);
    insta::assert_snapshot!(format!("{:?}", line), @"[0, 5, 5, 0]");

    // The transparent pixel is the sprite's bottom-left, on line 2.
    ctx.fill_horizontal(0, 2, &mut line);
    assert_eq!(line, [0, 0, 5, 0]);

    ctx.fill_horizontal(0, 0, &mut line);
    assert_eq!(line, [0, 0, 0, 0]);

    let mut column = [0xFFu8; 4];
    ctx.fill_vertical(1, 0, &mut column);
    assert_eq!(column, [0, 5, 0, 0]);
    ctx.fill_vertical(2, 0, &mut column);
    assert_eq!(column, [0, 5, 5, 0]);
}

#[test]
fn activation_sends_photo_palette() {
    let dir = tempfile::tempdir().unwrap();
    let room = Arc::new(overlap_room(&dir));

    let mut sink = RecordingSink::default();
    let mut ctx = RenderContext::new();
    ctx.activate_room(Arc::clone(&room), &mut sink);

    let bytes = sink.last.unwrap();
    assert_eq!(sink.writes, 1);
    assert_eq!(bytes.len(), 192 * 3);
    assert_eq!(&bytes[..3], &[10, 10, 10]);
    assert_eq!(bytes, room.photo().palette().to_bytes());
}

#[test]
fn edges_yield_default_byte() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = RenderContext::new().with_palette_offset(64).unwrap();
    ctx.activate_room(Arc::new(overlap_room(&dir)), &mut RecordingSink::default());

    let mut one = [0xFFu8; 1];
    ctx.fill_horizontal(4, 0, &mut one);
    assert_eq!(one, [0]);
    ctx.fill_horizontal(-1, 0, &mut one);
    assert_eq!(one, [0]);
    ctx.fill_vertical(0, 4, &mut one);
    assert_eq!(one, [0]);

    // In-bounds photo bytes carry the offset.
    ctx.fill_horizontal(0, 0, &mut one);
    assert_eq!(one, [64]);
}

#[test]
fn switching_rooms_changes_lines() {
    let dir = tempfile::tempdir().unwrap();
    let first = Arc::new(overlap_room(&dir));

    let red = RawColor::from_channels(31, 0, 0);
    let blue = RawColor::from_channels(0, 0, 31);
    let path = write_photo(dir.path(), "split.photo", &[vec![red, red, blue, blue]]);
    let photo = load_photo(&path, &LoadOptions::default()).unwrap();
    let second = Arc::new(Room::new("split", Arc::new(photo)));

    let mut sink = RecordingSink::default();
    let mut ctx = RenderContext::new();
    ctx.activate_room(first, &mut sink);
    ctx.activate_room(Arc::clone(&second), &mut sink);
    assert_eq!(sink.writes, 2);
    assert_eq!(ctx.active_room().map(|r| r.name()), Some("split"));

    let mut line = [0u8; 4];
    ctx.fill_horizontal(0, 0, &mut line);
    // Equal counts: blue has the lower fine key, so it takes slot 0.
    assert_eq!(line, [1, 1, 0, 0]);
}

#[test]
fn manifest_builds_room_with_shared_images() {
    let dir = tempfile::tempdir().unwrap();
    let grey = RawColor::from_channels(5, 10, 5);
    write_photo(dir.path(), "hall.photo", &vec![vec![grey; 8]; 2]);
    write_image(dir.path(), "dot.obj", &[&[9]]);
    let manifest_path = dir.path().join("hall.room.yaml");
    std::fs::write(
        &manifest_path,
        "photo: hall.photo\nsprites:\n  - {image: dot.obj, x: 1, y: 0}\n  - {image: dot.obj, x: 6, y: 1}\n",
    )
    .unwrap();

    let manifest = RoomManifest::load(&manifest_path).unwrap();
    assert_eq!(manifest.name, "hall");
    let room = manifest.build(&LoadOptions::default()).unwrap();
    assert_eq!(room.sprite_count(), 2);

    let sprites: Vec<_> = room.sprites().collect();
    assert!(Arc::ptr_eq(&sprites[0].image, &sprites[1].image));

    let mut ctx = RenderContext::new();
    ctx.activate_room(Arc::new(room), &mut RecordingSink::default());
    let mut line = [0xFFu8; 8];
    ctx.fill_horizontal(0, 1, &mut line);
    assert_eq!(line, [0, 0, 0, 0, 0, 0, 9, 0]);
}

#[test]
fn render_command_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let white = RawColor::from_channels(31, 63, 31);
    write_photo(dir.path(), "lit.photo", &vec![vec![white; 4]; 4]);
    write_image(dir.path(), "lamp.obj", &[&[0x3F]]);
    let manifest_path = dir.path().join("lit.room.yaml");
    std::fs::write(
        &manifest_path,
        "photo: lit.photo\nsprites:\n  - {image: lamp.obj, x: 0, y: 0}\n",
    )
    .unwrap();

    let config = ViewConfig::parse("scroll_width: 6\nscroll_height: 4\n").unwrap();
    let output = dir.path().join("out").join("lit.png");
    let args = RenderArgs {
        room: manifest_path,
        x: -1,
        y: 0,
        output: Some(output.clone()),
        scale: 2,
        vertical: true,
    };
    render::run(args, &config, &Printer::plain()).unwrap();

    let img = image::open(&output).unwrap().to_rgba8();
    assert_eq!((img.width(), img.height()), (12, 8));
    // Off-photo column is object colour 0 (black).
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
    // The lamp is object colour 0x3F (white).
    assert_eq!(img.get_pixel(2, 0).0, [255, 255, 255, 255]);
    // Photo pixels go through the quantized palette at offset 64.
    assert_eq!(img.get_pixel(4, 4).0, [251, 255, 251, 255]);
}

#[test]
fn missing_sprite_image_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let grey = RawColor::from_channels(5, 10, 5);
    write_photo(dir.path(), "bare.photo", &[vec![grey; 2]]);
    let manifest_path = dir.path().join("bare.room.yaml");
    std::fs::write(
        &manifest_path,
        "photo: bare.photo\nsprites:\n  - {image: gone.obj, x: 0, y: 0}\n",
    )
    .unwrap();

    let manifest = RoomManifest::load(&manifest_path).unwrap();
    let err = manifest.build(&LoadOptions::default()).unwrap_err();
    assert!(matches!(err, roomview::RoomError::NotFound { .. }));
}
