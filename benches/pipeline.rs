//! Benchmarks for the roomview pipeline.

use std::io::Cursor;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use roomview::types::{PhotoHeader, PixelGrid, RawColor, SpriteImage};
use roomview::{quantize, read_photo, LoadOptions, PlacedSprite, RecordingSink, RenderContext, Room};

/// A gradient photo with plenty of distinct fine colours.
fn gradient(width: usize, height: usize) -> PixelGrid<RawColor> {
    let data = (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            RawColor::from_channels((x % 32) as u8, ((x + y) % 64) as u8, (y % 32) as u8)
        })
        .collect();
    PixelGrid::from_vec(width, height, data).unwrap()
}

fn photo_file(raw: &PixelGrid<RawColor>) -> Vec<u8> {
    let header = PhotoHeader::new(raw.width() as u16, raw.height() as u16);
    let mut bytes = header.to_le_bytes().to_vec();
    for y in (0..raw.height()).rev() {
        for px in raw.row(y).unwrap() {
            bytes.extend_from_slice(&px.bits().to_le_bytes());
        }
    }
    bytes
}

fn context() -> RenderContext {
    let bytes = photo_file(&gradient(640, 200));
    let photo = read_photo(&mut Cursor::new(bytes), &LoadOptions::default()).unwrap();
    let mut room = Room::new("bench", Arc::new(photo));

    let row: Vec<u8> = (0..32u8).map(|i| if i % 3 == 0 { 0x40 } else { i }).collect();
    let rows: Vec<&[u8]> = (0..24).map(|_| row.as_slice()).collect();
    let sprite = Arc::new(SpriteImage::from_rows(&rows).unwrap());
    for i in 0..8 {
        room.place(PlacedSprite::new(i * 70 - 10, (i * 23) % 180, Arc::clone(&sprite)));
    }

    let mut ctx = RenderContext::new().with_palette_offset(64).unwrap();
    ctx.activate_room(Arc::new(room), &mut RecordingSink::default());
    ctx
}

// -- Quantization benchmarks --

fn bench_quantize(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantize");

    for (width, height) in [(64, 64), (320, 200), (640, 400)] {
        let raw = gradient(width, height);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", width, height)),
            &raw,
            |b, raw| b.iter(|| quantize(black_box(raw)).unwrap()),
        );
    }

    let bytes = photo_file(&gradient(320, 200));
    group.bench_function("load_320x200", |b| {
        b.iter(|| read_photo(&mut Cursor::new(black_box(&bytes)), &LoadOptions::default()).unwrap())
    });

    group.finish();
}

// -- Compositing benchmarks --

fn bench_scanlines(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanlines");
    let ctx = context();

    let mut line = vec![0u8; 320];
    group.bench_function("fill_horizontal_320", |b| {
        b.iter(|| {
            for y in 0..182 {
                ctx.fill_horizontal(black_box(100), y, &mut line);
            }
        })
    });

    let mut column = vec![0u8; 182];
    group.bench_function("fill_vertical_182", |b| {
        b.iter(|| {
            for x in 0..320 {
                ctx.fill_vertical(x, black_box(0), &mut column);
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_quantize, bench_scanlines);
criterion_main!(benches);
