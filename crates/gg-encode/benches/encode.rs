use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use gg_core::charset::{Charset, SheetFormat};
use gg_core::dos::DosMode;
use gg_core::frame::{Grid, Rgb};
use gg_encode::{encode_ascii, encode_asm, encode_sheet};

fn noise_grid(width: u16, height: u16) -> Grid<Rgb> {
    let cells = (0..u32::from(width) * u32::from(height))
        .map(|i| {
            let v = i.wrapping_mul(2_654_435_761) >> 8;
            Rgb::new(v as u8, (v >> 8) as u8, (v >> 16) as u8)
        })
        .collect();
    Grid::from_cells(width, height, cells).unwrap_or_else(|| Grid::new(width, height, Rgb::default()))
}

fn bench_encoders(c: &mut Criterion) {
    let grid = noise_grid(120, 60);
    let sheet_grid = noise_grid(100, 50);

    c.bench_function("ascii_120x60_detailed", |b| {
        b.iter(|| encode_ascii(black_box(&grid), Charset::Detailed, true));
    });

    c.bench_function("sheet_100x50_blocks", |b| {
        b.iter(|| encode_sheet(black_box(&sheet_grid), SheetFormat::Blocks, 5, true));
    });

    c.bench_function("sheet_100x50_hex", |b| {
        b.iter(|| encode_sheet(black_box(&sheet_grid), SheetFormat::Hex, 5, true));
    });

    let csv = encode_sheet(&sheet_grid, SheetFormat::Blocks, 5, true).unwrap_or_default();
    c.bench_function("asm_100x50_auto", |b| {
        b.iter(|| encode_asm(black_box(&csv), DosMode::Auto, true));
    });
}

criterion_group!(benches, bench_encoders);
criterion_main!(benches);
