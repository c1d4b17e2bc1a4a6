use std::fmt::Write as _;

use gg_core::charset::{BlockLevels, RampLut, SheetFormat};
use gg_core::error::CoreError;
use gg_core::frame::{Grid, Rgb};

/// Header line of the `rgb` layout.
pub const RGB_HEADER: &str = "R,G,B";

/// Quantize every cell's brightness against the block ramp for `levels`.
///
/// # Example
/// ```
/// use gg_core::charset::BlockLevels;
/// use gg_core::frame::{Grid, Rgb};
/// use gg_encode::sheet::quantize_blocks;
///
/// let grid = Grid::from_cells(2, 1, vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
/// let blocks = quantize_blocks(&grid, BlockLevels::new(5).unwrap(), false);
/// assert_eq!(blocks.cells, vec!["", "█"]);
/// ```
#[must_use]
pub fn quantize_blocks(
    grid: &Grid<Rgb>,
    levels: BlockLevels,
    invert: bool,
) -> Grid<&'static str> {
    let lut = RampLut::new(levels.ramp(), invert);
    grid.map(|c| lut.map(c.brightness()))
}

/// Spreadsheet emitter.
///
/// `blocks` and `hex` keep the grid shape (cells joined by `,`, one line
/// per row). `rgb` writes a `R,G,B` header then one pixel per line.
/// Every line ends with `\n`.
///
/// # Errors
/// `CoreError::UnsupportedLevel` when `format` is `blocks` and
/// `block_levels` is outside 2..=5.
///
/// # Example
/// ```
/// use gg_core::charset::SheetFormat;
/// use gg_core::frame::{Grid, Rgb};
/// use gg_encode::sheet::encode_sheet;
///
/// let grid = Grid::new(2, 1, Rgb::new(255, 0, 16));
/// assert_eq!(encode_sheet(&grid, SheetFormat::Hex, 5, false).unwrap(), "#ff0010,#ff0010\n");
/// assert_eq!(
///     encode_sheet(&grid, SheetFormat::Rgb, 5, false).unwrap(),
///     "R,G,B\n255,0,16\n255,0,16\n"
/// );
/// ```
pub fn encode_sheet(
    grid: &Grid<Rgb>,
    format: SheetFormat,
    block_levels: u8,
    invert: bool,
) -> Result<String, CoreError> {
    log::debug!(
        "Tableur {}×{} format={format} niveaux={block_levels} invert={invert}",
        grid.width,
        grid.height
    );
    match format {
        SheetFormat::Blocks => {
            let blocks = quantize_blocks(grid, BlockLevels::new(block_levels)?, invert);
            Ok(join_rows(&blocks, |out, cell| out.push_str(cell)))
        }
        SheetFormat::Hex => Ok(join_rows(grid, |out, c| out.push_str(&c.to_hex()))),
        SheetFormat::Rgb => {
            let mut out = String::with_capacity(grid.cells.len() * 12 + RGB_HEADER.len() + 1);
            out.push_str(RGB_HEADER);
            out.push('\n');
            for c in &grid.cells {
                let _ = writeln!(out, "{},{},{}", c.r, c.g, c.b);
            }
            Ok(out)
        }
    }
}

fn join_rows<T>(grid: &Grid<T>, mut write_cell: impl FnMut(&mut String, &T)) -> String {
    let mut out = String::new();
    for row in grid.rows() {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            write_cell(&mut out, cell);
        }
        out.push('\n');
    }
    out
}
