use gg_core::charset::{Charset, RampLut};
use gg_core::frame::{Grid, Rgb};

/// Quantize every cell's brightness against `charset`.
///
/// # Example
/// ```
/// use gg_core::charset::Charset;
/// use gg_core::frame::{Grid, Rgb};
/// use gg_encode::ascii::quantize_ascii;
///
/// let grid = Grid::new(2, 1, Rgb::new(255, 255, 255));
/// let chars = quantize_ascii(&grid, Charset::Simple, false);
/// assert_eq!(chars.cells, vec!['@', '@']);
/// ```
#[must_use]
pub fn quantize_ascii(grid: &Grid<Rgb>, charset: Charset, invert: bool) -> Grid<char> {
    let lut = RampLut::new(charset.chars(), invert);
    grid.map(|c| lut.map(c.brightness()))
}

/// Join a character grid into text, each row followed by `\n`.
#[must_use]
pub fn render_ascii(grid: &Grid<char>) -> String {
    let mut out = String::with_capacity(grid.cells.len() * 2 + usize::from(grid.height));
    for row in grid.rows() {
        out.extend(row.iter());
        out.push('\n');
    }
    out
}

/// ASCII-art emitter: quantize then render.
///
/// # Example
/// ```
/// use gg_core::charset::Charset;
/// use gg_core::frame::{Grid, Rgb};
/// use gg_encode::ascii::encode_ascii;
///
/// let grid = Grid::new(2, 2, Rgb::new(255, 255, 255));
/// assert_eq!(encode_ascii(&grid, Charset::Simple, true), "  \n  \n");
/// ```
#[must_use]
pub fn encode_ascii(grid: &Grid<Rgb>, charset: Charset, invert: bool) -> String {
    log::debug!(
        "ASCII {}×{} charset={charset} invert={invert}",
        grid.width,
        grid.height
    );
    render_ascii(&quantize_ascii(grid, charset, invert))
}
