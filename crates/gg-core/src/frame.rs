use crate::quantize::brightness;

/// Decoded source image. Read-only to the conversion stages.
///
/// Stocke les pixels en RGBA row-major, 4 bytes par pixel.
///
/// # Example
/// ```
/// use gg_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer noir transparent aux dimensions données.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Buffer filled with one opaque color.
    ///
    /// # Example
    /// ```
    /// use gg_core::frame::{FrameBuffer, Rgb};
    /// let fb = FrameBuffer::filled(2, 2, Rgb::new(255, 255, 255));
    /// assert_eq!(fb.pixel(1, 1), (255, 255, 255, 255));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let mut fb = Self::new(width, height);
        for px in fb.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, 255]);
        }
        fb
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        if idx + 3 >= self.data.len() {
            return (0, 0, 0, 0);
        }
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// True when either dimension is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Raw cell color before quantization. Alpha is dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unweighted channel mean, see [`brightness`].
    #[inline(always)]
    #[must_use]
    pub fn brightness(self) -> u8 {
        brightness(self.r, self.g, self.b)
    }

    /// `#rrggbb`, lowercase.
    ///
    /// # Example
    /// ```
    /// use gg_core::frame::Rgb;
    /// assert_eq!(Rgb::new(255, 0, 10).to_hex(), "#ff000a");
    /// ```
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Row-major grid of cells with a constant row length.
///
/// `Grid<Rgb>` is the sampler output; `Grid<char>` and `Grid<&str>` are the
/// quantized views built by the emitters.
///
/// # Example
/// ```
/// use gg_core::frame::Grid;
/// let grid = Grid::from_cells(3, 2, vec!['.', '.', '.', '.', '.', '#']).unwrap();
/// assert_eq!(*grid.get(2, 1), '#');
/// assert_eq!(grid.rows().count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    /// Flat array of cells, row-major.
    pub cells: Vec<T>,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl<T: Clone> Grid<T> {
    /// Grid of `width × height` copies of `fill`.
    #[must_use]
    pub fn new(width: u16, height: u16, fill: T) -> Self {
        Self {
            cells: vec![fill; width as usize * height as usize],
            width,
            height,
        }
    }
}

impl<T> Grid<T> {
    /// Wrap an existing row-major buffer.
    ///
    /// Returns `None` if `cells.len()` is not `width × height`.
    #[must_use]
    pub fn from_cells(width: u16, height: u16, cells: Vec<T>) -> Option<Self> {
        (cells.len() == width as usize * height as usize).then_some(Self {
            cells,
            width,
            height,
        })
    }

    /// Get a cell reference at position (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> &T {
        &self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Rows, top to bottom. Yields nothing for a zero-width grid.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(usize::from(self.width).max(1))
    }

    /// Per-cell transform keeping the shape.
    #[must_use]
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            cells: self.cells.iter().map(f).collect(),
            width: self.width,
            height: self.height,
        }
    }
}
