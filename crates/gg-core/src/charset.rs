use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::quantize::quantize;

/// 10 caractères — compact, bon contraste.
pub const RAMP_SIMPLE: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// 70 caractères — Paul Bourke, résolution maximale.
pub const RAMP_DETAILED: &[char] = &[
    ' ', '.', '\'', '`', '^', '"', ',', ':', ';', 'I', 'l', '!', 'i', '>', '<', '~', '+', '_',
    '-', '?', ']', '[', '}', '{', '1', ')', '(', '|', '\\', '/', 't', 'f', 'j', 'r', 'x', 'n',
    'u', 'v', 'c', 'z', 'X', 'Y', 'U', 'J', 'C', 'L', 'Q', '0', 'O', 'Z', 'm', 'w', 'q', 'p',
    'd', 'b', 'k', 'h', 'a', 'o', '*', '#', 'M', 'W', '&', '8', '%', 'B', '@', '$',
];

/// Blocs Unicode — pseudo-pixels.
pub const RAMP_BLOCKS: &[char] = &[' ', '░', '▒', '▓', '█'];

/// Points, du vide au disque plein.
pub const RAMP_DOTS: &[char] = &[' ', '·', '•', '●'];

/// Spreadsheet block ramp. Index 0 is the empty cell.
pub const SHEET_BLOCKS: [&str; 5] = ["", "░", "▒", "▓", "█"];

const SHEET_BLOCKS_2: [&str; 2] = ["", "█"];
const SHEET_BLOCKS_3: [&str; 3] = ["", "░", "█"];
const SHEET_BLOCKS_4: [&str; 4] = ["", "░", "▒", "█"];

/// Named ASCII ramp used by the ASCII emitter.
///
/// # Example
/// ```
/// use gg_core::charset::Charset;
/// let cs: Charset = "dots".parse().unwrap();
/// assert_eq!(cs.chars().len(), 4);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Charset {
    /// ` .:-=+*#%@`
    #[default]
    Simple,
    /// 70-character ramp.
    Detailed,
    /// Shade blocks plus space.
    Blocks,
    /// Dots plus space.
    Dots,
}

impl Charset {
    /// All ramps, in menu order.
    pub const ALL: [Charset; 4] = [
        Charset::Simple,
        Charset::Detailed,
        Charset::Blocks,
        Charset::Dots,
    ];

    /// Characters ordered lightest→densest.
    #[must_use]
    pub fn chars(self) -> &'static [char] {
        match self {
            Charset::Simple => RAMP_SIMPLE,
            Charset::Detailed => RAMP_DETAILED,
            Charset::Blocks => RAMP_BLOCKS,
            Charset::Dots => RAMP_DOTS,
        }
    }

    /// Name used in config files and on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Charset::Simple => "simple",
            Charset::Detailed => "detailed",
            Charset::Blocks => "blocks",
            Charset::Dots => "dots",
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Charset::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                CoreError::Config(format!(
                    "charset inconnu '{s}' (simple, detailed, blocks, dots)"
                ))
            })
    }
}

/// Cell encoding of the spreadsheet emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetFormat {
    /// Shade glyphs, one per cell.
    #[default]
    Blocks,
    /// `#rrggbb` per cell.
    Hex,
    /// Header `R,G,B` then one pixel per line.
    Rgb,
}

impl SheetFormat {
    /// Name used in config files, on the command line and in file names.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SheetFormat::Blocks => "blocks",
            SheetFormat::Hex => "hex",
            SheetFormat::Rgb => "rgb",
        }
    }
}

impl fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SheetFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blocks" => Ok(SheetFormat::Blocks),
            "hex" => Ok(SheetFormat::Hex),
            "rgb" => Ok(SheetFormat::Rgb),
            _ => Err(CoreError::Config(format!(
                "format inconnu '{s}' (blocks, hex, rgb)"
            ))),
        }
    }
}

/// Validated number of spreadsheet shade levels (2 to 5).
///
/// # Example
/// ```
/// use gg_core::charset::BlockLevels;
/// let levels = BlockLevels::new(3).unwrap();
/// assert_eq!(levels.ramp(), &["", "░", "█"]);
/// assert!(BlockLevels::new(6).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockLevels(u8);

impl BlockLevels {
    /// # Errors
    /// Returns `CoreError::UnsupportedLevel` outside 2..=5.
    pub fn new(levels: u8) -> Result<Self, CoreError> {
        if (2..=5).contains(&levels) {
            Ok(Self(levels))
        } else {
            Err(CoreError::UnsupportedLevel { levels })
        }
    }

    /// Number of levels.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Sub-ramp of [`SHEET_BLOCKS`] for this level count, empty cell first.
    #[must_use]
    pub fn ramp(self) -> &'static [&'static str] {
        match self.0 {
            2 => &SHEET_BLOCKS_2,
            3 => &SHEET_BLOCKS_3,
            4 => &SHEET_BLOCKS_4,
            _ => &SHEET_BLOCKS,
        }
    }
}

/// Lookup table mapping brightness [0..255] → ramp entry.
///
/// Pre-computed once per conversion for O(1) per-cell cost. Inversion is
/// baked into the table.
///
/// # Example
/// ```
/// use gg_core::charset::RampLut;
/// let lut = RampLut::new(&[' ', '.', ':', '#', '@'], false);
/// assert_eq!(lut.map(0), ' ');
/// assert_eq!(lut.map(255), '@');
/// ```
pub struct RampLut<T> {
    lut: [T; 256],
}

impl<T: Copy> RampLut<T> {
    /// Build a LUT from a ramp ordered lightest→densest.
    ///
    /// # Panics
    /// Panics if the ramp is empty.
    #[must_use]
    pub fn new(ramp: &[T], invert: bool) -> Self {
        let lut = std::array::from_fn(|b| ramp[quantize(b as u8, ramp.len(), invert)]);
        Self { lut }
    }

    /// Map a brightness value [0..255] to its ramp entry.
    #[inline(always)]
    #[must_use]
    pub fn map(&self, brightness: u8) -> T {
        self.lut[brightness as usize]
    }
}
