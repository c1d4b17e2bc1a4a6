use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Byte substituted for glyphs outside the display's 8-bit code page.
pub const FALLBACK_BYTE: u8 = 32;

/// Auto : compense l'affichage blanc sur noir de DOS (ordre des teintes inversé).
const AUTO_TABLE: [(char, u8); 5] = [
    ('█', 32),
    ('▓', 176),
    ('▒', 177),
    ('░', 178),
    (' ', 219),
];

/// Custom : codes CP437 standards, sans inversion.
const CUSTOM_TABLE: [(char, u8); 5] = [
    ('░', 176),
    ('▒', 177),
    ('▓', 178),
    ('█', 219),
    (' ', 32),
];

/// Custom avec inversion : clair et foncé échangés, le reste inchangé.
const CUSTOM_INVERTED_TABLE: [(char, u8); 5] = [
    ('░', 178),
    ('▒', 177),
    ('▓', 176),
    ('█', 219),
    (' ', 32),
];

/// Glyph→byte policy for the assembly emitter.
///
/// # Example
/// ```
/// use gg_core::dos::DosMode;
/// assert_eq!("custom".parse::<DosMode>().unwrap(), DosMode::Custom);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DosMode {
    /// Shades remapped for a white-on-black display. Ignores the invert flag.
    #[default]
    Auto,
    /// Standard code page values, light/dark swapped when inverted.
    Custom,
}

impl DosMode {
    /// Name used in config files and on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DosMode::Auto => "auto",
            DosMode::Custom => "custom",
        }
    }
}

impl fmt::Display for DosMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DosMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(DosMode::Auto),
            "custom" => Ok(DosMode::Custom),
            _ => Err(CoreError::Config(format!(
                "mode DOS inconnu '{s}' (auto, custom)"
            ))),
        }
    }
}

/// Resolved glyph→byte table for one assembly run.
///
/// # Example
/// ```
/// use gg_core::dos::{DosByteMap, DosMode};
/// let map = DosByteMap::new(DosMode::Auto, false);
/// assert_eq!(map.byte_for('█'), 32);
/// assert_eq!(map.empty_byte(), 219);
/// assert_eq!(map.byte_for('X'), 88);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DosByteMap {
    table: &'static [(char, u8)],
    empty: u8,
}

impl DosByteMap {
    /// Select the table for `mode`. `invert` only matters for `Custom`.
    #[must_use]
    pub fn new(mode: DosMode, invert: bool) -> Self {
        match mode {
            DosMode::Auto => Self {
                table: &AUTO_TABLE,
                empty: 219,
            },
            DosMode::Custom if invert => Self {
                table: &CUSTOM_INVERTED_TABLE,
                empty: 32,
            },
            DosMode::Custom => Self {
                table: &CUSTOM_TABLE,
                empty: 32,
            },
        }
    }

    /// Byte written for an empty cell.
    #[must_use]
    pub fn empty_byte(&self) -> u8 {
        self.empty
    }

    /// Byte for a single glyph: table entry, else its code point when it
    /// fits in a byte, else [`FALLBACK_BYTE`].
    #[must_use]
    pub fn byte_for(&self, ch: char) -> u8 {
        self.table
            .iter()
            .find(|(glyph, _)| *glyph == ch)
            .map_or_else(|| code_point_byte(ch), |&(_, byte)| byte)
    }

    /// Byte for a trimmed spreadsheet cell.
    ///
    /// Only single-glyph cells are looked up; longer cells fall back to
    /// their first character's code.
    #[must_use]
    pub fn byte_for_cell(&self, cell: &str) -> u8 {
        let mut chars = cell.chars();
        match (chars.next(), chars.next()) {
            (None, _) => self.empty,
            (Some(ch), None) => self.byte_for(ch),
            (Some(first), Some(_)) => code_point_byte(first),
        }
    }
}

fn code_point_byte(ch: char) -> u8 {
    u8::try_from(u32::from(ch)).unwrap_or(FALLBACK_BYTE)
}
