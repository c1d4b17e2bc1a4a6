use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use gg_core::charset::SheetFormat;
use gg_core::config::ConversionSettings;
use gg_core::error::CoreError;
use gg_core::frame::FrameBuffer;
use gg_encode::{encode_ascii, encode_asm, encode_sheet};
use gg_source::sample;

/// Output encoding requested on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Ascii,
    Sheet,
    Asm,
}

impl Target {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Target::Ascii => "ascii",
            Target::Sheet => "sheet",
            Target::Asm => "asm",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" => Ok(Target::Ascii),
            "sheet" | "csv" => Ok(Target::Sheet),
            "asm" => Ok(Target::Asm),
            _ => Err(CoreError::Config(format!(
                "sortie inconnue '{s}' (ascii, sheet, asm)"
            ))),
        }
    }
}

/// Where the input comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Image(PathBuf),
    Csv(PathBuf),
}

impl Source {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Source::Image(p) | Source::Csv(p) => p,
        }
    }
}

/// Convert a decoded image.
///
/// `ascii` samples at `settings.width`; `sheet` and `asm` sample at the
/// capped spreadsheet width. `asm` goes through a `blocks` spreadsheet
/// first, whatever `settings.sheet_format` says.
///
/// # Errors
/// Propagates sampling and encoder errors (`CoreError` root cause).
pub fn convert_image(
    frame: &FrameBuffer,
    settings: &ConversionSettings,
    target: Target,
) -> Result<String> {
    match target {
        Target::Ascii => {
            let grid = sample(frame, settings.width)?;
            Ok(encode_ascii(&grid, settings.charset, settings.invert))
        }
        Target::Sheet => {
            let grid = sample(frame, settings.sheet_width())?;
            Ok(encode_sheet(
                &grid,
                settings.sheet_format,
                settings.block_levels,
                settings.sheet_invert,
            )?)
        }
        Target::Asm => {
            let grid = sample(frame, settings.sheet_width())?;
            let sheet = encode_sheet(
                &grid,
                SheetFormat::Blocks,
                settings.block_levels,
                settings.sheet_invert,
            )?;
            Ok(encode_asm(&sheet, settings.dos_mode, settings.asm_invert)?)
        }
    }
}

/// Convert spreadsheet text into an assembly listing.
///
/// # Errors
/// `CoreError::NoInputData` for blank text.
pub fn convert_csv(text: &str, settings: &ConversionSettings) -> Result<String> {
    Ok(encode_asm(text, settings.dos_mode, settings.asm_invert)?)
}

/// Read spreadsheet text from disk.
///
/// Invalid UTF-8 sequences become U+FFFD and a leading byte order mark is
/// dropped, so the first cell reads like any other.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_csv(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Impossible de lire {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.strip_prefix('\u{FEFF}').unwrap_or(&text).to_owned())
}

/// Load `source` from disk and convert it.
///
/// # Errors
/// Returns an error if the file cannot be read, or on any conversion
/// error.
pub fn convert(source: &Source, settings: &ConversionSettings, target: Target) -> Result<String> {
    let text = match source {
        Source::Image(path) => {
            let frame = gg_source::image::load_image(path)?;
            convert_image(&frame, settings, target)?
        }
        Source::Csv(path) => {
            if target != Target::Asm {
                anyhow::bail!("Un tableur ne se convertit qu'en assembleur, pas en '{target}'.");
            }
            let text = read_csv(path)?;
            convert_csv(&text, settings)?
        }
    };
    log::info!(
        "Converti {} → {target} ({} octets)",
        source.path().display(),
        text.len()
    );
    Ok(text)
}
