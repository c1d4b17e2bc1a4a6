use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::{Charset, SheetFormat};
use crate::dos::DosMode;

/// Largest grid width accepted by the sampler.
pub const MAX_WIDTH: u16 = 120;

/// Width cap applied on the spreadsheet path.
pub const MAX_SHEET_WIDTH: u16 = 100;

/// Settings for one conversion run.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use gg_core::config::ConversionSettings;
/// let settings = ConversionSettings::default();
/// assert_eq!(settings.width, 80);
/// assert!(settings.invert);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConversionSettings {
    /// Largeur de la grille en cellules.
    pub width: u16,

    // === ASCII ===
    /// Rampe de caractères (du plus clair au plus dense).
    pub charset: Charset,
    /// Inverser la luminance (pour fond clair).
    pub invert: bool,

    // === Tableur ===
    /// Encodage des cellules.
    pub sheet_format: SheetFormat,
    /// Nombre de niveaux de blocs, validé à l'encodage (2 à 5).
    pub block_levels: u8,
    /// Inverser les teintes des blocs.
    pub sheet_invert: bool,

    // === Assembleur ===
    /// Table glyphe→octet.
    pub dos_mode: DosMode,
    /// Échange clair/foncé en mode custom.
    pub asm_invert: bool,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            width: 80,
            charset: Charset::Simple,
            invert: true,
            sheet_format: SheetFormat::Blocks,
            block_levels: 5,
            sheet_invert: true,
            dos_mode: DosMode::Auto,
            asm_invert: true,
        }
    }
}

impl ConversionSettings {
    /// Clamp numeric fields to their valid ranges.
    /// Called after TOML deserialization and CLI overrides.
    ///
    /// `block_levels` is left as is: an unsupported count is reported by
    /// the spreadsheet emitter rather than silently changed.
    pub fn clamp_all(&mut self) {
        self.width = self.width.clamp(1, MAX_WIDTH);
    }

    /// Width used by the spreadsheet emitter.
    #[must_use]
    pub fn sheet_width(&self) -> u16 {
        self.width.min(MAX_SHEET_WIDTH)
    }
}

/// Structure TOML intermédiaire, toutes les sections optionnelles.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    width: Option<u16>,
    ascii: Option<AsciiSection>,
    sheet: Option<SheetSection>,
    asm: Option<AsmSection>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AsciiSection {
    charset: Option<Charset>,
    invert: Option<bool>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SheetSection {
    format: Option<SheetFormat>,
    block_levels: Option<u8>,
    invert: Option<bool>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AsmSection {
    dos_mode: Option<DosMode>,
    invert: Option<bool>,
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML for this schema.
///
/// # Example
/// ```
/// use gg_core::config::parse_config;
/// use gg_core::charset::Charset;
/// let config = parse_config("[ascii]\ncharset = \"dots\"\n").unwrap();
/// assert_eq!(config.charset, Charset::Dots);
/// assert_eq!(config.width, 80);
/// ```
pub fn parse_config(content: &str) -> Result<ConversionSettings> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = ConversionSettings::default();

    if let Some(v) = file.width {
        config.width = v;
    }

    if let Some(a) = file.ascii {
        if let Some(v) = a.charset {
            config.charset = v;
        }
        if let Some(v) = a.invert {
            config.invert = v;
        }
    }

    if let Some(s) = file.sheet {
        if let Some(v) = s.format {
            config.sheet_format = v;
        }
        if let Some(v) = s.block_levels {
            config.block_levels = v;
        }
        if let Some(v) = s.invert {
            config.sheet_invert = v;
        }
    }

    if let Some(a) = file.asm {
        if let Some(v) = a.dos_mode {
            config.dos_mode = v;
        }
        if let Some(v) = a.invert {
            config.asm_invert = v;
        }
    }

    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use gg_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ConversionSettings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Configuration rejetée : {}", path.display()))?;
    log::debug!("Config chargée depuis {} : {config:?}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), ConversionSettings::default());
    }

    #[test]
    fn sections_override_defaults() {
        let text = r#"
width = 40

[ascii]
charset = "detailed"
invert = false

[sheet]
format = "rgb"
block_levels = 3
invert = false

[asm]
dos_mode = "custom"
invert = false
"#;
        let c = parse_config(text).unwrap();
        assert_eq!(c.width, 40);
        assert_eq!(c.charset, Charset::Detailed);
        assert!(!c.invert);
        assert_eq!(c.sheet_format, SheetFormat::Rgb);
        assert_eq!(c.block_levels, 3);
        assert!(!c.sheet_invert);
        assert_eq!(c.dos_mode, DosMode::Custom);
        assert!(!c.asm_invert);
    }

    #[test]
    fn width_is_clamped() {
        assert_eq!(parse_config("width = 0").unwrap().width, 1);
        assert_eq!(parse_config("width = 500").unwrap().width, MAX_WIDTH);
    }

    #[test]
    fn sheet_width_capped_at_100() {
        let mut c = ConversionSettings {
            width: 120,
            ..ConversionSettings::default()
        };
        assert_eq!(c.sheet_width(), 100);
        c.width = 64;
        assert_eq!(c.sheet_width(), 64);
    }

    #[test]
    fn unknown_names_rejected() {
        assert!(parse_config("[ascii]\ncharset = \"braille\"").is_err());
        assert!(parse_config("[asm]\ndos_mode = \"vga\"").is_err());
        assert!(parse_config("[render]\nfps = 30").is_err());
    }

    #[test]
    fn unsupported_levels_survive_loading() {
        // Rejected by the emitter, not rewritten here.
        assert_eq!(parse_config("[sheet]\nblock_levels = 7").unwrap().block_levels, 7);
    }

    #[test]
    fn load_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glyphgrid.toml");
        std::fs::write(&path, "[sheet]\nformat = \"hex\"\n").unwrap();
        let c = load_config(&path).unwrap();
        assert_eq!(c.sheet_format, SheetFormat::Hex);
    }

    #[test]
    fn load_config_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("Impossible de lire"));
    }
}
