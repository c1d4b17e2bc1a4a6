use std::path::PathBuf;

use clap::Parser;
use gg_core::config::ConversionSettings;

use crate::pipeline::{Source, Target};

/// glyphgrid : images en ASCII art, grilles de tableur et listings DOS.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Source : chemin vers une image (PNG, JPEG, BMP, GIF).
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Source : texte de tableur (cellules séparées par des virgules).
    /// N'accepte que `--to asm`.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Sortie : ascii, sheet, asm.
    #[arg(long, default_value = "ascii")]
    pub to: Target,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Fichier de sortie, ou dossier existant (nom par défaut). Défaut : stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Reconvertir à chaque modification de la source. Requiert --output.
    #[arg(long, default_value_t = false)]
    pub watch: bool,

    /// Largeur de la grille en cellules (1 à 120).
    #[arg(long)]
    pub width: Option<u16>,

    /// Rampe ASCII : simple, detailed, blocks, dots.
    #[arg(long)]
    pub charset: Option<String>,

    /// Inverser la luminance ASCII.
    #[arg(long, value_name = "BOOL")]
    pub invert: Option<bool>,

    /// Encodage tableur : blocks, hex, rgb.
    #[arg(long)]
    pub format: Option<String>,

    /// Niveaux de blocs (2 à 5).
    #[arg(long)]
    pub levels: Option<u8>,

    /// Inverser les teintes des blocs.
    #[arg(long, value_name = "BOOL")]
    pub sheet_invert: Option<bool>,

    /// Table DOS : auto, custom.
    #[arg(long)]
    pub dos_mode: Option<String>,

    /// Échange clair/foncé en mode custom.
    #[arg(long, value_name = "BOOL")]
    pub asm_invert: Option<bool>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Validate the source and its combination with the other flags.
    ///
    /// # Errors
    /// Returns an error if zero or two sources are given, if `--csv` is
    /// used with a target other than `asm`, or if `--watch` has no
    /// `--output`.
    pub fn validate_source(&self) -> anyhow::Result<Source> {
        let source = match (&self.image, &self.csv) {
            (None, None) => {
                anyhow::bail!("Aucune source spécifiée. Utilisez --image ou --csv.")
            }
            (Some(_), Some(_)) => {
                anyhow::bail!("Une seule source à la fois. Spécifiez --image OU --csv.")
            }
            (Some(path), None) => Source::Image(path.clone()),
            (None, Some(path)) => Source::Csv(path.clone()),
        };
        if matches!(source, Source::Csv(_)) && self.to != Target::Asm {
            anyhow::bail!("--csv ne produit que de l'assembleur (--to asm), pas '{}'.", self.to);
        }
        if self.watch && self.output.is_none() {
            anyhow::bail!("--watch requiert --output.");
        }
        Ok(source)
    }

    /// Apply command-line overrides on top of the loaded settings.
    ///
    /// Unknown names are logged and leave the setting untouched.
    pub fn apply_overrides(&self, settings: &mut ConversionSettings) {
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(ref name) = self.charset {
            match name.parse() {
                Ok(charset) => settings.charset = charset,
                Err(e) => log::warn!("{e}, utilisation de '{}'.", settings.charset),
            }
        }
        if let Some(invert) = self.invert {
            settings.invert = invert;
        }
        if let Some(ref name) = self.format {
            match name.parse() {
                Ok(format) => settings.sheet_format = format,
                Err(e) => log::warn!("{e}, utilisation de '{}'.", settings.sheet_format),
            }
        }
        if let Some(levels) = self.levels {
            settings.block_levels = levels;
        }
        if let Some(invert) = self.sheet_invert {
            settings.sheet_invert = invert;
        }
        if let Some(ref name) = self.dos_mode {
            match name.parse() {
                Ok(mode) => settings.dos_mode = mode,
                Err(e) => log::warn!("{e}, utilisation de '{}'.", settings.dos_mode),
            }
        }
        if let Some(invert) = self.asm_invert {
            settings.asm_invert = invert;
        }
        settings.clamp_all();
    }
}
