use thiserror::Error;

/// Errors originating from the conversion pipeline.
///
/// Every variant is terminal for the conversion that raised it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Source image has a zero dimension or could not be decoded.
    #[error("Image invalide : {reason}")]
    InvalidImage {
        /// Decoder message or the offending dimensions.
        reason: String,
    },

    /// The assembly stage received no rows to translate.
    #[error("Aucune donnée d'entrée : fournir un CSV ou générer d'abord la grille")]
    NoInputData,

    /// Block level count without a defined ramp.
    #[error("Niveau de blocs non supporté : {levels} (attendu 2, 3, 4 ou 5)")]
    UnsupportedLevel {
        /// Requested level count.
        levels: u8,
    },

    /// Invalid width/height of the target grid.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),
}
