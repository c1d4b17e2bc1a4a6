/// Configuration, types, and symbol tables for glyphgrid.
///
/// This crate contains the shared types, the static palettes, the
/// brightness quantizer and the configuration logic used across the
/// glyphgrid workspace.

pub mod charset;
pub mod config;
pub mod dos;
pub mod error;
pub mod frame;
pub mod quantize;

pub use charset::{BlockLevels, Charset, SheetFormat};
pub use config::ConversionSettings;
pub use dos::{DosByteMap, DosMode};
pub use error::CoreError;
pub use frame::{FrameBuffer, Grid, Rgb};
pub use quantize::{brightness, quantize};
