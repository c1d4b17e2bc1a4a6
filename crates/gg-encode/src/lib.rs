//! Text encoders for glyphgrid.
//!
//! Converts sampled color grids to ASCII art and spreadsheet CSV, and
//! spreadsheet CSV to DOS assembly listings.

pub mod ascii;
pub mod asm;
pub mod sheet;

pub use ascii::encode_ascii;
pub use asm::encode_asm;
pub use sheet::encode_sheet;
