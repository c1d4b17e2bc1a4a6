//! Image sources for glyphgrid: decoding, resizing and grid sampling.

pub mod image;
pub mod resize;
pub mod sampler;

pub use sampler::{grid_size, sample};
