use anyhow::Result;
use gg_core::error::CoreError;
use gg_core::frame::{FrameBuffer, Grid, Rgb};

use crate::resize::resize_frame;

/// Height/width ratio of a glyph cell; rows are halved to compensate.
pub const CELL_ASPECT_COMPENSATION: f64 = 0.5;

/// Grid dimensions for an image sampled at `width` cells per row.
///
/// `height = floor(width * (img_height / img_width) * 0.5)`, raised to 1
/// for very wide images so that a grid always has a row.
///
/// # Errors
/// `CoreError::InvalidImage` for a zero-sized image,
/// `CoreError::InvalidDimensions` for a zero width.
///
/// # Example
/// ```
/// use gg_source::sampler::grid_size;
/// assert_eq!(grid_size(640, 480, 80).unwrap(), (80, 30));
/// assert_eq!(grid_size(2, 2, 2).unwrap(), (2, 1));
/// ```
pub fn grid_size(img_width: u32, img_height: u32, width: u16) -> Result<(u16, u16), CoreError> {
    if img_width == 0 || img_height == 0 {
        return Err(CoreError::InvalidImage {
            reason: format!("dimensions nulles {img_width}×{img_height}"),
        });
    }
    if width == 0 {
        return Err(CoreError::InvalidDimensions {
            width: 0,
            height: 0,
        });
    }
    let aspect = f64::from(img_height) / f64::from(img_width);
    let height = (f64::from(width) * aspect * CELL_ASPECT_COMPENSATION).floor();
    let height = height.clamp(1.0, f64::from(u16::MAX)) as u16;
    Ok((width, height))
}

/// Downsample `frame` to a grid `width` cells wide, one RGB triple per cell.
///
/// Alpha is dropped after resizing.
///
/// # Errors
/// `CoreError::InvalidImage` for an empty or truncated buffer, see
/// [`grid_size`] for the grid dimensions; resize failures are propagated.
///
/// # Example
/// ```
/// use gg_core::frame::{FrameBuffer, Rgb};
/// use gg_source::sampler::sample;
/// let frame = FrameBuffer::filled(40, 40, Rgb::new(9, 9, 9));
/// let grid = sample(&frame, 20).unwrap();
/// assert_eq!((grid.width, grid.height), (20, 10));
/// assert_eq!(*grid.get(0, 0), Rgb::new(9, 9, 9));
/// ```
pub fn sample(frame: &FrameBuffer, width: u16) -> Result<Grid<Rgb>> {
    if frame.is_empty() || frame.data.len() < frame.width as usize * frame.height as usize * 4 {
        return Err(CoreError::InvalidImage {
            reason: format!("tampon vide ou tronqué {}×{}", frame.width, frame.height),
        }
        .into());
    }
    let (w, h) = grid_size(frame.width, frame.height, width)?;
    log::debug!(
        "Échantillonnage {}×{} → grille {w}×{h}",
        frame.width,
        frame.height
    );
    let small = resize_frame(frame, u32::from(w), u32::from(h))?;
    let cells = small
        .data
        .chunks_exact(4)
        .map(|px| Rgb::new(px[0], px[1], px[2]))
        .collect();
    Grid::from_cells(w, h, cells).ok_or_else(|| {
        CoreError::InvalidDimensions {
            width: u32::from(w),
            height: u32::from(h),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_follows_aspect_and_halving() {
        assert_eq!(grid_size(100, 100, 80).unwrap(), (80, 40));
        assert_eq!(grid_size(100, 50, 80).unwrap(), (80, 20));
        assert_eq!(grid_size(300, 1000, 30).unwrap(), (30, 50));
        // floor(21 * 0.75 * 0.5) = floor(7.875)
        assert_eq!(grid_size(4, 3, 21).unwrap(), (21, 7));
    }

    #[test]
    fn very_wide_image_keeps_one_row() {
        assert_eq!(grid_size(1000, 10, 20).unwrap(), (20, 1));
    }

    #[test]
    fn zero_dimension_is_invalid_image() {
        assert!(matches!(
            grid_size(0, 10, 20),
            Err(CoreError::InvalidImage { .. })
        ));
        assert!(matches!(
            grid_size(10, 0, 20),
            Err(CoreError::InvalidImage { .. })
        ));
        let err = sample(&FrameBuffer::new(0, 0), 20).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidImage { .. })
        ));
    }

    #[test]
    fn truncated_buffer_is_invalid_image() {
        let mut frame = FrameBuffer::new(4, 4);
        frame.data.truncate(10);
        let err = sample(&frame, 2).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidImage { .. })
        ));
    }

    #[test]
    fn zero_width_rejected() {
        assert!(matches!(
            grid_size(10, 10, 0),
            Err(CoreError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn sample_white_square() {
        let frame = FrameBuffer::filled(2, 2, Rgb::new(255, 255, 255));
        let grid = sample(&frame, 2).unwrap();
        assert_eq!((grid.width, grid.height), (2, 1));
        assert!(grid.cells.iter().all(|c| c.brightness() == 255));
    }

    #[test]
    fn sample_upscales_small_sources() {
        let frame = FrameBuffer::filled(3, 3, Rgb::new(0, 128, 255));
        let grid = sample(&frame, 12).unwrap();
        assert_eq!(grid.cells.len(), 12 * 6);
    }

    #[test]
    fn sample_decoded_png() {
        let bytes = crate::image::tests::png_bytes(16, 8, [0, 0, 0, 255]);
        let frame = crate::image::decode_image(&bytes).unwrap();
        let grid = sample(&frame, 8).unwrap();
        assert_eq!((grid.width, grid.height), (8, 2));
        assert!(grid.cells.iter().all(|c| *c == Rgb::new(0, 0, 0)));
    }
}
