use anyhow::{Context, Result};
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use gg_core::frame::FrameBuffer;

/// Area-average resize of `src` to `width × height`.
///
/// `Box` convolution: every target pixel is the mean of the source pixels
/// it covers, deterministic for a given input. Same-size requests are a
/// plain copy.
///
/// # Errors
/// Returns an error if a buffer does not match its dimensions or the
/// resize fails.
///
/// # Example
/// ```
/// use gg_source::resize::resize_frame;
/// use gg_core::frame::FrameBuffer;
/// let src = FrameBuffer::new(100, 100);
/// let dst = resize_frame(&src, 50, 25).unwrap();
/// assert_eq!((dst.width, dst.height), (50, 25));
/// ```
pub fn resize_frame(src: &FrameBuffer, width: u32, height: u32) -> Result<FrameBuffer> {
    if src.width == width && src.height == height {
        return Ok(src.clone());
    }

    // fast_image_resize wants `&mut` on the source slice too.
    let mut src_buf = src.data.clone();
    let src_image = Image::from_slice_u8(src.width, src.height, &mut src_buf, PixelType::U8x4)
        .context("Dimensions source invalides")?;

    let mut dst = FrameBuffer::new(width, height);
    {
        let mut dst_image = Image::from_slice_u8(width, height, &mut dst.data, PixelType::U8x4)
            .context("Dimensions destination invalides")?;
        let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Box));
        Resizer::new()
            .resize(&src_image, &mut dst_image, Some(&options))
            .context("Échec du redimensionnement")?;
    }

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gg_core::frame::Rgb;

    #[test]
    fn same_size_is_a_copy() {
        let src = FrameBuffer::filled(4, 4, Rgb::new(1, 2, 3));
        let dst = resize_frame(&src, 4, 4).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn solid_color_survives_downscale() {
        let src = FrameBuffer::filled(64, 48, Rgb::new(200, 100, 50));
        let dst = resize_frame(&src, 8, 3).unwrap();
        for y in 0..3 {
            for x in 0..8 {
                let (r, g, b, _) = dst.pixel(x, y);
                assert!(r.abs_diff(200) <= 1 && g.abs_diff(100) <= 1 && b.abs_diff(50) <= 1);
            }
        }
    }

    #[test]
    fn box_filter_averages_halves() {
        // Left half black, right half white, reduced to 2×1.
        let mut src = FrameBuffer::filled(8, 2, Rgb::new(0, 0, 0));
        for y in 0..2usize {
            for x in 4..8usize {
                let i = (y * 8 + x) * 4;
                src.data[i..i + 3].copy_from_slice(&[255, 255, 255]);
            }
        }
        let dst = resize_frame(&src, 2, 1).unwrap();
        assert!(dst.pixel(0, 0).0 <= 2, "moitié noire : {:?}", dst.pixel(0, 0));
        assert!(dst.pixel(1, 0).0 >= 253, "moitié blanche : {:?}", dst.pixel(1, 0));
    }

    #[test]
    fn short_source_buffer_is_an_error() {
        let mut src = FrameBuffer::new(8, 8);
        src.data.truncate(8 * 4);
        assert!(resize_frame(&src, 4, 4).is_err());
    }

    #[test]
    fn deterministic_output() {
        let mut src = FrameBuffer::new(37, 23);
        for (i, v) in src.data.iter_mut().enumerate() {
            *v = (i * 31 % 256) as u8;
        }
        let a = resize_frame(&src, 9, 5).unwrap();
        let b = resize_frame(&src, 9, 5).unwrap();
        assert_eq!(a, b);
    }
}
