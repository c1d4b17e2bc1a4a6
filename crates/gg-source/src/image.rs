use std::path::Path;

use anyhow::{Context, Result};
use gg_core::error::CoreError;
use gg_core::frame::FrameBuffer;

/// Decode raw image bytes (PNG, JPEG, BMP, GIF) into an RGBA buffer.
///
/// The format is sniffed from the content, not from a file name.
///
/// # Errors
/// `CoreError::InvalidImage` if the bytes cannot be decoded or the image
/// has a zero dimension.
///
/// # Example
/// ```
/// use gg_source::image::decode_image;
/// assert!(decode_image(b"not an image").is_err());
/// ```
pub fn decode_image(bytes: &[u8]) -> Result<FrameBuffer> {
    let img = ::image::load_from_memory(bytes).map_err(|e| CoreError::InvalidImage {
        reason: e.to_string(),
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let frame = FrameBuffer {
        data: rgba.into_raw(),
        width,
        height,
    };
    if frame.is_empty() {
        return Err(CoreError::InvalidImage {
            reason: format!("dimensions nulles {width}×{height}"),
        }
        .into());
    }
    log::debug!("Image décodée : {width}×{height}");
    Ok(frame)
}

/// Read and decode an image file.
///
/// # Errors
/// Returns an error if the file cannot be read, or
/// `CoreError::InvalidImage` if it cannot be decoded.
///
/// # Example
/// ```no_run
/// use gg_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("photo.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<FrameBuffer> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Impossible de lire {}", path.display()))?;
    decode_image(&bytes).with_context(|| format!("Impossible de charger {}", path.display()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Cursor;

    /// Encode a solid-color PNG in memory.
    pub(crate) fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let img = ::image::RgbaImage::from_pixel(width, height, ::image::Rgba(rgba));
        let mut out = Vec::new();
        ::image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut out), ::image::ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn decodes_png_to_rgba() {
        let frame = decode_image(&png_bytes(3, 2, [10, 20, 30, 255])).unwrap();
        assert_eq!((frame.width, frame.height), (3, 2));
        assert_eq!(frame.data.len(), 3 * 2 * 4);
        assert_eq!(frame.pixel(2, 1), (10, 20, 30, 255));
    }

    #[test]
    fn garbage_is_invalid_image() {
        let err = decode_image(&[0x89, b'P', b'N', b'G', 0, 1, 2]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidImage { .. })
        ));
    }

    #[test]
    fn load_image_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solid.png");
        std::fs::write(&path, png_bytes(4, 4, [255, 255, 255, 255])).unwrap();
        let frame = load_image(&path).unwrap();
        assert_eq!(frame.pixel(0, 0), (255, 255, 255, 255));
    }

    #[test]
    fn load_image_keeps_root_cause() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"plain text").unwrap();
        let err = load_image(&path).unwrap_err();
        assert!(err.downcast_ref::<CoreError>().is_some());
    }
}
