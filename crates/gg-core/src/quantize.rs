//! Brightness reduction and ramp quantization.
//!
//! Brightness is the unweighted channel mean, not perceptual luma: outputs
//! must match grids produced by earlier versions of the tool.

/// Unweighted mean of the three channels, rounded half up.
///
/// # Example
/// ```
/// use gg_core::quantize::brightness;
/// assert_eq!(brightness(255, 255, 255), 255);
/// assert_eq!(brightness(0, 0, 2), 1);
/// assert_eq!(brightness(0, 0, 1), 0);
/// ```
#[inline(always)]
#[must_use]
pub fn brightness(r: u8, g: u8, b: u8) -> u8 {
    let sum = u16::from(r) + u16::from(g) + u16::from(b);
    // sum/3 never lands on .5, so +1 before the division rounds to nearest.
    ((sum + 1) / 3) as u8
}

/// Map a brightness to an index into a ramp of `levels` entries.
///
/// `floor(brightness / 255 * (levels - 1))`, mirrored when `invert` is set.
/// Computed in `f64` in that exact order. Always within `[0, levels - 1]`;
/// `levels < 2` yields 0.
///
/// # Example
/// ```
/// use gg_core::quantize::quantize;
/// assert_eq!(quantize(0, 5, false), 0);
/// assert_eq!(quantize(255, 5, false), 4);
/// assert_eq!(quantize(255, 5, true), 0);
/// ```
#[inline]
#[must_use]
pub fn quantize(brightness: u8, levels: usize, invert: bool) -> usize {
    if levels < 2 {
        return 0;
    }
    let max = levels - 1;
    let raw = (f64::from(brightness) / 255.0 * max as f64).floor();
    let index = (raw.max(0.0) as usize).min(max);
    if invert { max - index } else { index }
}
