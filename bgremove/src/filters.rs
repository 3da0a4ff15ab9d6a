//! Filtering operations for mask post-processing
//!
//! The background mask leaves the flood fill as a hard 0/255 step. A small
//! Gaussian turns that step into a short ramp so the final alpha has soft
//! edges instead of a jagged cut-out.

use image::GrayImage;
use imageproc::filter::gaussian_blur_f32;

/// Gaussian blur of a single-channel mask
///
/// Edge pixels are replicated beyond the image border and results are
/// rounded, so a uniform mask is returned unchanged. A `sigma` of zero, a
/// negative or non-finite `sigma`, or an empty mask yields a copy of the input.
///
/// # Arguments
/// * `mask` - Input mask
/// * `sigma` - Standard deviation of the Gaussian, in pixels
///
/// # Returns
/// Blurred mask with the same dimensions
pub fn gaussian_blur(mask: &GrayImage, sigma: f32) -> GrayImage {
    if !sigma.is_finite() || sigma <= 0.0 || mask.width() == 0 || mask.height() == 0 {
        return mask.clone();
    }

    gaussian_blur_f32(mask, sigma)
}
