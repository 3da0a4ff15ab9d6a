use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::map::map_colors2;

use crate::error::{BgRemoveError, BgRemoveResult};

/// Replaces the alpha channel of an RGBA image with a grayscale mask.
pub trait ReplaceAlphaExt {
    /// Writes `mask` into the alpha channel in place, keeping the color
    /// channels untouched.
    ///
    /// # Errors
    ///
    /// * `BgRemoveError::DimensionMismatch` - When image and mask dimensions don't match
    fn replace_alpha(&mut self, mask: &GrayImage) -> BgRemoveResult<&mut Self>;
}

impl ReplaceAlphaExt for RgbaImage {
    fn replace_alpha(&mut self, mask: &GrayImage) -> BgRemoveResult<&mut Self> {
        if self.dimensions() != mask.dimensions() {
            return Err(BgRemoveError::DimensionMismatch {
                image_width: self.width(),
                image_height: self.height(),
                mask_width: mask.width(),
                mask_height: mask.height(),
            });
        }

        write_alpha(self, mask);
        Ok(self)
    }
}

/// Copies `mask` into the alpha channel of `image`. Callers guarantee equal
/// dimensions.
pub(crate) fn write_alpha(image: &mut RgbaImage, mask: &GrayImage) {
    debug_assert_eq!(image.dimensions(), mask.dimensions());

    *image = map_colors2(&*image, mask, |Rgba([red, green, blue, _]), Luma([alpha])| {
        Rgba([red, green, blue, alpha])
    });
}

/// Value-for-value inversion, `v' = 255 - v`.
pub fn invert_mask(mask: &GrayImage) -> GrayImage {
    let mut inverted = mask.clone();
    inverted
        .pixels_mut()
        .for_each(|Luma([value])| *value = u8::MAX - *value);
    inverted
}
