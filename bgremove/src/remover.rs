//! Background removal pipeline: fill, feather, invert, composite.

use image::{DynamicImage, RgbaImage};

use crate::{
    alpha::{invert_mask, write_alpha},
    config::RemoverConfig,
    filters::gaussian_blur,
    mask::background_mask,
};

/// Removes corner-connected bright background from images.
///
/// Holds only its configuration, so one remover can be shared freely across
/// threads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BackgroundRemover {
    config: RemoverConfig,
}

impl BackgroundRemover {
    pub const fn new(config: RemoverConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &RemoverConfig {
        &self.config
    }

    /// Returns an RGBA copy of `image` whose alpha is 0 on the background,
    /// 255 on the foreground and ramps between them along the boundary.
    ///
    /// Any existing alpha is replaced. Width and height are preserved; a
    /// zero-sized input yields a zero-sized output.
    pub fn remove(&self, image: &DynamicImage) -> RgbaImage {
        self.remove_rgba(image.to_rgba8())
    }

    /// Same as [`remove`](Self::remove) for an image already in RGBA8.
    pub fn remove_rgba(&self, mut image: RgbaImage) -> RgbaImage {
        if image.width() == 0 || image.height() == 0 {
            return image;
        }

        let mask = background_mask(&image, self.config.tolerance);
        let mask = gaussian_blur(&mask, self.config.sigma);
        let alpha = invert_mask(&mask);

        write_alpha(&mut image, &alpha);

        image
    }
}

/// Removes the background with the given tolerance and the default one
/// pixel feathering.
pub fn remove_background(image: &DynamicImage, tolerance: i32) -> RgbaImage {
    BackgroundRemover::new(RemoverConfig::new().with_tolerance(tolerance)).remove(image)
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage, Rgba};
    use rstest::rstest;

    use super::*;

    fn alpha_values(image: &RgbaImage) -> Vec<u8> {
        image.pixels().map(|p| p.0[3]).collect()
    }

    fn bordered_square() -> DynamicImage {
        // 4x4, one pixel white border around a black 2x2 centre.
        let image = RgbImage::from_fn(4, 4, |x, y| {
            if (1..=2).contains(&x) && (1..=2).contains(&y) {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        DynamicImage::ImageRgb8(image)
    }

    #[test]
    fn all_background_becomes_transparent() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 12, Rgb([240, 245, 250])));
        let result = remove_background(&image, 200);

        assert!(alpha_values(&result).iter().all(|&a| a == 0));
    }

    #[test]
    fn all_foreground_stays_opaque() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 12, Rgb([30, 90, 200])));
        let result = remove_background(&image, 200);

        assert!(alpha_values(&result).iter().all(|&a| a == 255));
    }

    #[test]
    fn bordered_square_keeps_its_centre() {
        let result = remove_background(&bordered_square(), 200);
        assert_eq!(result.dimensions(), (4, 4));

        let centre = result.get_pixel(1, 1).0[3];
        for (x, y) in [(0, 0), (3, 0), (0, 3), (3, 3)] {
            let corner = result.get_pixel(x, y).0[3];
            assert!(corner < centre, "corner ({x}, {y}) alpha {corner} >= {centre}");
            assert!(corner < 64, "corner ({x}, {y}) alpha {corner}");
        }
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            let alpha = result.get_pixel(x, y).0[3];
            assert!(alpha > 64 && alpha < 255, "centre ({x}, {y}) alpha {alpha}");
        }
    }

    #[test]
    fn hard_edges_without_feathering() {
        let remover = BackgroundRemover::new(RemoverConfig::new().with_sigma(0.0));
        let result = remover.remove(&bordered_square());

        for (x, y, pixel) in result.enumerate_pixels() {
            let inside = (1..=2).contains(&x) && (1..=2).contains(&y);
            assert_eq!(pixel.0[3], if inside { 255 } else { 0 }, "({x}, {y})");
        }
    }

    #[test]
    fn color_channels_are_preserved() {
        let source = RgbaImage::from_fn(6, 6, |x, y| Rgba([x as u8 * 40, y as u8 * 40, 17, 9]));
        let result = BackgroundRemover::default().remove_rgba(source.clone());

        for (before, after) in source.pixels().zip(result.pixels()) {
            assert_eq!(before.0[..3], after.0[..3]);
        }
    }

    #[test]
    fn existing_alpha_is_replaced() {
        let source = RgbaImage::from_pixel(5, 5, Rgba([10, 10, 10, 0]));
        let result = BackgroundRemover::default().remove_rgba(source);

        assert!(alpha_values(&result).iter().all(|&a| a == 255));
    }

    #[test]
    fn input_image_is_not_modified() {
        let image = bordered_square();
        let snapshot = image.clone();
        let _ = remove_background(&image, 200);

        assert_eq!(image, snapshot);
    }

    #[rstest]
    #[case(DynamicImage::new_luma8(7, 3))]
    #[case(DynamicImage::new_luma_a8(7, 3))]
    #[case(DynamicImage::new_rgb16(7, 3))]
    #[case(DynamicImage::new_rgba8(7, 3))]
    fn any_pixel_depth_yields_rgba_of_same_size(#[case] image: DynamicImage) {
        let result = remove_background(&image, 200);

        assert_eq!(result.dimensions(), (7, 3));
        // Black input: nothing is background.
        assert!(alpha_values(&result).iter().all(|&a| a == 255));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(5, 0)]
    #[case(0, 5)]
    fn zero_sized_image_yields_empty_result(#[case] width: u32, #[case] height: u32) {
        let image = DynamicImage::new_rgb8(width, height);
        let result = remove_background(&image, 200);

        assert_eq!(result.dimensions(), (width, height));
        assert!(result.as_raw().is_empty());
    }
}
