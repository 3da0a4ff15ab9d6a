//! Corner-seeded flood fill producing the background mask.

use image::{GrayImage, Luma, Rgba, RgbaImage};

/// Mask value of a pixel reached by the fill.
pub const BACKGROUND: u8 = 255;

/// Mask value of every other pixel.
pub const FOREGROUND: u8 = 0;

/// Marks every pixel connected to one of the four image corners through
/// pixels whose red, green and blue channels all exceed `tolerance`.
///
/// Connectivity is 4-neighbour. The alpha channel is not consulted. The
/// returned mask has the dimensions of `image`, with [`BACKGROUND`] on filled
/// pixels and [`FOREGROUND`] elsewhere.
pub fn background_mask(image: &RgbaImage, tolerance: i32) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut mask = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return mask;
    }

    // Set when a pixel enters the worklist, so each pixel is pushed at most once.
    let mut visited = vec![false; width as usize * height as usize];
    let mut stack: Vec<(u32, u32)> = Vec::with_capacity((width as usize + height as usize) * 2);

    for (x, y) in [(0, 0), (0, height - 1), (width - 1, 0), (width - 1, height - 1)] {
        enqueue(&mut stack, &mut visited, width, x, y);
    }

    while let Some((x, y)) = stack.pop() {
        if !is_background_like(image.get_pixel(x, y), tolerance) {
            continue;
        }

        mask.put_pixel(x, y, Luma([BACKGROUND]));

        if x > 0 {
            enqueue(&mut stack, &mut visited, width, x - 1, y);
        }
        if x + 1 < width {
            enqueue(&mut stack, &mut visited, width, x + 1, y);
        }
        if y > 0 {
            enqueue(&mut stack, &mut visited, width, x, y - 1);
        }
        if y + 1 < height {
            enqueue(&mut stack, &mut visited, width, x, y + 1);
        }
    }

    mask
}

#[inline]
fn enqueue(stack: &mut Vec<(u32, u32)>, visited: &mut [bool], width: u32, x: u32, y: u32) {
    let idx = pixel_index(width, x, y);
    if !visited[idx] {
        visited[idx] = true;
        stack.push((x, y));
    }
}

#[inline]
fn is_background_like(pixel: &Rgba<u8>, tolerance: i32) -> bool {
    let Rgba([red, green, blue, _]) = *pixel;
    [red, green, blue]
        .into_iter()
        .all(|channel| i32::from(channel) > tolerance)
}

#[inline]
fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}
