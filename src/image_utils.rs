use image::{GrayImage, Luma, Rgb};
use imageproc::contrast::{otsu_level, threshold};

pub const WHITE: Luma<u8> = Luma([u8::MAX]);
pub const BLACK: Luma<u8> = Luma([u8::MIN]);

pub const WHITE_RGB: Rgb<u8> = Rgb([255, 255, 255]);
pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
pub const CYAN: Rgb<u8> = Rgb([0, 255, 255]);
pub const PINK: Rgb<u8> = Rgb([255, 0, 255]);
pub const ORANGE: Rgb<u8> = Rgb([255, 165, 0]);
pub const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);

pub const RAINBOW: [Rgb<u8>; 7] = [RED, ORANGE, YELLOW, GREEN, CYAN, BLUE, PINK];

/// Binarizes `img` with an Otsu threshold, inverted so that dark pixels (ink)
/// become `WHITE` and light pixels (paper) become `BLACK`. Returns the image
/// and the chosen level.
pub fn binarize_inverted(img: &GrayImage) -> (GrayImage, u8) {
    let level = otsu_level(img);
    let mut binary = threshold(img, level);
    image::imageops::invert(&mut binary);
    (binary, level)
}

/// Sets every pixel within `margin` of the image edge to `luma`.
pub fn fill_border_mut(img: &mut GrayImage, margin: u32, luma: Luma<u8>) {
    let (width, height) = img.dimensions();
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        if x < margin || y < margin || x + margin >= width || y + margin >= height {
            *pixel = luma;
        }
    }
}

/// Determines the number of pixels in an image that match the given luma.
pub fn count_pixels(img: &GrayImage, luma: &Luma<u8>) -> u32 {
    img.pixels().filter(|p| *p == luma).count() as u32
}

/// Counts pixels that are `WHITE` in both `img` and `mask`, where `mask` is
/// placed with its top-left corner at `(left, top)` in `img`. Mask pixels that
/// fall outside `img` are ignored.
pub fn count_masked_pixels(img: &GrayImage, mask: &GrayImage, left: i32, top: i32) -> u32 {
    mask.enumerate_pixels()
        .filter(|(_, _, m)| **m == WHITE)
        .filter(|(x, y, _)| {
            let ix = left + *x as i32;
            let iy = top + *y as i32;
            ix >= 0
                && iy >= 0
                && (ix as u32) < img.width()
                && (iy as u32) < img.height()
                && *img.get_pixel(ix as u32, iy as u32) == WHITE
        })
        .count() as u32
}
