//! Synthetic answer sheets for image-based unit tests.

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

use crate::types::ALTERNATIVES;

pub(crate) const PAPER: u8 = 245;
pub(crate) const INK: u8 = 0;
pub(crate) const BACKGROUND: u8 = 25;

/// Distance from the sheet edge to the first bubble centre.
pub(crate) const MARGIN: u32 = 60;
pub(crate) const ROW_SPACING: u32 = 60;
pub(crate) const COLUMN_SPACING: u32 = 50;
pub(crate) const BUBBLE_RADIUS: i32 = 12;
pub(crate) const RING_WIDTH: i32 = 3;

/// Which bubbles in a row are filled in.
#[derive(Debug, Clone, Default)]
pub(crate) struct SheetRow {
    pub filled: Vec<usize>,
}

impl SheetRow {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn filled(option: usize) -> Self {
        Self {
            filled: vec![option],
        }
    }

    pub fn filled_many(options: &[usize]) -> Self {
        Self {
            filled: options.to_vec(),
        }
    }
}

pub(crate) fn bubble_center(row: usize, option: usize) -> (i32, i32) {
    (
        (MARGIN + option as u32 * COLUMN_SPACING) as i32,
        (MARGIN + row as u32 * ROW_SPACING) as i32,
    )
}

/// Draws rows of printed bubbles on white paper. Filled bubbles are solid,
/// the others are rings.
pub(crate) fn draw_sheet_sized(width: u32, height: u32, rows: &[SheetRow]) -> GrayImage {
    let mut sheet = GrayImage::from_pixel(width, height, Luma([PAPER]));
    for (row, sheet_row) in rows.iter().enumerate() {
        for option in 0..ALTERNATIVES {
            let center = bubble_center(row, option);
            draw_filled_circle_mut(&mut sheet, center, BUBBLE_RADIUS, Luma([INK]));
            if !sheet_row.filled.contains(&option) {
                draw_filled_circle_mut(
                    &mut sheet,
                    center,
                    BUBBLE_RADIUS - RING_WIDTH,
                    Luma([PAPER]),
                );
            }
        }
    }
    sheet
}

pub(crate) fn draw_sheet(rows: &[SheetRow]) -> GrayImage {
    let width = 2 * MARGIN + (ALTERNATIVES as u32 - 1) * COLUMN_SPACING;
    let height = (2 * MARGIN + rows.len() as u32 * ROW_SPACING).max(400);
    draw_sheet_sized(width, height, rows)
}

/// A dark photo with an upright sheet covering `top_left` up to, but not
/// including, `bottom_right`.
pub(crate) fn draw_photo(
    width: u32,
    height: u32,
    top_left: (u32, u32),
    bottom_right: (u32, u32),
    rows: &[SheetRow],
) -> RgbImage {
    let sheet = draw_sheet_sized(
        bottom_right.0 - top_left.0,
        bottom_right.1 - top_left.1,
        rows,
    );
    let mut photo = RgbImage::from_pixel(width, height, Rgb([BACKGROUND, BACKGROUND, BACKGROUND]));
    for (x, y, pixel) in sheet.enumerate_pixels() {
        let value = pixel[0];
        photo.put_pixel(top_left.0 + x, top_left.1 + y, Rgb([value, value, value]));
    }
    photo
}

/// Grayscale photo of per-pixel noise from a xorshift generator, so the same
/// `seed` always draws the same photo.
pub(crate) fn draw_noise_photo(width: u32, height: u32, seed: u32) -> RgbImage {
    let mut state = seed.max(1);
    RgbImage::from_fn(width, height, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let value = (state >> 24) as u8;
        Rgb([value, value, value])
    })
}
