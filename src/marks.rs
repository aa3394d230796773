use image::GrayImage;
use imageproc::{
    drawing::{draw_filled_rect_mut, draw_polygon_mut},
    point::Point,
    rect::Rect,
};

use crate::{
    image_utils::{count_masked_pixels, WHITE},
    types::{MarkCandidate, QuestionGroup, ALTERNATIVES},
};

/// Ink counts for each option of one question and the option judged filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkReading {
    pub fill_counts: [u32; ALTERNATIVES],
    pub selected: usize,
}

/// A mask the size of the candidate's bounds covering exactly its region.
pub fn candidate_mask(candidate: &MarkCandidate) -> GrayImage {
    let bounds = candidate.bounds;
    let mut mask = GrayImage::new(bounds.width(), bounds.height());

    let mut polygon = candidate
        .contour
        .iter()
        .map(|p| Point::new(p.x - bounds.left(), p.y - bounds.top()))
        .collect::<Vec<Point<i32>>>();
    polygon.dedup();
    while polygon.len() > 1 && polygon.first() == polygon.last() {
        polygon.pop();
    }

    if polygon.len() < 3 {
        draw_filled_rect_mut(
            &mut mask,
            Rect::at(0, 0).of_size(bounds.width(), bounds.height()),
            WHITE,
        );
    } else {
        draw_polygon_mut(&mut mask, &polygon, WHITE);
    }
    mask
}

/// Number of ink pixels inside the candidate's region.
pub fn count_fill(candidate: &MarkCandidate, binary: &GrayImage) -> u32 {
    let mask = candidate_mask(candidate);
    count_masked_pixels(binary, &mask, candidate.bounds.left(), candidate.bounds.top())
}

/// Picks the option with the most ink. On equal counts the left-most option
/// wins.
pub fn read_group(group: &QuestionGroup, binary: &GrayImage) -> MarkReading {
    let mut fill_counts = [0; ALTERNATIVES];
    let mut selected = 0;
    for (i, candidate) in group.options.iter().enumerate() {
        fill_counts[i] = count_fill(candidate, binary);
        if fill_counts[i] > fill_counts[selected] {
            selected = i;
        }
    }
    MarkReading {
        fill_counts,
        selected,
    }
}
