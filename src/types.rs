use imageproc::point::Point;
use imageproc::rect::Rect;

use crate::geometry::order_corners;

/// Number of options per question. Option `0` is "A", option `4` is "E".
pub const ALTERNATIVES: usize = 5;

/// Returns the letter printed next to the option at `index`.
pub fn option_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

/// Parses an option letter (`A`..`E`, either case) into its index.
pub fn option_from_letter(letter: &str) -> Option<usize> {
    let mut chars = letter.trim().chars();
    let c = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() || !c.is_ascii_uppercase() {
        return None;
    }
    let index = (c as u8 - b'A') as usize;
    (index < ALTERNATIVES).then_some(index)
}

/// Four corners of the answer sheet as found in the photo, in contour order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrilateral {
    pub corners: [Point<f32>; 4],
}

impl Quadrilateral {
    pub fn new(corners: [Point<f32>; 4]) -> Self {
        Self { corners }
    }

    /// Corners as top-left, top-right, bottom-right, bottom-left.
    pub fn ordered(&self) -> [Point<f32>; 4] {
        order_corners(&self.corners)
    }
}

/// A bubble-shaped region found on the rectified sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkCandidate {
    pub bounds: Rect,
    /// Outer border of the region, in rectified sheet coordinates.
    pub contour: Vec<Point<i32>>,
}

impl MarkCandidate {
    pub fn new(bounds: Rect, contour: Vec<Point<i32>>) -> Self {
        Self { bounds, contour }
    }
}

/// The options of one question, left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionGroup {
    pub options: [MarkCandidate; ALTERNATIVES],
}

impl QuestionGroup {
    pub fn option(&self, index: usize) -> Option<&MarkCandidate> {
        self.options.get(index)
    }
}
