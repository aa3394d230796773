use image::GrayImage;
use imageproc::rect::Rect;
use log::debug;
use logging_timer::time;

use crate::{
    debug::{draw_contour_rects_debug_image_mut, ImageDebugWriter},
    geometry::get_contour_bounding_rect,
    grade::GradingError,
    image_utils::{binarize_inverted, fill_border_mut, BLACK},
    locate::external_contours,
    options::GradingOptions,
    rectify::RectifiedSheet,
    types::MarkCandidate,
};

/// The binarized sheet (ink is `WHITE`) and the bubble-shaped regions on it,
/// in detection order.
#[derive(Debug, Clone)]
pub struct MarkDetection {
    pub binary: GrayImage,
    pub candidates: Vec<MarkCandidate>,
}

/// Determines whether a rect could be a bubble based on its size and shape.
pub fn rect_could_be_mark(options: &GradingOptions, rect: &Rect) -> bool {
    let aspect_ratio = rect.width() as f32 / rect.height() as f32;
    rect.width() >= options.min_mark_size
        && rect.height() >= options.min_mark_size
        && aspect_ratio >= options.min_mark_aspect
        && aspect_ratio <= options.max_mark_aspect
}

/// Binarizes the rectified sheet and keeps every external region shaped
/// like a bubble.
#[time]
pub fn find_mark_candidates(gray: &GrayImage, options: &GradingOptions) -> MarkDetection {
    let (mut binary, level) = binarize_inverted(gray);
    fill_border_mut(&mut binary, options.border_margin, BLACK);
    debug!("binarized sheet at level {}", level);

    let candidates = external_contours(&binary)
        .into_iter()
        .filter_map(|contour| {
            let bounds = get_contour_bounding_rect(&contour.points)?;
            rect_could_be_mark(options, &bounds).then(|| MarkCandidate::new(bounds, contour.points))
        })
        .collect::<Vec<MarkCandidate>>();

    MarkDetection { binary, candidates }
}

/// Finds the bubbles on a rectified sheet.
#[time]
pub fn detect_marks(
    sheet: &RectifiedSheet,
    options: &GradingOptions,
    debug: &ImageDebugWriter,
) -> Result<MarkDetection, GradingError> {
    let detection = find_mark_candidates(&sheet.gray, options);
    debug.write_gray("binary", &detection.binary);
    debug.write("candidates", &sheet.color, |canvas| {
        let rects = detection
            .candidates
            .iter()
            .map(|candidate| candidate.bounds)
            .collect::<Vec<Rect>>();
        draw_contour_rects_debug_image_mut(canvas, &rects);
    });

    if detection.candidates.is_empty() {
        return Err(GradingError::NoMarksFound);
    }

    debug!("found {} mark candidates", detection.candidates.len());
    Ok(detection)
}
