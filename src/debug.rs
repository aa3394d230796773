use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, RgbImage};
use imageproc::{
    drawing::{draw_cross_mut, draw_hollow_rect_mut, draw_line_segment_mut},
    rect::Rect,
};
use log::{debug, warn};

use crate::{
    geometry::center_of_rect,
    image_utils::{GREEN, PINK, RAINBOW, WHITE_RGB},
    types::{Quadrilateral, QuestionGroup},
};

/// Creates a path for a debug image.
pub fn debug_image_path(base: &Path, label: &str) -> PathBuf {
    let mut result = PathBuf::from(base);
    result.set_file_name(format!(
        "{}_debug_{}.png",
        base.file_stem().unwrap_or_default().to_string_lossy(),
        label
    ));
    result
}

/// Writes intermediate pipeline images next to the input photo. A disabled
/// writer does nothing, so stages can call it unconditionally.
#[derive(Debug, Clone)]
pub struct ImageDebugWriter {
    input_path: Option<PathBuf>,
}

impl ImageDebugWriter {
    pub fn new(input_path: PathBuf) -> Self {
        Self {
            input_path: Some(input_path),
        }
    }

    pub fn disabled() -> Self {
        Self { input_path: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.input_path.is_some()
    }

    /// Draws on a copy of `base` and saves it under `label`.
    pub fn write<F>(&self, label: &str, base: &RgbImage, draw: F) -> Option<PathBuf>
    where
        F: FnOnce(&mut RgbImage),
    {
        let input_path = self.input_path.as_ref()?;
        let mut canvas = base.clone();
        draw(&mut canvas);
        save(debug_image_path(input_path, label), DynamicImage::ImageRgb8(canvas))
    }

    /// Saves a single-channel image under `label` as-is.
    pub fn write_gray(&self, label: &str, img: &GrayImage) -> Option<PathBuf> {
        let input_path = self.input_path.as_ref()?;
        save(
            debug_image_path(input_path, label),
            DynamicImage::ImageLuma8(img.clone()),
        )
    }
}

fn save(path: PathBuf, img: DynamicImage) -> Option<PathBuf> {
    match img.save(&path) {
        Ok(()) => {
            debug!("wrote debug image {}", path.display());
            Some(path)
        }
        Err(e) => {
            warn!("unable to write debug image {}: {}", path.display(), e);
            None
        }
    }
}

/// Draws the outline of the located document.
pub fn draw_document_quad_debug_image_mut(canvas: &mut RgbImage, quad: &Quadrilateral) {
    let corners = quad.ordered();
    for i in 0..corners.len() {
        let start = corners[i];
        let end = corners[(i + 1) % corners.len()];
        draw_line_segment_mut(canvas, (start.x, start.y), (end.x, end.y), GREEN);
    }
    for corner in corners {
        draw_cross_mut(canvas, PINK, corner.x.round() as i32, corner.y.round() as i32);
    }
}

/// Draws a debug image of the rectangles found using the contour algorithm.
pub fn draw_contour_rects_debug_image_mut(canvas: &mut RgbImage, contour_rects: &[Rect]) {
    for (i, rect) in contour_rects.iter().enumerate() {
        draw_hollow_rect_mut(canvas, *rect, RAINBOW[i % RAINBOW.len()]);
    }
}

/// Draws every question row in its own color, joined left to right.
pub fn draw_question_rows_debug_image_mut(canvas: &mut RgbImage, groups: &[QuestionGroup]) {
    for (question, group) in groups.iter().enumerate() {
        let color = RAINBOW[question % RAINBOW.len()];
        for window in group.options.windows(2) {
            let start = center_of_rect(&window[0].bounds);
            let end = center_of_rect(&window[1].bounds);
            draw_line_segment_mut(canvas, (start.x, start.y), (end.x, end.y), WHITE_RGB);
        }
        for option in &group.options {
            draw_hollow_rect_mut(canvas, option.bounds, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_image_path() {
        assert_eq!(
            debug_image_path(Path::new("/tmp/scans/sheet-01.jpeg"), "edges"),
            PathBuf::from("/tmp/scans/sheet-01_debug_edges.png")
        );
    }

    #[test]
    fn test_disabled_writer_writes_nothing() {
        let writer = ImageDebugWriter::disabled();
        assert!(!writer.is_enabled());
        let mut called = false;
        let written = writer.write("rows", &RgbImage::new(4, 4), |_| called = true);
        assert!(written.is_none());
        assert!(!called);
    }

    #[test]
    fn test_enabled_writer_saves_png() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ImageDebugWriter::new(dir.path().join("photo.jpg"));

        let path = writer
            .write("document", &RgbImage::new(8, 8), |canvas| {
                draw_contour_rects_debug_image_mut(canvas, &[Rect::at(1, 1).of_size(4, 4)]);
            })
            .unwrap();
        assert_eq!(path, dir.path().join("photo_debug_document.png"));

        let saved = image::open(&path).unwrap().to_rgb8();
        assert_eq!(*saved.get_pixel(1, 1), RAINBOW[0]);

        let gray = writer.write_gray("binary", &GrayImage::new(3, 3)).unwrap();
        assert!(gray.exists());
    }
}
