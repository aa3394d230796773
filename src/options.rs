use serde::Deserialize;

/// Tunable parameters for every stage of the grading pipeline. The defaults
/// suit a phone photo of a sheet against a dark background.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GradingOptions {
    /// Gaussian sigma applied before edge detection. `1.1` matches a 5x5 kernel.
    pub blur_sigma: f32,
    pub canny_low: f32,
    pub canny_high: f32,
    /// Radius, in pixels, by which the edge map is dilated to close gaps in
    /// the sheet outline. `0` disables dilation.
    pub edge_dilation: u8,
    /// Polygon approximation tolerance as a fraction of the contour perimeter.
    pub polygon_epsilon_ratio: f32,
    /// Width of the frame cleared around the rectified sheet before marks are
    /// extracted.
    pub border_margin: u32,
    pub min_mark_size: u32,
    pub min_mark_aspect: f32,
    pub max_mark_aspect: f32,
    /// Fail with `MalformedRowCount` instead of grading when the number of
    /// marks is not a multiple of the options per question.
    pub strict_row_count: bool,
    pub overlay_thickness: u32,
}

impl Default for GradingOptions {
    fn default() -> Self {
        Self {
            blur_sigma: 1.1,
            canny_low: 75.0,
            canny_high: 200.0,
            edge_dilation: 1,
            polygon_epsilon_ratio: 0.02,
            border_margin: 5,
            min_mark_size: 20,
            min_mark_aspect: 0.9,
            max_mark_aspect: 1.1,
            strict_row_count: false,
            overlay_thickness: 3,
        }
    }
}
