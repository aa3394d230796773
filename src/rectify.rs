use image::{GrayImage, Rgb, RgbImage};
use imageproc::geometric_transformations::{warp_into, Interpolation, Projection};
use log::debug;
use logging_timer::time;

use crate::{
    geometry::distance_from_point_to_point, grade::GradingError, image_utils::WHITE,
    types::Quadrilateral,
};

/// The answer sheet viewed face-on. Both images have the same dimensions and
/// every coordinate refers to the same spot on the sheet in each.
#[derive(Debug, Clone)]
pub struct RectifiedSheet {
    pub color: RgbImage,
    pub gray: GrayImage,
}

/// Output size for a quadrilateral: the longer of each pair of opposite
/// edges, measured between pixel centres.
pub fn rectified_size(quad: &Quadrilateral) -> (u32, u32) {
    let [tl, tr, br, bl] = quad.ordered();
    let width = distance_from_point_to_point(&br, &bl).max(distance_from_point_to_point(&tr, &tl));
    let height =
        distance_from_point_to_point(&tr, &br).max(distance_from_point_to_point(&tl, &bl));
    (width.round() as u32 + 1, height.round() as u32 + 1)
}

/// Warps the quadrilateral in `photo` and `gray` onto an upright rectangle.
#[time]
pub fn rectify_document(
    photo: &RgbImage,
    gray: &GrayImage,
    quad: &Quadrilateral,
) -> Result<RectifiedSheet, GradingError> {
    let (width, height) = rectified_size(quad);
    if width < 2 || height < 2 {
        return Err(GradingError::NoDocumentFound {
            reason: format!("document outline collapses to {}x{}", width, height),
        });
    }

    let [tl, tr, br, bl] = quad.ordered();
    let (right, bottom) = ((width - 1) as f32, (height - 1) as f32);
    let projection = Projection::from_control_points(
        [(tl.x, tl.y), (tr.x, tr.y), (br.x, br.y), (bl.x, bl.y)],
        [(0.0, 0.0), (right, 0.0), (right, bottom), (0.0, bottom)],
    )
    .ok_or_else(|| GradingError::NoDocumentFound {
        reason: "document outline is degenerate".to_string(),
    })?;

    debug!("rectifying document to {}x{}", width, height);

    let (color, gray) = rayon::join(
        || {
            let mut out = RgbImage::new(width, height);
            warp_into(
                photo,
                &projection,
                Interpolation::Bilinear,
                Rgb([255, 255, 255]),
                &mut out,
            );
            out
        },
        || {
            let mut out = GrayImage::new(width, height);
            warp_into(gray, &projection, Interpolation::Bilinear, WHITE, &mut out);
            out
        },
    );

    Ok(RectifiedSheet { color, gray })
}
