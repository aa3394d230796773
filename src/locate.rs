use image::{GrayImage, RgbImage};
use imageproc::{
    contours::{find_contours, BorderType, Contour},
    distance_transform::Norm,
    edges::canny,
    filter::gaussian_blur_f32,
    morphology::dilate,
    point::Point,
};
use log::debug;
use logging_timer::time;

use crate::{
    debug::{draw_document_quad_debug_image_mut, ImageDebugWriter},
    geometry::{approximate_polygon, arc_length, polygon_area, to_f32_points},
    grade::GradingError,
    options::GradingOptions,
    types::Quadrilateral,
};

/// Outer borders that are not nested inside any other region.
pub fn external_contours(img: &GrayImage) -> Vec<Contour<i32>> {
    find_contours::<i32>(img)
        .into_iter()
        .filter(|contour| contour.border_type == BorderType::Outer && contour.parent.is_none())
        .collect()
}

/// Edge map used to find the sheet outline.
#[time]
pub fn find_document_edges(gray: &GrayImage, options: &GradingOptions) -> GrayImage {
    let blurred = gaussian_blur_f32(gray, options.blur_sigma);
    let edges = canny(&blurred, options.canny_low, options.canny_high);
    if options.edge_dilation > 0 {
        dilate(&edges, Norm::LInf, options.edge_dilation)
    } else {
        edges
    }
}

/// Picks the largest external contour that simplifies to exactly four
/// vertices.
pub fn find_document_quadrilateral(
    edges: &GrayImage,
    options: &GradingOptions,
) -> Option<Quadrilateral> {
    let mut outlines = external_contours(edges)
        .iter()
        .map(|contour| to_f32_points(&contour.points))
        .map(|points| (polygon_area(&points), points))
        .collect::<Vec<(f32, Vec<Point<f32>>)>>();

    // stable, so equal areas keep detection order
    outlines.sort_by(|a, b| b.0.total_cmp(&a.0));
    debug!("found {} external contours", outlines.len());

    outlines.iter().find_map(|(area, points)| {
        let epsilon = options.polygon_epsilon_ratio * arc_length(points, true);
        if epsilon <= 0.0 {
            return None;
        }
        match approximate_polygon(points, epsilon).as_slice() {
            [a, b, c, d] => {
                debug!("document outline has area {}", area);
                Some(Quadrilateral::new([*a, *b, *c, *d]))
            }
            _ => None,
        }
    })
}

/// Finds the outline of the answer sheet in a photo.
#[time]
pub fn locate_document(
    photo: &RgbImage,
    gray: &GrayImage,
    options: &GradingOptions,
    debug: &ImageDebugWriter,
) -> Result<Quadrilateral, GradingError> {
    let edges = find_document_edges(gray, options);
    debug.write_gray("edges", &edges);

    let quad = find_document_quadrilateral(&edges, options).ok_or_else(|| {
        GradingError::NoDocumentFound {
            reason: "no contour simplifies to four corners".to_string(),
        }
    })?;

    debug.write("document", photo, |canvas| {
        draw_document_quad_debug_image_mut(canvas, &quad)
    });

    Ok(quad)
}
