use imageproc::point::Point;
use imageproc::rect::Rect;

pub fn distance_from_point_to_point(p1: &Point<f32>, p2: &Point<f32>) -> f32 {
    ((p1.x - p2.x).powf(2.0) + (p1.y - p2.y).powf(2.0)).sqrt()
}

/// Distance from `p` to the infinite line through `a` and `b`. Falls back to
/// the distance from `p` to `a` when the line is degenerate.
pub fn distance_from_point_to_line(p: &Point<f32>, a: &Point<f32>, b: &Point<f32>) -> f32 {
    let length = distance_from_point_to_point(a, b);
    if length == 0.0 {
        return distance_from_point_to_point(p, a);
    }
    ((b.x - a.x) * (a.y - p.y) - (a.x - p.x) * (b.y - a.y)).abs() / length
}

pub fn center_of_rect(rect: &Rect) -> Point<f32> {
    Point::new(
        rect.left() as f32 + rect.width() as f32 / 2.0,
        rect.top() as f32 + rect.height() as f32 / 2.0,
    )
}

pub fn to_f32_points(points: &[Point<i32>]) -> Vec<Point<f32>> {
    points
        .iter()
        .map(|p| Point::new(p.x as f32, p.y as f32))
        .collect()
}

/// Smallest axis-aligned rect containing every contour point.
pub fn get_contour_bounding_rect(points: &[Point<i32>]) -> Option<Rect> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(Rect::at(min_x, min_y).of_size((max_x - min_x + 1) as u32, (max_y - min_y + 1) as u32))
}

/// Length of the polyline through `points`, including the closing edge when
/// `closed` is set.
pub fn arc_length(points: &[Point<f32>], closed: bool) -> f32 {
    let mut length = points
        .windows(2)
        .map(|w| distance_from_point_to_point(&w[0], &w[1]))
        .sum::<f32>();
    if closed && points.len() > 2 {
        length += distance_from_point_to_point(&points[points.len() - 1], &points[0]);
    }
    length
}

/// Area enclosed by a closed polygon (shoelace formula).
pub fn polygon_area(points: &[Point<f32>]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice_area = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum::<f32>();
    twice_area.abs() / 2.0
}

/// Simplifies an open polyline with the Douglas-Peucker algorithm. Both
/// endpoints are always kept.
fn approximate_polyline(points: &[Point<f32>], epsilon: f32) -> Vec<Point<f32>> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = &points[0];
    let last = &points[points.len() - 1];
    let (index, max_distance) = points
        .iter()
        .enumerate()
        .skip(1)
        .take(points.len() - 2)
        .map(|(i, p)| (i, distance_from_point_to_line(p, first, last)))
        .fold((0, 0.0_f32), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        });

    if max_distance <= epsilon {
        return vec![*first, *last];
    }

    let mut head = approximate_polyline(&points[..=index], epsilon);
    let tail = approximate_polyline(&points[index..], epsilon);
    head.pop();
    head.extend(tail);
    head
}

/// Index of the point in `points` farthest from `points[from]`, with its
/// distance.
fn farthest_point(points: &[Point<f32>], from: usize) -> (usize, f32) {
    let origin = &points[from];
    points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, distance_from_point_to_point(origin, p)))
        .fold((from, 0.0_f32), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        })
}

/// Simplifies a closed contour with the Douglas-Peucker algorithm.
///
/// The ring is split at a pair of mutually distant points, so the split never
/// lands partway along a straight edge, and each half is simplified on its
/// own. Vertices left lying within `epsilon` of the line through their
/// neighbours are then dropped, including across the wrap-around. The result
/// does not repeat its first vertex.
pub fn approximate_polygon(points: &[Point<f32>], epsilon: f32) -> Vec<Point<f32>> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let (mut a, distance) = farthest_point(points, 0);
    if distance == 0.0 {
        return vec![points[0]];
    }
    let (mut b, _) = farthest_point(points, a);
    for _ in 0..3 {
        let (next, _) = farthest_point(points, b);
        if next == a {
            break;
        }
        a = b;
        b = next;
    }

    let (low, high) = (a.min(b), a.max(b));
    let mut ring = points[low..].to_vec();
    ring.extend_from_slice(&points[..low]);
    let split = high - low;

    let mut second_half = ring[split..].to_vec();
    second_half.push(ring[0]);

    let mut polygon = approximate_polyline(&ring[..=split], epsilon);
    let mut rest = approximate_polyline(&second_half, epsilon);
    polygon.pop();
    rest.pop();
    polygon.extend(rest);

    drop_collinear_vertices(&mut polygon, epsilon);
    polygon
}

fn drop_collinear_vertices(polygon: &mut Vec<Point<f32>>, epsilon: f32) {
    while polygon.len() > 3 {
        let n = polygon.len();
        let collinear = (0..n).find(|&i| {
            let previous = &polygon[(i + n - 1) % n];
            let next = &polygon[(i + 1) % n];
            distance_from_point_to_line(&polygon[i], previous, next) <= epsilon
        });
        match collinear {
            Some(i) => {
                polygon.remove(i);
            }
            None => break,
        }
    }
}

/// Orders four corners as top-left, top-right, bottom-right, bottom-left.
///
/// The top-left corner has the smallest `x + y` and the bottom-right the
/// largest; the top-right has the smallest `y - x` and the bottom-left the
/// largest.
pub fn order_corners(corners: &[Point<f32>; 4]) -> [Point<f32>; 4] {
    let by = |key: fn(&Point<f32>) -> f32, largest: bool| -> Point<f32> {
        let mut best = corners[0];
        for corner in &corners[1..] {
            let ordering = key(corner).total_cmp(&key(&best));
            if (largest && ordering.is_gt()) || (!largest && ordering.is_lt()) {
                best = *corner;
            }
        }
        best
    };

    let sum = |p: &Point<f32>| p.x + p.y;
    let diff = |p: &Point<f32>| p.y - p.x;

    [
        by(sum, false),
        by(diff, false),
        by(sum, true),
        by(diff, true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle_contour(left: i32, top: i32, right: i32, bottom: i32) -> Vec<Point<f32>> {
        let mut points = vec![];
        for x in left..right {
            points.push(Point::new(x as f32, top as f32));
        }
        for y in top..bottom {
            points.push(Point::new(right as f32, y as f32));
        }
        for x in (left + 1..=right).rev() {
            points.push(Point::new(x as f32, bottom as f32));
        }
        for y in (top + 1..=bottom).rev() {
            points.push(Point::new(left as f32, y as f32));
        }
        points
    }

    #[test]
    fn test_polygon_area_of_rectangle() {
        let corners = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(0.0, 5.0),
        ];
        assert_eq!(polygon_area(&corners), 50.0);
        assert_eq!(arc_length(&corners, true), 30.0);
        assert_eq!(arc_length(&corners, false), 25.0);
    }

    #[test]
    fn test_approximate_polygon_reduces_rectangle_to_corners() {
        let contour = rectangle_contour(10, 20, 110, 80);
        let epsilon = 0.02 * arc_length(&contour, true);
        let polygon = approximate_polygon(&contour, epsilon);
        assert_eq!(
            polygon,
            vec![
                Point::new(10.0, 20.0),
                Point::new(110.0, 20.0),
                Point::new(110.0, 80.0),
                Point::new(10.0, 80.0),
            ]
        );
    }

    /// Pixel outline of the polygon through `corners`, rotated to begin
    /// `offset` points in.
    fn traced_outline(corners: &[(f32, f32)], offset: usize) -> Vec<Point<f32>> {
        let mut points = vec![];
        for (i, &(x0, y0)) in corners.iter().enumerate() {
            let (x1, y1) = corners[(i + 1) % corners.len()];
            let steps = (x1 - x0).abs().max((y1 - y0).abs()).round() as usize;
            for step in 0..steps {
                let t = step as f32 / steps as f32;
                points.push(Point::new(
                    (x0 + t * (x1 - x0)).round(),
                    (y0 + t * (y1 - y0)).round(),
                ));
            }
        }
        points.rotate_left(offset);
        points
    }

    fn assert_corners(polygon: &[Point<f32>], corners: &[(f32, f32)]) {
        assert_eq!(polygon.len(), corners.len(), "polygon {:?}", polygon);
        for &(x, y) in corners {
            assert!(
                polygon
                    .iter()
                    .any(|p| distance_from_point_to_point(p, &Point::new(x, y)) <= 1.5),
                "corner ({}, {}) missing from {:?}",
                x,
                y,
                polygon
            );
        }
    }

    #[test]
    fn test_approximate_polygon_outline_starting_mid_edge() {
        let contour = rectangle_contour(10, 20, 110, 80);
        for offset in [17, 50, 120, contour.len() - 30] {
            let mut rotated = contour.clone();
            rotated.rotate_left(offset);
            let epsilon = 0.02 * arc_length(&rotated, true);
            assert_corners(
                &approximate_polygon(&rotated, epsilon),
                &[(10.0, 20.0), (110.0, 20.0), (110.0, 80.0), (10.0, 80.0)],
            );
        }
    }

    #[test]
    fn test_approximate_polygon_skewed_outline_starting_mid_edge() {
        let corners = [(57.0, 45.0), (397.0, 38.0), (405.0, 483.0), (46.0, 472.0)];
        // begins on the sloped top edge, away from any corner
        let contour = traced_outline(&corners, 300);
        let epsilon = 0.02 * arc_length(&contour, true);
        assert_corners(&approximate_polygon(&contour, epsilon), &corners);
    }

    #[test]
    fn test_approximate_polygon_keeps_triangle() {
        let triangle = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 8.0),
        ];
        assert_eq!(approximate_polygon(&triangle, 0.5).len(), 3);
    }

    #[test]
    fn test_order_corners() {
        let corners = [
            Point::new(90.0, 95.0),
            Point::new(5.0, 10.0),
            Point::new(8.0, 88.0),
            Point::new(97.0, 3.0),
        ];
        assert_eq!(
            order_corners(&corners),
            [
                Point::new(5.0, 10.0),
                Point::new(97.0, 3.0),
                Point::new(90.0, 95.0),
                Point::new(8.0, 88.0),
            ]
        );
    }

    #[test]
    fn test_bounding_rect() {
        let points = vec![Point::new(3, 4), Point::new(7, 2), Point::new(5, 9)];
        let rect = get_contour_bounding_rect(&points).unwrap();
        assert_eq!((rect.left(), rect.top()), (3, 2));
        assert_eq!((rect.width(), rect.height()), (5, 8));
        assert!(get_contour_bounding_rect(&[]).is_none());
    }

    #[test]
    fn test_distance_from_point_to_line() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(distance_from_point_to_line(&Point::new(3.0, 4.0), &a, &b), 4.0);
        assert_eq!(distance_from_point_to_line(&Point::new(3.0, 4.0), &a, &a), 5.0);
    }
}
