use log::trace;

use crate::point::Point;

/// Shortest distance from `p` to the line through `p1` and `p2`.
///
/// When `p1 == p2` the line is undefined and the vertical-line fallback of
/// [`normal_intercept`] applies, giving `|p.x - p1.x|`.
pub fn perpendicular_distance(p1: &Point, p2: &Point, p: &Point) -> f64 {
    let intercept = normal_intercept(p1, p2, p);
    let dist = p.distance_to(&intercept);
    trace!("distance from {} to {} = {}", p, intercept, dist);
    dist
}

/// The point where the line through `p1` and `p2` meets the normal dropped
/// from `p`.
///
/// Exactly vertical and exactly horizontal segments are solved directly,
/// checked in that order; everything else goes through slope-intercept form.
pub fn normal_intercept(p1: &Point, p2: &Point, p: &Point) -> Point {
    if p2.x == p1.x {
        let intercept = Point::new(p1.x, p.y);
        trace!("normal intercept {}-{} from {} (vertical) at {}", p1, p2, p, intercept);
        return intercept;
    }
    if p2.y == p1.y {
        let intercept = Point::new(p.x, p1.y);
        trace!("normal intercept {}-{} from {} (horizontal) at {}", p1, p2, p, intercept);
        return intercept;
    }

    let seg_slope = (p2.y - p1.y) / (p2.x - p1.x);
    let normal_slope = -1.0 / seg_slope;

    // y = mx + b
    let seg_b = p1.y - seg_slope * p1.x;
    let normal_b = p.y - normal_slope * p.x;

    let x = (seg_b - normal_b) / (normal_slope - seg_slope);
    let y = seg_slope * x + seg_b;

    let intercept = Point::new(x, y);
    trace!("normal intercept {}-{} from {} at {}", p1, p2, p, intercept);
    intercept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_vertical_segment() {
        let (p1, p2, p) = (pt(2.0, 0.0), pt(2.0, 10.0), pt(5.0, 4.0));
        assert_eq!(normal_intercept(&p1, &p2, &p), pt(2.0, 4.0));
        assert_eq!(perpendicular_distance(&p1, &p2, &p), 3.0);
    }

    #[test]
    fn test_horizontal_segment() {
        let (p1, p2, p) = (pt(0.0, 3.0), pt(10.0, 3.0), pt(4.0, 7.0));
        assert_eq!(normal_intercept(&p1, &p2, &p), pt(4.0, 3.0));
        assert_eq!(perpendicular_distance(&p1, &p2, &p), 4.0);
    }

    #[test]
    fn test_diagonal_segment() {
        let (p1, p2, p) = (pt(0.0, 0.0), pt(1.0, 1.0), pt(0.0, 2.0));
        let i = normal_intercept(&p1, &p2, &p);
        assert!((i.x - 1.0).abs() < 1e-10);
        assert!((i.y - 1.0).abs() < 1e-10);
        assert!((perpendicular_distance(&p1, &p2, &p) - 2f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_intercept_may_fall_outside_segment() {
        // measured against the infinite line, not the segment
        let (p1, p2, p) = (pt(0.0, 0.0), pt(1.0, 2.0), pt(10.0, 20.0));
        assert!(perpendicular_distance(&p1, &p2, &p) < 1e-9);
    }

    #[test]
    fn test_point_on_line_is_zero() {
        let (p1, p2) = (pt(0.0, 0.0), pt(4.0, 2.0));
        assert!(perpendicular_distance(&p1, &p2, &pt(2.0, 1.0)).abs() < 1e-12);
        assert_eq!(perpendicular_distance(&p1, &pt(0.0, 5.0), &pt(0.0, 3.0)), 0.0);
    }

    #[test]
    fn test_coincident_endpoints_use_vertical_fallback() {
        let p1 = pt(1.0, 1.0);
        let p = pt(4.0, 5.0);
        assert_eq!(normal_intercept(&p1, &p1, &p), pt(1.0, 5.0));
        assert_eq!(perpendicular_distance(&p1, &p1, &p), 3.0);
    }

    #[test]
    fn test_near_vertical_takes_general_branch() {
        let (p1, p2, p) = (pt(2.0, 0.0), pt(2.0 + 1e-9, 10.0), pt(5.0, 4.0));
        let i = normal_intercept(&p1, &p2, &p);
        assert_ne!(i.x, 2.0);
        assert!((perpendicular_distance(&p1, &p2, &p) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_near_horizontal_takes_general_branch() {
        let (p1, p2, p) = (pt(0.0, 3.0), pt(10.0, 3.0 + 1e-9), pt(4.0, 7.0));
        let i = normal_intercept(&p1, &p2, &p);
        assert_ne!(i.y, 3.0);
        assert!((i.x - 4.0).abs() < 1e-6);
        assert!((perpendicular_distance(&p1, &p2, &p) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_coordinates_propagate() {
        let (p1, p2) = (pt(0.0, 0.0), pt(3.0, 4.0));
        assert!(perpendicular_distance(&p1, &p2, &pt(f64::NAN, 1.0)).is_nan());
        assert!(normal_intercept(&p1, &p2, &pt(1.0, f64::INFINITY)).x.is_infinite());
    }
}
