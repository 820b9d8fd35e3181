//! Closed-form scalar fields and coverage.
//!
//! Every geometry kind maps a sample point to a signed field value in
//! pixels: negative or zero inside the shape, positive outside. Coverage
//! converts that value to [0, 1] via the shape's falloff, and drives both
//! the colour gradient and alpha compositing.

use crate::types::{Falloff, Geometry, Point};

/// Distance from `p` to the segment `a`..`b`.
///
/// Returns 0 for points on the segment, the perpendicular distance inside
/// the projection range, and the distance to the nearest endpoint outside it.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;

    // Degenerate segment collapses to a point.
    if len_sq == 0.0 {
        return p.distance(a);
    }

    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    let closest = Point::new(a.x + abx * t, a.y + aby * t);
    p.distance(closest)
}

/// Evaluate a geometry's signed field at a sample point.
pub fn eval(geometry: &Geometry, p: Point) -> f32 {
    match geometry {
        Geometry::Disc { center, radius } => p.distance(*center) - radius,

        Geometry::Segment { from, to, width } => {
            distance_to_segment(p, *from, *to) - width / 2.0
        }

        Geometry::Ellipse { center, rx, ry } => {
            // Normalized membership mapped back to an approximate
            // pixel-space distance; exact for circles.
            let nx = (p.x - center.x) / rx.max(f32::EPSILON);
            let ny = (p.y - center.y) / ry.max(f32::EPSILON);
            ((nx * nx + ny * ny).sqrt() - 1.0) * rx.min(*ry)
        }

        Geometry::Ring {
            center,
            radius,
            width,
        } => (p.distance(*center) - radius).abs() - width / 2.0,

        Geometry::Arc {
            center,
            radius,
            width,
            start,
            sweep,
        } => {
            if !sector_contains(*center, p, *start, *sweep) {
                return f32::INFINITY;
            }
            (p.distance(*center) - radius).abs() - width / 2.0
        }
    }
}

/// Angular sector membership test.
///
/// Angles are in degrees, measured clockwise from the positive x axis with
/// y pointing down. The sector spans `[start, start + sweep]`.
fn sector_contains(center: Point, p: Point, start: f32, sweep: f32) -> bool {
    if sweep >= 360.0 {
        return true;
    }

    let angle = (p.y - center.y).atan2(p.x - center.x).to_degrees();
    (angle - start).rem_euclid(360.0) <= sweep
}

/// Convert a signed field value to coverage in [0, 1].
///
/// `clamp(1 - d/softness, 0, 1) ^ power`. The ramp spans `softness` pixels
/// just outside the nominal boundary; beyond it coverage is exactly 0.
pub fn coverage(field: f32, falloff: &Falloff) -> f32 {
    let softness = falloff.softness.max(f32::EPSILON);
    let c = (1.0 - field / softness).clamp(0.0, 1.0);

    if falloff.power == 1.0 {
        c
    } else {
        c.powf(falloff.power.max(f32::EPSILON))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_segment_distance_on_segment() {
        let a = pt(0.0, 0.0);
        let b = pt(10.0, 0.0);

        assert_eq!(distance_to_segment(pt(0.0, 0.0), a, b), 0.0);
        assert_eq!(distance_to_segment(pt(5.0, 0.0), a, b), 0.0);
        assert_eq!(distance_to_segment(pt(10.0, 0.0), a, b), 0.0);
    }

    #[test]
    fn test_segment_distance_perpendicular() {
        let a = pt(0.0, 0.0);
        let b = pt(10.0, 0.0);

        assert_eq!(distance_to_segment(pt(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(pt(2.0, -4.0), a, b), 4.0);
    }

    #[test]
    fn test_segment_distance_clamps_to_endpoints() {
        let a = pt(0.0, 0.0);
        let b = pt(10.0, 0.0);

        // Beyond either endpoint, the nearest point is the endpoint itself.
        assert_eq!(distance_to_segment(pt(-3.0, 4.0), a, b), 5.0);
        assert_eq!(distance_to_segment(pt(13.0, 4.0), a, b), 5.0);
    }

    #[test]
    fn test_segment_degenerate_is_point_distance() {
        let a = pt(2.0, 2.0);
        assert_eq!(distance_to_segment(pt(5.0, 6.0), a, a), 5.0);
    }

    #[test]
    fn test_disc_field_sign() {
        let disc = Geometry::Disc {
            center: pt(50.0, 50.0),
            radius: 10.0,
        };

        assert!(eval(&disc, pt(50.0, 50.0)) < 0.0);
        assert_eq!(eval(&disc, pt(60.0, 50.0)), 0.0);
        assert!(eval(&disc, pt(70.0, 50.0)) > 0.0);
    }

    #[test]
    fn test_ellipse_field_matches_circle() {
        let ellipse = Geometry::Ellipse {
            center: pt(0.0, 0.0),
            rx: 10.0,
            ry: 10.0,
        };
        let disc = Geometry::Disc {
            center: pt(0.0, 0.0),
            radius: 10.0,
        };

        for p in [pt(0.0, 0.0), pt(5.0, 0.0), pt(10.0, 0.0), pt(20.0, 0.0)] {
            let diff = (eval(&ellipse, p) - eval(&disc, p)).abs();
            assert!(diff < 1e-4, "mismatch at {:?}: {}", p, diff);
        }
    }

    #[test]
    fn test_ellipse_field_axes() {
        let ellipse = Geometry::Ellipse {
            center: pt(0.0, 0.0),
            rx: 20.0,
            ry: 10.0,
        };

        // On-boundary points along both axes
        assert!(eval(&ellipse, pt(20.0, 0.0)).abs() < 1e-4);
        assert!(eval(&ellipse, pt(0.0, 10.0)).abs() < 1e-4);
        // Inside / outside
        assert!(eval(&ellipse, pt(0.0, 0.0)) < 0.0);
        assert!(eval(&ellipse, pt(25.0, 0.0)) > 0.0);
    }

    #[test]
    fn test_ring_field() {
        let ring = Geometry::Ring {
            center: pt(0.0, 0.0),
            radius: 10.0,
            width: 4.0,
        };

        // Center of the stroke
        assert_eq!(eval(&ring, pt(10.0, 0.0)), -2.0);
        // Stroke edges
        assert_eq!(eval(&ring, pt(8.0, 0.0)), 0.0);
        assert_eq!(eval(&ring, pt(12.0, 0.0)), 0.0);
        // Hole and outside
        assert!(eval(&ring, pt(0.0, 0.0)) > 0.0);
        assert!(eval(&ring, pt(20.0, 0.0)) > 0.0);
    }

    #[test]
    fn test_arc_sector_gating() {
        // Right half-plane sector: -90..+90 degrees
        let arc = Geometry::Arc {
            center: pt(0.0, 0.0),
            radius: 10.0,
            width: 4.0,
            start: -90.0,
            sweep: 180.0,
        };

        // On the stroke, inside the sector (positive x axis)
        assert_eq!(eval(&arc, pt(10.0, 0.0)), -2.0);
        // Same radius, outside the sector (negative x axis)
        assert_eq!(eval(&arc, pt(-10.0, 0.0)), f32::INFINITY);
    }

    #[test]
    fn test_arc_full_sweep_is_ring() {
        let arc = Geometry::Arc {
            center: pt(0.0, 0.0),
            radius: 10.0,
            width: 4.0,
            start: 0.0,
            sweep: 360.0,
        };
        let ring = Geometry::Ring {
            center: pt(0.0, 0.0),
            radius: 10.0,
            width: 4.0,
        };

        for p in [pt(10.0, 0.0), pt(-10.0, 0.0), pt(0.0, 10.0), pt(3.0, 3.0)] {
            assert_eq!(eval(&arc, p), eval(&ring, p));
        }
    }

    #[test]
    fn test_arc_sector_wraps_around_zero() {
        // Sector from 350 degrees sweeping 20 degrees crosses the 0 axis.
        let center = pt(0.0, 0.0);
        assert!(sector_contains(center, pt(10.0, 0.0), 350.0, 20.0));
        assert!(sector_contains(center, pt(10.0, -1.0), 350.0, 20.0));
        assert!(!sector_contains(center, pt(0.0, 10.0), 350.0, 20.0));
    }

    #[test]
    fn test_coverage_inside_is_full() {
        let falloff = Falloff::default();
        assert_eq!(coverage(-5.0, &falloff), 1.0);
        assert_eq!(coverage(0.0, &falloff), 1.0);
    }

    #[test]
    fn test_coverage_ramp() {
        let falloff = Falloff::new(2.0, 1.0);
        assert_eq!(coverage(1.0, &falloff), 0.5);
        assert_eq!(coverage(2.0, &falloff), 0.0);
        assert_eq!(coverage(100.0, &falloff), 0.0);
    }

    #[test]
    fn test_coverage_power_shapes_curve() {
        let linear = Falloff::new(2.0, 1.0);
        let squared = Falloff::new(2.0, 2.0);

        let c_linear = coverage(1.0, &linear);
        let c_squared = coverage(1.0, &squared);
        assert_eq!(c_linear, 0.5);
        assert_eq!(c_squared, 0.25);
    }

    #[test]
    fn test_coverage_infinite_field_is_zero() {
        assert_eq!(coverage(f32::INFINITY, &Falloff::default()), 0.0);
    }
}
