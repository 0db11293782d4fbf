//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use gearsketch::float_types::Real;
use nalgebra::Point2;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Distance of `p` from the origin.
pub fn radius_of(p: &Point2<Real>) -> Real {
    p.coords.norm()
}

/// Polar angle of `p` in `[0, 2π)`.
pub fn polar_angle(p: &Point2<Real>) -> Real {
    gearsketch::float_types::normalize_angle(p.y.atan2(p.x))
}

/// Returns `[min_x, min_y, max_x, max_y]` for a set of points.
pub fn bounding_box(points: &[Point2<Real>]) -> [Real; 4] {
    let mut min_x = Real::MAX;
    let mut min_y = Real::MAX;
    let mut max_x = Real::MIN;
    let mut max_y = Real::MIN;

    for p in points {
        if p.x < min_x {
            min_x = p.x;
        }
        if p.y < min_y {
            min_y = p.y;
        }
        if p.x > max_x {
            max_x = p.x;
        }
        if p.y > max_y {
            max_y = p.y;
        }
    }

    [min_x, min_y, max_x, max_y]
}
