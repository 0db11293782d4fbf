//! Planar primitives shared by the gear and arm builders.

pub mod arc;
pub mod outline;

pub use arc::{Arc, Circle};
pub use outline::Outline;

use crate::float_types::{Real, round_to};
use nalgebra::Point2;

/// Round both coordinates of `p` to `decimals` places.
#[inline]
pub fn round_point(p: Point2<Real>, decimals: u32) -> Point2<Real> {
    Point2::new(round_to(p.x, decimals), round_to(p.y, decimals))
}

/// Return `points` rotated by `angle` radians about the origin, rounded to
/// `decimals` places for compactness.
pub fn rotate_points(points: &[Point2<Real>], angle: Real, decimals: u32) -> Vec<Point2<Real>> {
    let (s, c) = angle.sin_cos();
    points
        .iter()
        .map(|p| {
            Point2::new(
                round_to(p.x * c - p.y * s, decimals),
                round_to(p.x * s + p.y * c, decimals),
            )
        })
        .collect()
}

/// Reflect `p` across the x axis.
#[inline]
pub fn mirror_point(p: Point2<Real>) -> Point2<Real> {
    // + 0.0 keeps points on the axis from turning into -0.0
    Point2::new(p.x, -p.y + 0.0)
}
