//! Circle and arc descriptors for the solid-modeling backend.

use crate::float_types::{Real, TAU};
use nalgebra::{Point2, Vector2};

/// A full circle, consumed by the backend as a cylinder cross-section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Point2<Real>,
    pub radius: Real,
}

impl Circle {
    pub const fn new(center: Point2<Real>, radius: Real) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn point_at(&self, angle: Real) -> Point2<Real> {
        self.center + Vector2::new(angle.cos(), angle.sin()) * self.radius
    }

    /// Polar angle of `p` seen from the center, in `(-π, π]`.
    #[inline]
    pub fn angle_of(&self, p: &Point2<Real>) -> Real {
        let d = p - self.center;
        d.y.atan2(d.x)
    }

    /// Signed distance from the circle boundary; negative inside.
    #[inline]
    pub fn distance(&self, p: &Point2<Real>) -> Real {
        (p - self.center).norm() - self.radius
    }
}

/// A counter-clockwise circular arc from `start_angle` to `end_angle`.
///
/// `end_angle` is kept in `(start_angle, start_angle + τ]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arc {
    pub center: Point2<Real>,
    pub radius: Real,
    pub start_angle: Real,
    pub end_angle: Real,
}

impl Arc {
    pub fn new(center: Point2<Real>, radius: Real, start_angle: Real, end_angle: Real) -> Self {
        let mut end_angle = end_angle;
        while end_angle <= start_angle {
            end_angle += TAU;
        }
        while end_angle - start_angle > TAU {
            end_angle -= TAU;
        }
        Self { center, radius, start_angle, end_angle }
    }

    /// The counter-clockwise arc of `circle` running from `from` to `to`.
    ///
    /// Both points are projected onto the circle by angle only.
    pub fn between(circle: &Circle, from: &Point2<Real>, to: &Point2<Real>) -> Self {
        Self::new(
            circle.center,
            circle.radius,
            circle.angle_of(from),
            circle.angle_of(to),
        )
    }

    #[inline]
    pub fn sweep(&self) -> Real {
        self.end_angle - self.start_angle
    }

    #[inline]
    pub fn circle(&self) -> Circle {
        Circle::new(self.center, self.radius)
    }

    #[inline]
    pub fn start_point(&self) -> Point2<Real> {
        self.circle().point_at(self.start_angle)
    }

    #[inline]
    pub fn end_point(&self) -> Point2<Real> {
        self.circle().point_at(self.end_angle)
    }

    /// `segments + 1` evenly spaced points from start to end inclusive.
    pub fn sample(&self, segments: usize) -> Vec<Point2<Real>> {
        let segments = segments.max(1);
        let step = self.sweep() / segments as Real;
        let circle = self.circle();
        (0..=segments)
            .map(|i| circle.point_at(self.start_angle + step * i as Real))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::PI;

    #[test]
    fn arc_end_is_normalised_after_start() {
        let arc = Arc::new(Point2::origin(), 1.0, PI / 2.0, -PI / 2.0);
        assert!((arc.sweep() - PI).abs() < 1e-12);
    }

    #[test]
    fn between_runs_counter_clockwise() {
        let c = Circle::new(Point2::new(1.0, 1.0), 2.0);
        let arc = Arc::between(&c, &Point2::new(3.0, 1.0), &Point2::new(1.0, 3.0));
        assert!((arc.sweep() - PI / 2.0).abs() < 1e-12);
        let pts = arc.sample(4);
        assert_eq!(pts.len(), 5);
        assert!((pts[4] - Point2::new(1.0, 3.0)).norm() < 1e-12);
        assert!(pts.iter().all(|p| c.distance(p).abs() < 1e-12));
    }
}
